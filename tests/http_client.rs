use mockito::{Matcher, Server};
use pushkind_leads::domain::filter::{FilterField, Operator, RawValue};
use pushkind_leads::domain::query::QueryState;
use pushkind_leads::domain::types::{EmailAddress, LeadId, PageSize};
use pushkind_leads::domain::user::Credentials;
use pushkind_leads::forms::filters::FilterForm;
use pushkind_leads::repository::errors::StoreError;
use pushkind_leads::repository::{AuthGateway, LeadStore};
use pushkind_leads::services::leads::{FetchOutcome, LeadsSynchronizer};
use pushkind_leads::session::SessionState;
use serde_json::json;

mod common;

fn page_body(leads: Vec<serde_json::Value>, page: usize, total: usize) -> String {
    json!({
        "data": leads,
        "page": page,
        "limit": 20,
        "total": total,
        "totalPages": total.div_ceil(20),
    })
    .to_string()
}

#[tokio::test]
async fn test_list_leads_sends_page_limit_and_filters() {
    let mut server = Server::new_async().await;
    let mut form = FilterForm::default();
    form.set_status("new").unwrap();
    form.set(FilterField::Score, Operator::Between, &RawValue::range("10", ""))
        .unwrap();
    let query = QueryState {
        page: 2,
        page_size: PageSize::new(20).unwrap(),
        filters: form.into_filters(),
    };
    let filters = concat!(
        r#"{"status":{"operator":"equals","value":"new"},"#,
        r#""score":{"operator":"between","value":{"min":10,"max":100}}}"#
    );

    let mock = server
        .mock("GET", "/api/leads")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("filters".into(), filters.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(vec![common::lead_json("l-21", "Ann")], 2, 21))
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    let page = client.list_leads(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.page, 2);
    assert_eq!(page.total, 21);
    assert_eq!(page.data[0].id.as_str(), "l-21");
}

#[tokio::test]
async fn test_list_leads_omits_empty_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/leads")
        .match_query(Matcher::Exact("page=1&limit=20".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(vec![], 1, 0))
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    let page = client.list_leads(&QueryState::default()).await.unwrap();

    mock.assert_async().await;
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_expires_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/leads")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Session expired"}"#)
        .create_async()
        .await;

    let (client, session) = common::api_client(&server.url());
    let err = client.list_leads(&QueryState::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), Some("Session expired"));
    assert_eq!(session.state(), SessionState::Expired);
}

#[tokio::test]
async fn test_error_body_message_is_extracted() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/leads")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Email already exists"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/leads/missing")
        .with_status(404)
        .with_body("not json")
        .create_async()
        .await;

    let (client, session) = common::api_client(&server.url());

    let err = client
        .create_lead(&common::lead_payload("Jane"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Api { status: 422, ref message } if message.as_deref() == Some("Email already exists")
    ));

    let err = client
        .get_lead(&LeadId::new("missing").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(session.state(), SessionState::Unknown);
}

#[tokio::test]
async fn test_lead_mutations_use_rest_routes() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/api/leads")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "first_name": "Jane",
            "email": "jane@example.com",
            "score": 42,
            "source": "website"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": common::lead_json("l-1", "Jane")}).to_string())
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/api/leads/l-1")
        .match_body(Matcher::PartialJson(json!({"first_name": "Janet"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": common::lead_json("l-1", "Janet")}).to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/leads/l-1")
        .with_status(204)
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    let id = LeadId::new("l-1").unwrap();

    let created = client
        .create_lead(&common::lead_payload("Jane"))
        .await
        .unwrap();
    assert_eq!(created.id, id);
    let updated = client
        .update_lead(&id, &common::lead_payload("Janet"))
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Janet");
    client.delete_lead(&id).await.unwrap();

    create.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_lead_id_with_reserved_characters_stays_in_leads_route() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("DELETE", "/api/auth/logout")
        .expect(0)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/leads/..%2Fauth%2Flogout")
        .with_status(204)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/api/leads/a%23b%3Fc=1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": common::lead_json("a#b?c=1", "Ann")}).to_string())
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());

    client
        .delete_lead(&LeadId::new("../auth/logout").unwrap())
        .await
        .unwrap();
    let lead = client
        .get_lead(&LeadId::new("a#b?c=1").unwrap())
        .await
        .unwrap();
    assert_eq!(lead.id.as_str(), "a#b?c=1");

    delete.assert_async().await;
    get.assert_async().await;
    logout.assert_async().await;
}

#[tokio::test]
async fn test_login_cookie_is_sent_with_later_requests() {
    let mut server = Server::new_async().await;
    let user = json!({
        "user": {"id": "u-1", "firstName": "Sam", "lastName": "Lee", "email": "sam@example.com"}
    });
    server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "sam@example.com",
            "password": "secret1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
        .with_body(user.to_string())
        .create_async()
        .await;
    let me = server
        .mock("GET", "/api/auth/me")
        .match_header("cookie", Matcher::Regex("sid=abc123".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user.to_string())
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    let credentials = Credentials {
        email: EmailAddress::new("Sam@Example.com").unwrap(),
        password: "secret1".to_string(),
    };

    let signed_in = client.login(&credentials).await.unwrap();
    assert_eq!(signed_in.first_name, "Sam");
    let current = client.current_user().await.unwrap();
    assert_eq!(current.email, "sam@example.com");

    me.assert_async().await;
}

#[tokio::test]
async fn test_health_check() {
    let mut server = Server::new_async().await;
    let health = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    client.health().await.unwrap();

    health.assert_async().await;
}

#[tokio::test]
async fn test_synchronizer_over_http() {
    let mut server = Server::new_async().await;
    let leads = (1..=20)
        .map(|n| common::lead_json(&format!("l-{n}"), "Ann"))
        .collect();
    server
        .mock("GET", "/api/leads")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(leads, 1, 45))
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/leads/l-1")
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let (client, _) = common::api_client(&server.url());
    let sync = LeadsSynchronizer::new(client);

    assert_eq!(sync.fetch(None).await.unwrap(), FetchOutcome::Applied);
    sync.delete(&LeadId::new("l-1").unwrap()).await.unwrap();

    let view = sync.snapshot();
    assert_eq!(view.leads.len(), 19);
    assert_eq!(view.pagination.total, 44);
    assert_eq!(view.pagination.total_pages, 3);
    assert_eq!(view.error, None);
}
