//! Common helpers for HTTP client tests.

use std::sync::Arc;

use pushkind_leads::domain::lead::{LeadPayload, LeadSource, LeadStatus};
use pushkind_leads::domain::types::{
    CompanyName, EmailAddress, LeadScore, LeadValue, PersonName, PhoneNumber, PlaceName,
};
use pushkind_leads::repository::ApiClient;
use pushkind_leads::session::Session;
use serde_json::{Value, json};

/// Builds a client pointed at the mock server together with its session.
pub fn api_client(url: &str) -> (ApiClient, Arc<Session>) {
    let session = Arc::new(Session::new());
    let client = ApiClient::new(url, session.clone()).expect("valid mock server url");
    (client, session)
}

/// Lead as the API serializes it.
pub fn lead_json(id: &str, first_name: &str) -> Value {
    json!({
        "_id": id,
        "first_name": first_name,
        "last_name": "Doe",
        "email": "jane@example.com",
        "phone": "555-0100",
        "company": "Acme",
        "city": "Austin",
        "state": "TX",
        "source": "website",
        "status": "new",
        "score": 42,
        "lead_value": 1500.5,
        "is_qualified": false,
        "created_at": "2024-03-01T10:00:00Z"
    })
}

pub fn lead_payload(first_name: &str) -> LeadPayload {
    LeadPayload {
        first_name: PersonName::new(first_name).unwrap(),
        last_name: PersonName::new("Doe").unwrap(),
        email: EmailAddress::new("jane@example.com").unwrap(),
        phone: PhoneNumber::new("555-0100").unwrap(),
        company: CompanyName::new("Acme").unwrap(),
        city: PlaceName::new("Austin").unwrap(),
        state: PlaceName::new("TX").unwrap(),
        source: LeadSource::Website,
        status: LeadStatus::New,
        score: LeadScore::new(42).unwrap(),
        lead_value: LeadValue::new(1500.5).unwrap(),
        is_qualified: false,
    }
}
