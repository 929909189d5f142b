//! reqwest implementation of the lead store and auth gateway.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::lead::{Lead, LeadPayload};
use crate::domain::query::QueryState;
use crate::domain::types::LeadId;
use crate::domain::user::{Credentials, NewUser, User};
use crate::dto::api::{ErrorBody, LeadEnvelope, LeadPage, UserEnvelope};
use crate::repository::errors::{StoreError, StoreResult};
use crate::repository::{AuthGateway, LeadStore};
use crate::session::Session;

/// Client for the leads REST API.
///
/// Cookies set by the auth endpoints are replayed on every later request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<Session>) -> StoreResult<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| StoreError::InvalidUrl(err.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Checks that the API answers at all.
    pub async fn health(&self) -> StoreResult<()> {
        let request = self.request(Method::GET, &["health"])?;
        self.execute(request, "health").await.map(|_| ())
    }

    /// Appends `segments` to the base URL, percent-encoding each one whole.
    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(StoreError::InvalidUrl(format!("invalid path segment {segment:?}")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> StoreResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        log::debug!("Making {method} request to {}", url.path());
        Ok(self.http.request(method, url))
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> StoreResult<Response> {
        let response = request.send().await.map_err(|err| {
            log::error!("Request to /{path} failed: {err}");
            StoreError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        log::error!(
            "Request to /{path} returned {status}: {}",
            message.as_deref().unwrap_or("no message")
        );

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                self.session.expire();
                StoreError::Unauthorized {
                    message: message.unwrap_or_else(|| "Unauthorized".to_string()),
                }
            }
            StatusCode::NOT_FOUND => StoreError::NotFound {
                message: message.unwrap_or_else(|| "Not found".to_string()),
            },
            _ => StoreError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> StoreResult<T> {
        let response = self.execute(request, path).await?;
        response.json::<T>().await.map_err(|err| {
            log::error!("Failed to decode response from /{path}: {err}");
            StoreError::Decode(err.to_string())
        })
    }
}

#[async_trait]
impl LeadStore for ApiClient {
    async fn list_leads(&self, query: &QueryState) -> StoreResult<LeadPage> {
        let path = "api/leads";
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.page_size.get().to_string()),
        ];
        if !query.filters.is_empty() {
            let filters = serde_json::to_string(&query.filters)
                .map_err(|err| StoreError::Decode(format!("Failed to encode filters: {err}")))?;
            params.push(("filters", filters));
        }

        let request = self.request(Method::GET, &["api", "leads"])?.query(&params);
        self.fetch_json(request, path).await
    }

    async fn get_lead(&self, id: &LeadId) -> StoreResult<Lead> {
        let path = format!("api/leads/{id}");
        let request = self.request(Method::GET, &["api", "leads", id.as_str()])?;
        let envelope: LeadEnvelope = self.fetch_json(request, &path).await?;
        Ok(envelope.data)
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        let path = "api/leads";
        let request = self.request(Method::POST, &["api", "leads"])?.json(payload);
        let envelope: LeadEnvelope = self.fetch_json(request, path).await?;
        Ok(envelope.data)
    }

    async fn update_lead(&self, id: &LeadId, payload: &LeadPayload) -> StoreResult<Lead> {
        let path = format!("api/leads/{id}");
        let request = self
            .request(Method::PUT, &["api", "leads", id.as_str()])?
            .json(payload);
        let envelope: LeadEnvelope = self.fetch_json(request, &path).await?;
        Ok(envelope.data)
    }

    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
        let path = format!("api/leads/{id}");
        let request = self.request(Method::DELETE, &["api", "leads", id.as_str()])?;
        self.execute(request, &path).await.map(|_| ())
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &Credentials) -> StoreResult<User> {
        let path = "api/auth/login";
        let request = self
            .request(Method::POST, &["api", "auth", "login"])?
            .json(credentials);
        let envelope: UserEnvelope = self.fetch_json(request, path).await?;
        Ok(envelope.user)
    }

    async fn register(&self, new_user: &NewUser) -> StoreResult<User> {
        let path = "api/auth/register";
        let request = self
            .request(Method::POST, &["api", "auth", "register"])?
            .json(new_user);
        let envelope: UserEnvelope = self.fetch_json(request, path).await?;
        Ok(envelope.user)
    }

    async fn logout(&self) -> StoreResult<()> {
        let path = "api/auth/logout";
        let request = self.request(Method::POST, &["api", "auth", "logout"])?;
        self.execute(request, path).await.map(|_| ())
    }

    async fn current_user(&self) -> StoreResult<User> {
        let path = "api/auth/me";
        let request = self.request(Method::GET, &["api", "auth", "me"])?;
        let envelope: UserEnvelope = self.fetch_json(request, path).await?;
        Ok(envelope.user)
    }
}
