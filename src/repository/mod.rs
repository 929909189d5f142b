use async_trait::async_trait;

use crate::{
    domain::{
        lead::{Lead, LeadPayload},
        query::QueryState,
        types::LeadId,
        user::{Credentials, NewUser, User},
    },
    dto::api::LeadPage,
    repository::errors::StoreResult,
};

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::ApiClient;

/// Remote collection of leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Reads one page of leads matching the query's filters.
    async fn list_leads(&self, query: &QueryState) -> StoreResult<LeadPage>;
    async fn get_lead(&self, id: &LeadId) -> StoreResult<Lead>;
    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead>;
    async fn update_lead(&self, id: &LeadId, payload: &LeadPayload) -> StoreResult<Lead>;
    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()>;
}

/// Remote authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> StoreResult<User>;
    async fn register(&self, new_user: &NewUser) -> StoreResult<User>;
    async fn logout(&self) -> StoreResult<()>;
    /// Resolves the user owning the current session cookie.
    async fn current_user(&self) -> StoreResult<User>;
}

#[async_trait]
impl<T: LeadStore + ?Sized> LeadStore for std::sync::Arc<T> {
    async fn list_leads(&self, query: &QueryState) -> StoreResult<LeadPage> {
        (**self).list_leads(query).await
    }

    async fn get_lead(&self, id: &LeadId) -> StoreResult<Lead> {
        (**self).get_lead(id).await
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        (**self).create_lead(payload).await
    }

    async fn update_lead(&self, id: &LeadId, payload: &LeadPayload) -> StoreResult<Lead> {
        (**self).update_lead(id, payload).await
    }

    async fn delete_lead(&self, id: &LeadId) -> StoreResult<()> {
        (**self).delete_lead(id).await
    }
}
