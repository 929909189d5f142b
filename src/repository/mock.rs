//! Mock remote interfaces for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::lead::{Lead, LeadPayload};
use crate::domain::query::QueryState;
use crate::domain::types::LeadId;
use crate::domain::user::{Credentials, NewUser, User};
use crate::dto::api::LeadPage;
use crate::repository::errors::StoreResult;
use crate::repository::{AuthGateway, LeadStore};

mock! {
    pub LeadStore {}

    #[async_trait]
    impl LeadStore for LeadStore {
        async fn list_leads(&self, query: &QueryState) -> StoreResult<LeadPage>;
        async fn get_lead(&self, id: &LeadId) -> StoreResult<Lead>;
        async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead>;
        async fn update_lead(&self, id: &LeadId, payload: &LeadPayload) -> StoreResult<Lead>;
        async fn delete_lead(&self, id: &LeadId) -> StoreResult<()>;
    }
}

mock! {
    pub AuthGateway {}

    #[async_trait]
    impl AuthGateway for AuthGateway {
        async fn login(&self, credentials: &Credentials) -> StoreResult<User>;
        async fn register(&self, new_user: &NewUser) -> StoreResult<User>;
        async fn logout(&self) -> StoreResult<()>;
        async fn current_user(&self) -> StoreResult<User>;
    }
}
