//! Wire shapes of the leads and auth REST endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::user::User;

/// Body of `GET /api/leads`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadPage {
    pub data: Vec<Lead>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Body of single-lead responses (`{"data": lead}`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadEnvelope {
    pub data: Lead,
}

/// Body of auth responses carrying the signed-in user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserEnvelope {
    pub user: User,
}

/// Error body returned by the API on failures.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
