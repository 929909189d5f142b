//! Read model of the lead list handed to the presentation layer.

use serde::Serialize;

use crate::domain::filter::Filters;
use crate::domain::lead::Lead;
use crate::pagination::PaginationMeta;

/// Whether a remote round trip is currently in flight.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    Idle,
    Fetching,
}

/// Everything the grid needs to render the current page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ListView {
    pub leads: Vec<Lead>,
    pub pagination: PaginationMeta,
    pub page: usize,
    pub page_size: usize,
    pub filters: Filters,
    pub status: SyncStatus,
    pub error: Option<String>,
}

impl ListView {
    pub fn is_loading(&self) -> bool {
        self.status == SyncStatus::Fetching
    }
}
