//! Keeps the displayed page of leads consistent with the remote store.
//!
//! Every fetch takes the next generation number when it is issued. Only the
//! response carrying the latest generation may touch the list, so a slow
//! response can never overwrite the result of a newer query. Mutations patch
//! whatever page is current when they complete.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::filter::Filters;
use crate::domain::lead::{Lead, LeadPayload};
use crate::domain::query::{QueryOverride, QueryState};
use crate::domain::types::{LeadId, PageSize};
use crate::dto::api::LeadPage;
use crate::dto::leads::{ListView, SyncStatus};
use crate::pagination::PaginationMeta;
use crate::repository::LeadStore;
use crate::repository::errors::StoreError;
use crate::services::{ServiceError, ServiceResult};

const FETCH_FAILED: &str = "Failed to fetch leads";
const CREATE_FAILED: &str = "Failed to create lead";
const UPDATE_FAILED: &str = "Failed to update lead";
const DELETE_FAILED: &str = "Failed to delete lead";

/// Result of a fetch that reached the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the list.
    Applied,
    /// A newer fetch was issued meanwhile; the response was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct ListState {
    leads: Vec<Lead>,
    pagination: PaginationMeta,
    query: QueryState,
    in_flight: usize,
    error: Option<String>,
    fetch_generation: u64,
}

impl ListState {
    fn apply_page(&mut self, page: LeadPage) {
        let pagination = PaginationMeta::new(page.page, page.limit, page.total);
        if pagination.total_pages != page.total_pages {
            log::warn!(
                "Server reported {} pages for {} leads at {} per page, using {}",
                page.total_pages,
                page.total,
                page.limit,
                pagination.total_pages
            );
        }
        self.leads = page.data;
        self.pagination = pagination;
    }
}

/// Marks one round trip as in flight until dropped.
struct BusyGuard<'a> {
    state: &'a Mutex<ListState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// Owner of the lead list shown in the grid.
pub struct LeadsSynchronizer<S> {
    store: S,
    state: Mutex<ListState>,
}

impl<S: LeadStore> LeadsSynchronizer<S> {
    pub fn new(store: S) -> Self {
        Self::with_page_size(store, PageSize::default())
    }

    pub fn with_page_size(store: S, page_size: PageSize) -> Self {
        let state = ListState {
            query: QueryState::new(page_size),
            ..ListState::default()
        };
        Self {
            store,
            state: Mutex::new(state),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_operation(&self) -> BusyGuard<'_> {
        let mut state = self.lock();
        state.in_flight += 1;
        state.error = None;
        BusyGuard { state: &self.state }
    }

    fn fail(&self, err: StoreError, fallback: &str) -> ServiceError {
        let err = ServiceError::store(err, fallback);
        log::error!("{fallback}: {err}");
        self.lock().error = Some(err.message());
        err
    }

    /// Read model for rendering.
    pub fn snapshot(&self) -> ListView {
        let state = self.lock();
        ListView {
            leads: state.leads.clone(),
            pagination: state.pagination,
            page: state.query.page,
            page_size: state.query.page_size.get(),
            filters: state.query.filters.clone(),
            status: if state.in_flight > 0 {
                SyncStatus::Fetching
            } else {
                SyncStatus::Idle
            },
            error: state.error.clone(),
        }
    }

    pub fn query(&self) -> QueryState {
        self.lock().query.clone()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Fetches the page described by `query_override` merged onto the
    /// current query.
    ///
    /// The merged query becomes current immediately, before the response
    /// arrives. A superseded response is dropped whether it succeeded or not.
    pub async fn fetch(&self, query_override: Option<QueryOverride>) -> ServiceResult<FetchOutcome> {
        let _busy = self.begin_operation();
        let query = self.lock().query.merged(query_override.unwrap_or_default());
        self.fetch_query(query).await
    }

    async fn fetch_query(&self, query: QueryState) -> ServiceResult<FetchOutcome> {
        let generation = {
            let mut state = self.lock();
            state.fetch_generation += 1;
            state.query = query.clone();
            state.fetch_generation
        };

        let result = self.store.list_leads(&query).await;

        let mut state = self.lock();
        if state.fetch_generation != generation {
            log::debug!(
                "Discarding lead page {} from fetch #{generation}, fetch #{} is newer",
                query.page,
                state.fetch_generation
            );
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                state.apply_page(page);
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                let err = ServiceError::store(err, FETCH_FAILED);
                log::error!("{FETCH_FAILED}: {err}");
                state.error = Some(err.message());
                Err(err)
            }
        }
    }

    /// Fetches the current page again.
    pub async fn reload(&self) -> ServiceResult<FetchOutcome> {
        let page = self.lock().query.page;
        self.fetch(Some(QueryOverride::default().page(page))).await
    }

    pub async fn change_page(&self, page: usize) -> ServiceResult<FetchOutcome> {
        self.fetch(Some(QueryOverride::default().page(page))).await
    }

    /// Switches the page size and returns to the first page.
    pub async fn change_page_size(&self, page_size: PageSize) -> ServiceResult<FetchOutcome> {
        self.fetch(Some(QueryOverride::default().page_size(page_size)))
            .await
    }

    /// Replaces the active filters and returns to the first page.
    pub async fn change_filters(&self, filters: Filters) -> ServiceResult<FetchOutcome> {
        self.fetch(Some(QueryOverride::default().filters(filters)))
            .await
    }

    pub async fn clear_filters(&self) -> ServiceResult<FetchOutcome> {
        self.change_filters(Filters::new()).await
    }

    /// Creates a lead, then refetches the current page so the list reflects
    /// the server's ordering.
    ///
    /// A failed refetch is recorded on the list but does not fail the create.
    pub async fn create(&self, payload: &LeadPayload) -> ServiceResult<Lead> {
        let _busy = self.begin_operation();
        let lead = self
            .store
            .create_lead(payload)
            .await
            .map_err(|err| self.fail(err, CREATE_FAILED))?;
        log::info!("Created lead {}", lead.id);

        let query = self.lock().query.clone();
        if let Err(err) = self.fetch_query(query).await {
            log::error!("Lead {} created but the list was not refreshed: {err}", lead.id);
        }
        Ok(lead)
    }

    /// Updates a lead and swaps the server's record into its row.
    pub async fn update(&self, id: &LeadId, payload: &LeadPayload) -> ServiceResult<Lead> {
        let _busy = self.begin_operation();
        let lead = self
            .store
            .update_lead(id, payload)
            .await
            .map_err(|err| self.fail(err, UPDATE_FAILED))?;

        let mut state = self.lock();
        match state.leads.iter_mut().find(|row| &row.id == id) {
            Some(row) => *row = lead.clone(),
            None => log::debug!("Updated lead {id} is not on the displayed page"),
        }
        Ok(lead)
    }

    /// Deletes a lead and drops it from the list without refetching.
    ///
    /// The displayed page keeps its number even if it is now past the last
    /// page.
    pub async fn delete(&self, id: &LeadId) -> ServiceResult<()> {
        let _busy = self.begin_operation();
        self.store
            .delete_lead(id)
            .await
            .map_err(|err| self.fail(err, DELETE_FAILED))?;

        let mut state = self.lock();
        state.leads.retain(|row| &row.id != id);
        state.pagination.record_deletion();
        log::info!("Deleted lead {id}");
        Ok(())
    }
}


#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::repository::mock::MockLeadStore;
    use crate::repository::test::{sample_lead, sample_payload};

    /// Ensures an update never triggers a list request.
    #[tokio::test]
    async fn update_sends_id_and_payload_only() {
        let mut store = MockLeadStore::new();
        store.expect_list_leads().times(0);
        store
            .expect_update_lead()
            .withf(|id, payload| id.as_str() == "l-9" && payload.first_name.as_str() == "Ada")
            .times(1)
            .returning(|_, _| Ok(sample_lead(9)));
        let sync = LeadsSynchronizer::new(store);

        let lead = sync
            .update(&LeadId::new("l-9").unwrap(), &sample_payload("Ada"))
            .await
            .expect("should update lead");

        assert_eq!(lead.id.as_str(), "l-9");
        assert!(sync.snapshot().leads.is_empty());
    }

    /// Ensures the list query carries the configured page size.
    #[tokio::test]
    async fn fetch_uses_configured_page_size() {
        let mut store = MockLeadStore::new();
        store
            .expect_list_leads()
            .withf(|query| query.page == 1 && query.page_size.get() == 50)
            .times(1)
            .returning(|query| {
                Ok(LeadPage {
                    data: vec![sample_lead(1)],
                    page: query.page,
                    limit: query.page_size.get(),
                    total: 1,
                    total_pages: 1,
                })
            });
        let sync = LeadsSynchronizer::with_page_size(store, PageSize::new(50).unwrap());

        sync.fetch(None).await.expect("should fetch leads");

        assert_eq!(sync.snapshot().pagination, PaginationMeta::new(1, 50, 1));
    }

    /// Ensures a rejected session surfaces as unauthorized.
    #[tokio::test]
    async fn unauthorized_delete_is_reported() {
        let mut store = MockLeadStore::new();
        store.expect_delete_lead().times(1).returning(|_| {
            Err(StoreError::Unauthorized {
                message: "Session expired".to_string(),
            })
        });
        let sync = LeadsSynchronizer::new(store);

        let err = sync.delete(&LeadId::new("l-1").unwrap()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(sync.snapshot().error.as_deref(), Some("Session expired"));
    }
}
