//! Collection sync: issues queries and owns the cached result set per domain.
//!
//! Each domain has a slot moving through `Idle → Loading → Ready | Failed`.
//! Every request gets a monotonic id; when a response arrives its id is
//! compared with the slot's pending id and stale responses are dropped, so the
//! most recently issued query wins regardless of arrival order. A failed
//! request keeps the previous result set visible.

mod slot;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub use slot::{DomainSnapshot, SyncStatus};

use crate::logic::QueryDescriptor;
use crate::sources::{CollectionService, FetchError};
use crate::state::{Constituency, Domain, DomainItems};
use slot::{DomainSlot, Pending};

/// How a completed `fetch` call affected the slot.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    /// The response was current and replaced the cached result set.
    Applied(DomainItems),
    /// A newer request was issued meanwhile; the response was discarded.
    Superseded,
    /// The identical query was already in flight; no request was issued.
    Coalesced,
}

/// Lock-protected state shared by all slots.
#[derive(Debug, Default)]
struct SyncState {
    slots: HashMap<Domain, DomainSlot>,
    next_request_id: u64,
}

/// Owner of every domain's cached result set.
///
/// Methods take `&self`; the internal lock is never held across an `.await`,
/// so overlapping fetches from concurrent tasks are safe.
pub struct CollectionSync {
    service: Arc<dyn CollectionService>,
    state: Mutex<SyncState>,
    constituencies: OnceCell<Vec<Constituency>>,
}

impl std::fmt::Debug for CollectionSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionSync")
            .field("state", &self.state)
            .field("constituencies", &self.constituencies.get().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl CollectionSync {
    /// What: Create a sync layer over a collection service.
    ///
    /// Inputs:
    /// - `service`: Remote collection service
    ///
    /// Output:
    /// - Sync with every domain `Idle`
    #[must_use]
    pub fn new(service: Arc<dyn CollectionService>) -> Self {
        Self {
            service,
            state: Mutex::new(SyncState::default()),
            constituencies: OnceCell::new(),
        }
    }

    /// Service this sync talks to.
    #[must_use]
    pub fn service(&self) -> &Arc<dyn CollectionService> {
        &self.service
    }

    fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// What: Fetch a domain's result set for `query`.
    ///
    /// Inputs:
    /// - `domain`: Domain whose slot is updated
    /// - `query`: Query to send
    ///
    /// Output:
    /// - `Ok(Applied(items))` when the response became the cached set
    /// - `Ok(Superseded)` when a newer request was issued before this one resolved
    /// - `Ok(Coalesced)` when the same query was already in flight
    ///
    /// # Errors
    /// - `FetchError` when the current request failed; the slot is `Failed` and keeps its
    ///   previous result set
    pub async fn fetch(
        &self,
        domain: Domain,
        query: QueryDescriptor,
    ) -> Result<FetchOutcome, FetchError> {
        self.issue(domain, query, true).await
    }

    /// What: Reissue the most recent query of a domain.
    ///
    /// Inputs:
    /// - `domain`: Domain to refresh
    ///
    /// Output:
    /// - Same as [`Self::fetch`], except a new request is always sent
    ///
    /// # Errors
    /// - `FetchError` when the request failed
    ///
    /// Details:
    /// - Used after writes: the server state changed, so an in-flight request for the same
    ///   query may carry pre-write data and is superseded rather than joined.
    /// - With no earlier query the unfiltered collection is requested.
    pub async fn refetch_latest(&self, domain: Domain) -> Result<FetchOutcome, FetchError> {
        let query = self
            .lock()
            .slots
            .get(&domain)
            .and_then(|s| s.latest_query.clone())
            .unwrap_or_else(|| QueryDescriptor::unfiltered(domain));
        self.refetch(domain, query).await
    }

    /// What: Send `query` even if the identical query is already in flight.
    ///
    /// Output:
    /// - Same as [`Self::fetch`] without the `Coalesced` case
    ///
    /// # Errors
    /// - `FetchError` when the request failed
    pub async fn refetch(
        &self,
        domain: Domain,
        query: QueryDescriptor,
    ) -> Result<FetchOutcome, FetchError> {
        self.issue(domain, query, false).await
    }

    async fn issue(
        &self,
        domain: Domain,
        query: QueryDescriptor,
        coalesce: bool,
    ) -> Result<FetchOutcome, FetchError> {
        let id = {
            let mut state = self.lock();
            state.next_request_id += 1;
            let id = state.next_request_id;
            let slot = state.slots.entry(domain).or_default();
            if let Some(pending) = &slot.pending {
                if coalesce && pending.query == query {
                    debug!(%domain, %query, "Identical request already in flight");
                    return Ok(FetchOutcome::Coalesced);
                }
                debug!(%domain, superseded = pending.id, request_id = id, "Superseding pending request");
            }
            slot.pending = Some(Pending {
                id,
                query: query.clone(),
            });
            slot.latest_query = Some(query.clone());
            slot.status = SyncStatus::Loading;
            id
        };

        debug!(%domain, request_id = id, %query, "Fetching");
        let result = self.service.list(&query).await.and_then(|items| {
            if items.domain() == domain {
                Ok(items)
            } else {
                Err(FetchError::malformed(format!(
                    "expected {domain} but the service returned {}",
                    items.domain()
                )))
            }
        });

        let mut state = self.lock();
        let slot = state.slots.entry(domain).or_default();
        if !slot.is_current(id) {
            debug!(%domain, request_id = id, "Discarding response to superseded request");
            return Ok(FetchOutcome::Superseded);
        }
        slot.pending = None;
        match result {
            Ok(items) => {
                info!(%domain, request_id = id, count = items.len(), "Result set updated");
                slot.items = Some(items.clone());
                slot.applied_query = Some(query);
                slot.status = SyncStatus::Ready;
                Ok(FetchOutcome::Applied(items))
            }
            Err(e) => {
                warn!(
                    %domain,
                    request_id = id,
                    error = %e,
                    retryable = e.retryable(),
                    kept = slot.items.as_ref().map_or(0, DomainItems::len),
                    "Fetch failed; keeping previous result set"
                );
                slot.status = SyncStatus::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// What: Load the constituency list once per session.
    ///
    /// Output:
    /// - Cached list; the service is only called until the first success
    ///
    /// # Errors
    /// - `FetchError` when the list has never loaded and the request fails
    pub async fn load_constituencies(&self) -> Result<&[Constituency], FetchError> {
        let list = self
            .constituencies
            .get_or_try_init(|| async {
                let list = self.service.list_constituencies().await.inspect_err(|e| {
                    warn!(error = %e, "Failed to load constituencies");
                })?;
                info!(count = list.len(), "Constituencies loaded");
                Ok::<_, FetchError>(list)
            })
            .await?;
        Ok(list)
    }

    /// Constituencies if already loaded.
    #[must_use]
    pub fn constituencies(&self) -> Option<&[Constituency]> {
        self.constituencies.get().map(Vec::as_slice)
    }

    /// Read-only copy of a domain's slot.
    #[must_use]
    pub fn snapshot(&self, domain: Domain) -> DomainSnapshot {
        self.lock()
            .slots
            .get(&domain)
            .map_or_else(
                || DomainSlot::default().snapshot(domain),
                |s| s.snapshot(domain),
            )
    }

    /// Current lifecycle state of a domain.
    #[must_use]
    pub fn status(&self, domain: Domain) -> SyncStatus {
        self.lock()
            .slots
            .get(&domain)
            .map(|s| s.status.clone())
            .unwrap_or_default()
    }

    /// Most recently issued query of a domain, if any.
    #[must_use]
    pub fn latest_query(&self, domain: Domain) -> Option<QueryDescriptor> {
        self.lock()
            .slots
            .get(&domain)
            .and_then(|s| s.latest_query.clone())
    }
}
