//! Per-domain state slot of the collection sync.

use crate::logic::QueryDescriptor;
use crate::sources::FetchError;
use crate::state::{Domain, DomainItems};

/// Lifecycle of a domain's result set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request failed; any earlier result set is still available.
    Failed(FetchError),
}

impl SyncStatus {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error of the last request, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Request currently awaited for a domain.
#[derive(Clone, Debug)]
pub(super) struct Pending {
    pub(super) id: u64,
    pub(super) query: QueryDescriptor,
}

/// Mutable state of one domain, only touched under the sync lock.
#[derive(Clone, Debug, Default)]
pub(super) struct DomainSlot {
    pub(super) status: SyncStatus,
    /// Last successful result set (stale-but-available on failure).
    pub(super) items: Option<DomainItems>,
    /// Query that produced `items`.
    pub(super) applied_query: Option<QueryDescriptor>,
    /// Most recently issued query, pending or not.
    pub(super) latest_query: Option<QueryDescriptor>,
    pub(super) pending: Option<Pending>,
}

impl DomainSlot {
    /// Whether `id` is still the request this slot waits for.
    pub(super) fn is_current(&self, id: u64) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == id)
    }

    pub(super) fn snapshot(&self, domain: Domain) -> DomainSnapshot {
        DomainSnapshot {
            domain,
            status: self.status.clone(),
            items: self.items.clone(),
            query: self.applied_query.clone(),
        }
    }
}

/// Read-only copy of a domain slot for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainSnapshot {
    /// Domain described.
    pub domain: Domain,
    /// Current lifecycle state.
    pub status: SyncStatus,
    /// Last good result set, if any request ever succeeded.
    pub items: Option<DomainItems>,
    /// Query that produced `items`.
    pub query: Option<QueryDescriptor>,
}

impl DomainSnapshot {
    /// What: Result set to display, empty when nothing has loaded yet.
    ///
    /// Output:
    /// - Clone of the cached items, or the domain's empty set
    #[must_use]
    pub fn items_or_empty(&self) -> DomainItems {
        self.items
            .clone()
            .unwrap_or_else(|| DomainItems::empty(self.domain))
    }

    /// Whether the shown data predates a failed refresh.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self.status, SyncStatus::Failed(_)) && self.items.is_some()
    }
}
