//! Session: the explicit state slots a front end drives.
//!
//! Holds the language selection, active tab, per-domain filters and the post
//! draft, and decides when a domain is refetched:
//! - on tab activation,
//! - on a server-side filter change of the active tab,
//! - on the first language selection.


use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::community::{CommunityEngine, PostError, VoteError};
use crate::i18n::{Language, LanguageSelection, LocaleError, StringBundle, resolve_language};
use crate::logic::{
    FilterChange, FilterComposer, FilterError, FilterField, FilterState, FilterValue,
    apply_local_filters, distinct_categories, distinct_parties,
};
use crate::sources::{CollectionService, FetchError};
use crate::state::{Constituency, Domain, DomainItems, PostId, Verdict, VoteType};
use crate::sync::{CollectionSync, FetchOutcome, SyncStatus};

/// Any failure surfaced by a session action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Language key not supported or bundle unreadable.
    #[error(transparent)]
    Locale(#[from] LocaleError),
    /// Filter value rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// A list request failed; the domain keeps its previous items.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Post creation failed; the draft is kept.
    #[error(transparent)]
    Post(#[from] PostError),
    /// Vote failed or was rejected.
    #[error(transparent)]
    Vote(#[from] VoteError),
}

/// Unsent community post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Headline as typed.
    pub title: String,
    /// Body as typed.
    pub content: String,
}

impl PostDraft {
    /// Whether nothing has been typed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// What a tab renders: locally filtered items plus load state.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainView {
    /// Domain shown.
    pub domain: Domain,
    /// Items after search and fact-checked filtering.
    pub items: DomainItems,
    /// Number of cached items before local filtering.
    pub total: usize,
    /// Load state of the domain.
    pub status: SyncStatus,
    /// Items come from before a failed refresh.
    pub stale: bool,
}

/// One user's session against the collection service.
#[derive(Debug)]
pub struct Session {
    sync: Arc<CollectionSync>,
    engine: CommunityEngine,
    filters: FilterComposer,
    language: LanguageSelection,
    bundle: Option<StringBundle>,
    active: Domain,
    draft: PostDraft,
}

impl Session {
    /// What: Start a session with no language selected and the candidates tab active.
    ///
    /// Inputs:
    /// - `service`: Remote collection service
    ///
    /// Output:
    /// - Session that issues no request until a language is selected
    #[must_use]
    pub fn new(service: Arc<dyn CollectionService>) -> Self {
        let sync = Arc::new(CollectionSync::new(service));
        Self {
            engine: CommunityEngine::new(Arc::clone(&sync)),
            sync,
            filters: FilterComposer::new(),
            language: LanguageSelection::Unset,
            bundle: None,
            active: Domain::Candidates,
            draft: PostDraft::default(),
        }
    }

    /// What: Select the display language.
    ///
    /// Inputs:
    /// - `key`: Language key (`english`, `tamil`, `en`, `ta`)
    ///
    /// # Errors
    /// - `SessionError::Locale` for an unknown key; the previous selection stays
    ///
    /// Details:
    /// - The first selection loads the constituency list and fetches the active tab. Their
    ///   failures are logged and visible through [`Self::view`]; they do not undo the selection.
    pub async fn select_language(&mut self, key: &str) -> Result<Language, SessionError> {
        let language = Language::from_key(key).map_err(LocaleError::from)?;
        let bundle = resolve_language(language)?;
        let first = !self.language.is_selected();
        self.language = LanguageSelection::Selected(language);
        self.bundle = Some(bundle);
        info!(%language, first, "Language selected");
        if first {
            if let Err(e) = self.sync.load_constituencies().await {
                warn!(error = %e, "Constituency list unavailable");
            }
            if let Err(e) = self.fetch_active().await {
                debug!(error = %e, "Initial fetch failed");
            }
        }
        Ok(language)
    }

    /// What: Switch to another tab.
    ///
    /// Output:
    /// - `None` when `domain` was already active or no language is selected yet
    /// - Fetch outcome of the newly active domain otherwise
    ///
    /// # Errors
    /// - `SessionError::Fetch` when the refetch failed
    ///
    /// Details:
    /// - The search text of the tab being left is cleared.
    pub async fn activate_tab(
        &mut self,
        domain: Domain,
    ) -> Result<Option<FetchOutcome>, SessionError> {
        if domain == self.active {
            return Ok(None);
        }
        let previous = std::mem::replace(&mut self.active, domain);
        if self.filters.reset_local(previous) {
            debug!(domain = %previous, "Cleared search on tab switch");
        }
        if !self.language.is_selected() {
            return Ok(None);
        }
        Ok(Some(self.fetch_active().await?))
    }

    /// What: Change one filter field.
    ///
    /// Inputs:
    /// - `domain`: Domain the filter belongs to
    /// - `field`: Field to change
    /// - `value`: New value; blank text clears the field
    ///
    /// Output:
    /// - How the change affects the domain
    ///
    /// # Errors
    /// - `SessionError::Filter` for a value of the wrong kind
    /// - `SessionError::Fetch` when the resulting refetch failed
    ///
    /// Details:
    /// - Only a `Requery` change on the active tab, after a language is selected, sends a
    ///   request. Inactive tabs pick their filters up on activation.
    pub async fn set_filter(
        &mut self,
        domain: Domain,
        field: FilterField,
        value: impl Into<FilterValue>,
    ) -> Result<FilterChange, SessionError> {
        let change = self.filters.set_filter(domain, field, value)?;
        if change == FilterChange::Requery && domain == self.active && self.language.is_selected()
        {
            self.fetch_active().await?;
        }
        Ok(change)
    }

    /// What: Re-send the last query of the active tab.
    ///
    /// # Errors
    /// - `SessionError::Fetch` when the request failed again
    pub async fn retry(&self) -> Result<FetchOutcome, SessionError> {
        Ok(self.sync.refetch_latest(self.active).await?)
    }

    async fn fetch_active(&self) -> Result<FetchOutcome, FetchError> {
        let query = self.filters.to_query(self.active);
        self.sync.fetch(self.active, query).await
    }

    /// What: Locally filtered view of a domain's cached result set.
    #[must_use]
    pub fn view(&self, domain: Domain) -> DomainView {
        let snapshot = self.sync.snapshot(domain);
        let all = snapshot.items_or_empty();
        DomainView {
            domain,
            items: apply_local_filters(self.filters.state(domain), &all),
            total: all.len(),
            stale: snapshot.is_stale(),
            status: snapshot.status,
        }
    }

    /// Mutable access to the post draft.
    pub const fn draft_mut(&mut self) -> &mut PostDraft {
        &mut self.draft
    }

    /// Current post draft.
    #[must_use]
    pub const fn draft(&self) -> &PostDraft {
        &self.draft
    }

    /// What: Send the draft to the community constituency currently filtered on.
    ///
    /// Output:
    /// - Identifier of the created post when the service reports one; the draft is cleared
    ///
    /// # Errors
    /// - `SessionError::Post` on validation or remote failure; the draft is left as typed
    pub async fn submit_post(&mut self) -> Result<Option<PostId>, SessionError> {
        let constituency = self.filters.state(Domain::CommunityPosts).constituency();
        let id = self
            .engine
            .create_post(constituency, &self.draft.title, &self.draft.content)
            .await?;
        self.draft = PostDraft::default();
        Ok(id)
    }

    /// What: Vote on a community post.
    ///
    /// # Errors
    /// - `SessionError::Vote` when a vote on the post is pending or the service fails
    pub async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), SessionError> {
        Ok(self.engine.vote(post_id, vote).await?)
    }

    /// Whether a vote on `post_id` awaits acknowledgment.
    #[must_use]
    pub fn is_vote_pending(&self, post_id: &PostId) -> bool {
        self.engine.is_vote_pending(post_id)
    }

    /// Distinct parties among the cached candidates.
    #[must_use]
    pub fn parties(&self) -> Vec<String> {
        match self.sync.snapshot(Domain::Candidates).items {
            Some(DomainItems::Candidates(list)) => distinct_parties(&list),
            _ => Vec::new(),
        }
    }

    /// Distinct categories among the cached manifesto promises.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        match self.sync.snapshot(Domain::Manifestos).items {
            Some(DomainItems::Manifestos(list)) => distinct_categories(&list),
            _ => Vec::new(),
        }
    }

    /// Verdicts offered by the fact-check selector.
    #[must_use]
    pub const fn verdicts(&self) -> &'static [Verdict] {
        &Verdict::ALL
    }

    /// Constituencies once loaded.
    #[must_use]
    pub fn constituencies(&self) -> Option<&[Constituency]> {
        self.sync.constituencies()
    }

    /// Current language selection.
    #[must_use]
    pub const fn language(&self) -> LanguageSelection {
        self.language
    }

    /// Strings of the selected language.
    #[must_use]
    pub const fn bundle(&self) -> Option<&StringBundle> {
        self.bundle.as_ref()
    }

    /// Tab currently shown.
    #[must_use]
    pub const fn active_tab(&self) -> Domain {
        self.active
    }

    /// Filter state of a domain.
    #[must_use]
    pub const fn filters(&self, domain: Domain) -> &FilterState {
        self.filters.state(domain)
    }

    /// Sync layer shared with the community engine.
    #[must_use]
    pub const fn sync(&self) -> &Arc<CollectionSync> {
        &self.sync
    }
}
