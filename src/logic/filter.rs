//! Per-domain filter state and the composer that owns it.
//!
//! Server-side fields (constituency, party, category, verdict) shape the
//! request sent to the collection service. Local fields (search text and the
//! "only fact-checked" toggle) refine the cached result set after retrieval so
//! typing never triggers a network call.

use std::fmt;

use thiserror::Error;

use crate::logic::query::QueryDescriptor;
use crate::state::{
    Candidate, CommunityPost, Domain, DomainItems, FactCheck, ManifestoPromise, Verdict,
};

/// One settable field of a [`FilterState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Constituency name (server-side).
    Constituency,
    /// Party short name (server-side).
    Party,
    /// Manifesto category (server-side).
    Category,
    /// Fact-check verdict (server-side).
    Verdict,
    /// Free-text search (local).
    Search,
    /// Hide unverified fact-checks (local).
    ShowOnlyFactChecked,
}

impl FilterField {
    /// Query parameter name for server-side fields; `None` for local ones.
    #[must_use]
    pub const fn param_name(self) -> Option<&'static str> {
        match self {
            Self::Constituency => Some("constituency"),
            Self::Party => Some("party"),
            Self::Category => Some("category"),
            Self::Verdict => Some("verdict"),
            Self::Search | Self::ShowOnlyFactChecked => None,
        }
    }

    /// Whether changing this field requires a new request.
    #[must_use]
    pub const fn is_server_side(self) -> bool {
        self.param_name().is_some()
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::ShowOnlyFactChecked => "show_only_fact_checked",
            other => other.param_name().unwrap_or_default(),
        })
    }
}

/// What: Server-side fields the collection service accepts for a domain.
///
/// Inputs:
/// - `domain`: Target domain
///
/// Output:
/// - Fields in the order they are emitted into the query string
#[must_use]
pub const fn server_fields(domain: Domain) -> &'static [FilterField] {
    match domain {
        Domain::Candidates | Domain::CommunityPosts => &[FilterField::Constituency],
        Domain::Manifestos => &[FilterField::Party, FilterField::Category],
        Domain::FactChecks => &[FilterField::Verdict, FilterField::Constituency],
    }
}

/// Value handed to [`FilterComposer::set_filter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    /// Text value; empty or whitespace-only means "no constraint".
    Text(String),
    /// Boolean toggle.
    Flag(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for FilterValue {
    fn from(value: Option<&str>) -> Self {
        Self::Text(value.unwrap_or_default().to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Verdict> for FilterValue {
    fn from(value: Verdict) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

/// Rejected filter update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A flag was given for a text field or text for a flag field.
    #[error("filter field '{field}' does not accept this kind of value")]
    TypeMismatch {
        /// Field that was targeted.
        field: FilterField,
    },
    /// Verdict text that matches none of the known verdicts.
    #[error("unknown verdict '{0}'")]
    UnknownVerdict(String),
}

/// Outcome of a filter update, telling the caller whether to refetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterChange {
    /// The field already held this value; nothing to do.
    Unchanged,
    /// A server-side field of this domain changed; a new query is due.
    Requery,
    /// Only the local refinement changed; re-filter the cached set.
    LocalOnly,
}

/// Active predicate values for one domain.
///
/// Fields are read through accessors; writes go through [`FilterComposer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    constituency: Option<String>,
    party: Option<String>,
    category: Option<String>,
    verdict: Option<Verdict>,
    search_query: Option<String>,
    show_only_fact_checked: bool,
}

impl FilterState {
    /// Selected constituency.
    #[must_use]
    pub fn constituency(&self) -> Option<&str> {
        self.constituency.as_deref()
    }

    /// Selected party.
    #[must_use]
    pub fn party(&self) -> Option<&str> {
        self.party.as_deref()
    }

    /// Selected category.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Selected verdict.
    #[must_use]
    pub const fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Current search text.
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// Whether unverified fact-checks are hidden.
    #[must_use]
    pub const fn show_only_fact_checked(&self) -> bool {
        self.show_only_fact_checked
    }

    /// Text value of a server-side field, as it would be sent.
    fn server_value(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::Constituency => self.constituency.clone(),
            FilterField::Party => self.party.clone(),
            FilterField::Category => self.category.clone(),
            FilterField::Verdict => self.verdict.map(|v| v.as_str().to_string()),
            FilterField::Search | FilterField::ShowOnlyFactChecked => None,
        }
    }

    /// What: Apply one field update.
    ///
    /// Output:
    /// - `Ok(true)` when the stored value changed, `Ok(false)` when it was already equal
    ///
    /// # Errors
    /// - `TypeMismatch` for flag/text confusion, `UnknownVerdict` for unrecognised verdict text
    fn apply(&mut self, field: FilterField, value: FilterValue) -> Result<bool, FilterError> {
        match (field, value) {
            (FilterField::ShowOnlyFactChecked, FilterValue::Flag(on)) => {
                Ok(replace_if_changed(&mut self.show_only_fact_checked, on))
            }
            (FilterField::Verdict, FilterValue::Text(text)) => {
                let verdict = match normalize(&text) {
                    None => None,
                    Some(raw) => Some(parse_verdict_strict(&raw)?),
                };
                Ok(replace_if_changed(&mut self.verdict, verdict))
            }
            (FilterField::Constituency, FilterValue::Text(text)) => {
                Ok(replace_if_changed(&mut self.constituency, normalize(&text)))
            }
            (FilterField::Party, FilterValue::Text(text)) => {
                Ok(replace_if_changed(&mut self.party, normalize(&text)))
            }
            (FilterField::Category, FilterValue::Text(text)) => {
                Ok(replace_if_changed(&mut self.category, normalize(&text)))
            }
            (FilterField::Search, FilterValue::Text(text)) => {
                let search = if text.trim().is_empty() {
                    None
                } else {
                    Some(text)
                };
                Ok(replace_if_changed(&mut self.search_query, search))
            }
            (field, _) => Err(FilterError::TypeMismatch { field }),
        }
    }
}

/// Store `new` into `slot`, reporting whether anything changed.
fn replace_if_changed<T: PartialEq>(slot: &mut T, new: T) -> bool {
    if *slot == new {
        false
    } else {
        *slot = new;
        true
    }
}

/// Trim a text value; blank means "no constraint".
fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Exact (case-insensitive) verdict match; unlike display lookups there is no fallback.
fn parse_verdict_strict(raw: &str) -> Result<Verdict, FilterError> {
    Verdict::ALL
        .into_iter()
        .find(|v| v.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| FilterError::UnknownVerdict(raw.to_string()))
}

/// Owner of one [`FilterState`] per domain.
#[derive(Clone, Debug, Default)]
pub struct FilterComposer {
    states: [FilterState; 4],
}

/// Array slot of a domain.
const fn slot(domain: Domain) -> usize {
    match domain {
        Domain::Candidates => 0,
        Domain::Manifestos => 1,
        Domain::FactChecks => 2,
        Domain::CommunityPosts => 3,
    }
}

impl FilterComposer {
    /// Fresh composer with every domain unfiltered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of a domain's filters.
    #[must_use]
    pub const fn state(&self, domain: Domain) -> &FilterState {
        &self.states[slot(domain)]
    }

    /// What: Update one field of a domain's filter state.
    ///
    /// Inputs:
    /// - `domain`: Domain whose filters change
    /// - `field`: Field to update
    /// - `value`: New value; blank text clears the field
    ///
    /// Output:
    /// - `Unchanged` if the value was already stored, `Requery` if a server-side field
    ///   applicable to `domain` changed, `LocalOnly` otherwise
    ///
    /// # Errors
    /// - `FilterError` when the value kind does not fit the field or a verdict is unknown;
    ///   the state is left untouched
    pub fn set_filter(
        &mut self,
        domain: Domain,
        field: FilterField,
        value: impl Into<FilterValue>,
    ) -> Result<FilterChange, FilterError> {
        let changed = self.states[slot(domain)].apply(field, value.into())?;
        let change = if !changed {
            FilterChange::Unchanged
        } else if server_fields(domain).contains(&field) {
            FilterChange::Requery
        } else {
            FilterChange::LocalOnly
        };
        tracing::debug!(%domain, %field, ?change, "Filter updated");
        Ok(change)
    }

    /// What: Clear the local search text of a domain.
    ///
    /// Output:
    /// - `true` when there was search text to clear
    ///
    /// Details:
    /// - Explicit transition used when the user leaves a tab; server-side fields and the
    ///   fact-check toggle are kept.
    pub fn reset_local(&mut self, domain: Domain) -> bool {
        self.states[slot(domain)].search_query.take().is_some()
    }

    /// What: Translate a domain's filters into a query descriptor.
    ///
    /// Inputs:
    /// - `domain`: Domain to query
    ///
    /// Output:
    /// - Descriptor containing only the server-side fields that are set
    ///
    /// Details:
    /// - Pure and deterministic; unset fields are omitted, never sent as empty strings.
    #[must_use]
    pub fn to_query(&self, domain: Domain) -> QueryDescriptor {
        to_query(domain, self.state(domain))
    }
}

/// What: Translate a filter state into the query for a domain.
///
/// Inputs:
/// - `domain`: Domain to query
/// - `state`: Filter values
///
/// Output:
/// - Descriptor with the domain's set server-side fields in fixed order
#[must_use]
pub fn to_query(domain: Domain, state: &FilterState) -> QueryDescriptor {
    QueryDescriptor::new(
        domain,
        server_fields(domain)
            .iter()
            .filter_map(|&field| state.server_value(field).map(|v| (field, v))),
    )
}

/// Case-insensitive free-text matching used by the local search filter.
pub trait SearchMatch {
    /// Whether the item matches `needle`, which is already lowercased.
    fn matches_search(&self, needle: &str) -> bool;
}

/// Lowercased substring test.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl SearchMatch for Candidate {
    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle) || contains_ci(&self.party, needle)
    }
}

impl SearchMatch for ManifestoPromise {
    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.description, needle)
    }
}

impl SearchMatch for FactCheck {
    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle)
            || contains_ci(&self.description, needle)
            || self.tags.iter().any(|t| contains_ci(t, needle))
    }
}

impl SearchMatch for CommunityPost {
    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.title, needle) || contains_ci(&self.content, needle)
    }
}

/// Items of `items` that match the search text, if any.
fn search_filtered<T: SearchMatch + Clone>(items: &[T], needle: Option<&str>) -> Vec<T> {
    match needle {
        None => items.to_vec(),
        Some(n) => items.iter().filter(|it| it.matches_search(n)).cloned().collect(),
    }
}

/// What: Apply local refinements to a fetched result set.
///
/// Inputs:
/// - `state`: Filter state of the domain the items belong to
/// - `items`: Cached result set
///
/// Output:
/// - New result set containing only matching items, in the original order
///
/// Details:
/// - Search is a case-insensitive substring match over each domain's text fields.
/// - For fact-checks, the "only fact-checked" toggle drops `Unverified` entries.
/// - Server-side filters are not re-applied here; they were part of the request.
#[must_use]
pub fn apply_local_filters(state: &FilterState, items: &DomainItems) -> DomainItems {
    let needle = state.search_query().map(str::to_lowercase);
    let needle = needle.as_deref();
    match items {
        DomainItems::Candidates(v) => DomainItems::Candidates(search_filtered(v, needle)),
        DomainItems::Manifestos(v) => DomainItems::Manifestos(search_filtered(v, needle)),
        DomainItems::FactChecks(v) => {
            let mut out = search_filtered(v, needle);
            if state.show_only_fact_checked() {
                out.retain(|fc| fc.verdict.is_checked());
            }
            DomainItems::FactChecks(out)
        }
        DomainItems::CommunityPosts(v) => DomainItems::CommunityPosts(search_filtered(v, needle)),
    }
}
