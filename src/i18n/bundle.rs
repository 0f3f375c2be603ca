//! Typed string bundle for one language.
//!
//! Every field is required at load time, so a locale file that forgets a key
//! fails to parse instead of rendering an empty label. Lookups keyed by domain
//! values (verdicts, fulfilment, tabs, vote direction) go through the explicit
//! `match` helpers below rather than string indexing.

use serde::Deserialize;

use crate::state::{Domain, Fulfillment, Verdict, VoteType};

/// Complete set of user-facing strings for one language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringBundle {
    /// Application name.
    pub app_title: String,
    /// Tagline under the title.
    pub tagline: String,
    /// Language picker screen.
    pub language_selection: LanguageSelectionStrings,
    /// Tab captions.
    pub tabs: TabStrings,
    /// Candidates tab.
    pub candidates_tab: CandidatesTab,
    /// Manifestos tab.
    pub manifestos_tab: ManifestosTab,
    /// Fact-check tab.
    pub fact_check_tab: FactCheckTab,
    /// Community tab.
    pub community_tab: CommunityTab,
    /// Shared status strings.
    pub common: CommonStrings,
}

/// Strings for the language picker.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageSelectionStrings {
    /// Heading.
    pub title: String,
    /// Prompt under the heading.
    pub subtitle: String,
    /// Button choosing English.
    pub select_english: String,
    /// Button choosing Tamil.
    pub select_tamil: String,
}

/// Tab captions.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabStrings {
    /// Candidates tab.
    pub candidates: String,
    /// Manifestos tab.
    pub manifestos: String,
    /// Fact-check tab.
    pub fact_check: String,
    /// Community tab.
    pub community: String,
}

impl TabStrings {
    /// Caption for a domain's tab.
    #[must_use]
    pub fn label(&self, domain: Domain) -> &str {
        match domain {
            Domain::Candidates => &self.candidates,
            Domain::Manifestos => &self.manifestos,
            Domain::FactChecks => &self.fact_check,
            Domain::CommunityPosts => &self.community,
        }
    }
}

/// Candidates tab strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidatesTab {
    /// Tab heading.
    pub title: String,
    /// Constituency picker prompt.
    pub select_constituency: String,
    /// Picker entry meaning no constituency filter.
    pub all_constituencies: String,
    /// Name column.
    pub name: String,
    /// Party column.
    pub party: String,
    /// Age column.
    pub age: String,
    /// Education column.
    pub education: String,
    /// Criminal cases column.
    pub criminal: String,
    /// Declared assets column.
    pub assets: String,
    /// Declared liabilities column.
    pub liabilities: String,
    /// Marker for the sitting member.
    pub incumbent: String,
    /// Search box placeholder.
    pub search: String,
}

/// Manifestos tab strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestosTab {
    /// Tab heading.
    pub title: String,
    /// Picker entry meaning no party filter.
    pub all_parties: String,
    /// Picker entry meaning no category filter.
    pub all_categories: String,
    /// Promise kept.
    pub fulfilled: String,
    /// Promise broken.
    pub not_fulfilled: String,
    /// Promise not yet assessed.
    pub pending: String,
    /// Expand the explanation.
    pub read_more: String,
    /// Collapse the explanation.
    pub read_less: String,
    /// Evidence heading.
    pub evidence: String,
    /// Search box placeholder.
    pub search: String,
}

impl ManifestosTab {
    /// Label for a promise's fulfilment state. Unknown reads as "pending".
    #[must_use]
    pub fn fulfillment_label(&self, fulfilled: Fulfillment) -> &str {
        match fulfilled {
            Fulfillment::Fulfilled => &self.fulfilled,
            Fulfillment::NotFulfilled => &self.not_fulfilled,
            Fulfillment::Unknown => &self.pending,
        }
    }
}

/// Fact-check tab strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactCheckTab {
    /// Tab heading.
    pub title: String,
    /// Toggle hiding unverified claims.
    pub only_fact_checked: String,
    /// Picker entry meaning no verdict filter.
    pub all_verdicts: String,
    /// Verdict `True`.
    #[serde(rename = "true")]
    pub verdict_true: String,
    /// Verdict `False`.
    #[serde(rename = "false")]
    pub verdict_false: String,
    /// Verdict `Misleading`.
    pub misleading: String,
    /// Verdict `Unverified`.
    pub unverified: String,
    /// Source link caption.
    pub source: String,
    /// Tags caption.
    pub tags: String,
}

impl FactCheckTab {
    /// Label for a verdict.
    #[must_use]
    pub fn verdict_label(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::True => &self.verdict_true,
            Verdict::False => &self.verdict_false,
            Verdict::Misleading => &self.misleading,
            Verdict::Unverified => &self.unverified,
        }
    }
}

/// Community tab strings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommunityTab {
    /// Tab heading.
    pub title: String,
    /// New post form heading.
    pub new_post: String,
    /// Title field label.
    pub post_title: String,
    /// Content field label.
    pub post_content: String,
    /// Submit button.
    pub submit: String,
    /// Upvote button.
    pub upvote: String,
    /// Downvote button.
    pub downvote: String,
    /// Reply count caption.
    pub replies: String,
    /// Validation message for an incomplete post.
    pub fill_all_fields: String,
    /// Post creation failed.
    pub submit_failed: String,
    /// Vote failed.
    pub vote_failed: String,
    /// A vote on this post is still being sent.
    pub vote_pending: String,
}

impl CommunityTab {
    /// Button label for a vote direction.
    #[must_use]
    pub fn vote_label(&self, vote: VoteType) -> &str {
        match vote {
            VoteType::Upvote => &self.upvote,
            VoteType::Downvote => &self.downvote,
        }
    }
}

/// Strings shared by every tab.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonStrings {
    /// Request in progress.
    pub loading: String,
    /// Generic failure line.
    pub error: String,
    /// Empty result set.
    pub no_data: String,
    /// Author shown for anonymous posts.
    pub anonymous: String,
    /// Retry action.
    pub retry: String,
    /// Marker for data kept from an earlier load.
    pub stale: String,
}
