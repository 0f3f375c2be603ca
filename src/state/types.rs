//! Core value types mirrored from the remote collection service.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One of the four information categories shown as tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Candidate comparison.
    Candidates,
    /// Party manifesto promises.
    Manifestos,
    /// Fact-checked claims.
    FactChecks,
    /// Community discussion posts.
    CommunityPosts,
}

impl Domain {
    /// Every domain in tab order.
    pub const ALL: [Self; 4] = [
        Self::Candidates,
        Self::Manifestos,
        Self::FactChecks,
        Self::CommunityPosts,
    ];

    /// What: Collection path of this domain on the remote service.
    ///
    /// Output:
    /// - Path relative to the API base, e.g. `/candidates`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Candidates => "/candidates",
            Self::Manifestos => "/manifestos",
            Self::FactChecks => "/fact-checks",
            Self::CommunityPosts => "/community-posts",
        }
    }

    /// Stable lowercase key used in logs and on the command line.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Candidates => "candidates",
            Self::Manifestos => "manifestos",
            Self::FactChecks => "fact-checks",
            Self::CommunityPosts => "community-posts",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Electoral constituency. Loaded once per session and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituency {
    /// Unique constituency identifier.
    #[serde(rename = "constituency_id")]
    pub id: String,
    /// Display name, also used as the filter value.
    pub name: String,
    /// Administrative district.
    pub district: String,
}

/// A candidate standing in exactly one constituency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique candidate identifier.
    #[serde(rename = "candidate_id")]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Party short name.
    pub party: String,
    /// Constituency name.
    pub constituency: String,
    /// Age in years.
    pub age: u32,
    /// Highest education as declared.
    pub education: String,
    /// Number of declared criminal cases.
    pub criminal_cases: u32,
    /// Declared assets in rupees.
    #[serde(deserialize_with = "non_negative")]
    pub assets: f64,
    /// Declared liabilities in rupees.
    #[serde(deserialize_with = "non_negative")]
    pub liabilities: f64,
    /// Whether the candidate currently holds the seat.
    #[serde(default)]
    pub incumbent: bool,
    /// Optional portrait URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Tri-state fulfilment of a manifesto promise.
///
/// The service encodes it as `true`, `false` or `null`; a missing field is
/// treated the same as `null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Fulfillment {
    /// Promise kept.
    Fulfilled,
    /// Promise broken.
    NotFulfilled,
    /// Pending or unknown.
    #[default]
    Unknown,
}

impl From<Option<bool>> for Fulfillment {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Fulfilled,
            Some(false) => Self::NotFulfilled,
            None => Self::Unknown,
        }
    }
}

impl From<Fulfillment> for Option<bool> {
    fn from(value: Fulfillment) -> Self {
        match value {
            Fulfillment::Fulfilled => Some(true),
            Fulfillment::NotFulfilled => Some(false),
            Fulfillment::Unknown => None,
        }
    }
}

/// A single manifesto promise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestoPromise {
    /// Unique promise identifier.
    #[serde(rename = "promise_id")]
    pub id: String,
    /// Party that made the promise.
    pub party: String,
    /// Policy category (e.g. "Transport").
    pub category: String,
    /// Headline.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Plain-language summary.
    pub one_minute_explanation: String,
    /// Fulfilment status.
    #[serde(default)]
    pub fulfilled: Fulfillment,
    /// Link to supporting evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
}

/// Verdict attached to a fact-check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Verdict {
    /// Claim is accurate.
    True,
    /// Claim is false.
    False,
    /// Claim is partly accurate but misleading.
    Misleading,
    /// Not yet checked.
    #[default]
    Unverified,
}

impl Verdict {
    /// All verdicts in display order.
    pub const ALL: [Self; 4] = [Self::True, Self::False, Self::Misleading, Self::Unverified];

    /// Wire representation used by the service and in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Misleading => "Misleading",
            Self::Unverified => "Unverified",
        }
    }

    /// What: Map a raw verdict string onto the enum.
    ///
    /// Inputs:
    /// - `raw`: Verdict text from the service or the user.
    ///
    /// Output:
    /// - Matching verdict; anything unrecognised is `Unverified`.
    ///
    /// Details:
    /// - Case-insensitive and whitespace tolerant.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_default()
    }

    /// Whether the claim has been through a fact-check.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        !matches!(self, Self::Unverified)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

/// A fact-checked claim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactCheck {
    /// Unique fact-check identifier.
    #[serde(rename = "fact_id")]
    pub id: String,
    /// The claim as a question or headline.
    pub title: String,
    /// Context for the claim.
    pub description: String,
    /// Outcome of the check.
    #[serde(default)]
    pub verdict: Verdict,
    /// Free-form topic tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Source backing the verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// When the fact-check was published.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<NaiveDateTime>,
    /// Constituency the claim concerns, if local.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
}

/// Identifier of a community post.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A reply under a community post. Read-only on this side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    /// Anonymous author handle.
    pub author_id: String,
    /// Reply body.
    pub content: String,
}

/// A community discussion post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPost {
    /// Unique post identifier.
    #[serde(rename = "post_id")]
    pub id: PostId,
    /// Constituency the post belongs to.
    pub constituency: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Anonymous author handle.
    #[serde(default)]
    pub author_id: String,
    /// Creation time as reported by the service.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: NaiveDateTime,
    /// Cumulative upvotes.
    #[serde(default)]
    pub upvotes: u64,
    /// Cumulative downvotes.
    #[serde(default)]
    pub downvotes: u64,
    /// Replies in server order.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl CommunityPost {
    /// Number of replies under the post.
    #[must_use]
    pub const fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

/// Direction of a vote on a community post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Support the post.
    Upvote,
    /// Oppose the post.
    Downvote,
}

impl VoteType {
    /// Wire representation (`upvote` / `downvote`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached result set for one domain.
#[derive(Clone, Debug, PartialEq)]
pub enum DomainItems {
    /// Candidate list.
    Candidates(Vec<Candidate>),
    /// Manifesto promises.
    Manifestos(Vec<ManifestoPromise>),
    /// Fact-checks.
    FactChecks(Vec<FactCheck>),
    /// Community posts.
    CommunityPosts(Vec<CommunityPost>),
}

impl DomainItems {
    /// What: Empty result set matching a domain.
    ///
    /// Inputs:
    /// - `domain`: Domain the set belongs to.
    ///
    /// Output:
    /// - Variant for `domain` holding no items.
    #[must_use]
    pub const fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Candidates => Self::Candidates(Vec::new()),
            Domain::Manifestos => Self::Manifestos(Vec::new()),
            Domain::FactChecks => Self::FactChecks(Vec::new()),
            Domain::CommunityPosts => Self::CommunityPosts(Vec::new()),
        }
    }

    /// Domain this set belongs to.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Candidates(_) => Domain::Candidates,
            Self::Manifestos(_) => Domain::Manifestos,
            Self::FactChecks(_) => Domain::FactChecks,
            Self::CommunityPosts(_) => Domain::CommunityPosts,
        }
    }

    /// Number of items in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Candidates(v) => v.len(),
            Self::Manifestos(v) => v.len(),
            Self::FactChecks(v) => v.len(),
            Self::CommunityPosts(v) => v.len(),
        }
    }

    /// Whether the set holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clamp negative monetary amounts to zero.
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let v = f64::deserialize(deserializer)?;
    Ok(if v.is_sign_negative() || v.is_nan() { 0.0 } else { v })
}

/// What: Parse a timestamp that may or may not carry an offset.
///
/// Details:
/// - RFC 3339 values are converted to UTC; naive ISO-8601 values are taken as-is.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn lenient_timestamp_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}
