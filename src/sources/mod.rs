//! Remote collection service: the trait seam and its HTTP implementation.
//!
//! Everything above this module talks to [`CollectionService`]; the
//! reqwest-backed [`HttpCollectionService`] is the production implementation
//! and tests substitute in-memory fakes.

mod error;
mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{FetchError, FetchErrorKind};
pub use http::HttpCollectionService;

use crate::logic::QueryDescriptor;
use crate::state::{Constituency, DomainItems, PostId, VoteType};

/// Payload of `POST /community-posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPost {
    /// Constituency the post belongs to.
    pub constituency: String,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
}

/// Acknowledgment of a created post.
///
/// Any 2xx reply carrying `message` acknowledges the post; the service may
/// omit the new identifier.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PostAck {
    /// Server message, e.g. "Post created successfully".
    pub message: String,
    /// Identifier of the new post, when the service reports it.
    #[serde(default)]
    pub post_id: Option<PostId>,
}

/// Operations the core consumes from the remote collection service.
///
/// All list operations return arrays (possibly empty). Implementations
/// classify every failure as a [`FetchError`]; they never panic.
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// `GET /constituencies`.
    async fn list_constituencies(&self) -> Result<Vec<Constituency>, FetchError>;

    /// `GET /<domain>?<query>`; the returned variant matches `query.domain()`.
    async fn list(&self, query: &QueryDescriptor) -> Result<DomainItems, FetchError>;

    /// `POST /community-posts`.
    async fn create_post(&self, post: &NewPost) -> Result<PostAck, FetchError>;

    /// `POST /community-posts/{id}/vote`.
    async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), FetchError>;
}
