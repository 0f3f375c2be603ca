//! Community posting and voting.
//!
//! Writes go to the remote service first; local state only changes through the
//! refetch that follows an acknowledgment. Counters are never bumped locally.


use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::logic::{FilterField, QueryDescriptor};
use crate::sources::{FetchError, NewPost};
use crate::state::{Domain, PostId, VoteType};
use crate::sync::CollectionSync;

/// Client-side rejection of a new post. The service is never called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No constituency is selected.
    #[error("a constituency must be selected")]
    MissingConstituency,
    /// Title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Content is empty after trimming.
    #[error("content must not be empty")]
    EmptyContent,
}

/// Failure of [`CommunityEngine::create_post`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PostError {
    /// Input rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The service refused or could not be reached.
    #[error("post was not created: {0}")]
    Remote(#[source] FetchError),
}

/// Failure of [`CommunityEngine::vote`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VoteError {
    /// A vote on the same post is still awaiting acknowledgment.
    #[error("a vote on post {0} is already in flight")]
    InFlight(PostId),
    /// The service refused or could not be reached.
    #[error("vote was not recorded: {0}")]
    Remote(#[source] FetchError),
}

/// What: Check a new post before sending it.
///
/// Inputs:
/// - `constituency`: Selected constituency, if any
/// - `title`, `content`: Raw user input
///
/// Output:
/// - Trimmed payload ready to send
///
/// # Errors
/// - First failing rule in the order constituency, title, content
pub fn validate_post(
    constituency: Option<&str>,
    title: &str,
    content: &str,
) -> Result<NewPost, ValidationError> {
    let constituency = constituency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(ValidationError::MissingConstituency)?;
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(NewPost {
        constituency: constituency.to_string(),
        title: title.to_string(),
        content: content.to_string(),
    })
}

/// Marks a post as having a vote in flight until dropped.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<PostId>>,
    post_id: PostId,
}

impl<'a> InFlightGuard<'a> {
    /// Claim `post_id`, or `None` if it is already claimed.
    fn claim(set: &'a Mutex<HashSet<PostId>>, post_id: &PostId) -> Option<Self> {
        lock(set).insert(post_id.clone()).then(|| Self {
            set,
            post_id: post_id.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.post_id);
    }
}

fn lock(set: &Mutex<HashSet<PostId>>) -> MutexGuard<'_, HashSet<PostId>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Posting and voting on top of a [`CollectionSync`].
#[derive(Debug)]
pub struct CommunityEngine {
    sync: Arc<CollectionSync>,
    in_flight: Mutex<HashSet<PostId>>,
}

impl CommunityEngine {
    /// Engine writing through `sync`'s service and refreshing `sync`'s slots.
    #[must_use]
    pub fn new(sync: Arc<CollectionSync>) -> Self {
        Self {
            sync,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// What: Create a community post and refresh that constituency's posts.
    ///
    /// Inputs:
    /// - `constituency`: Selected constituency (`None` when unset)
    /// - `title`, `content`: User input; surrounding whitespace is dropped
    ///
    /// Output:
    /// - Identifier assigned by the service, or `None` when the acknowledgment carries none
    ///
    /// # Errors
    /// - `PostError::Validation` when input is incomplete (no request is sent)
    /// - `PostError::Remote` when the service fails (no refetch is issued)
    ///
    /// Details:
    /// - After the acknowledgment, `community-posts?constituency=<X>` is fetched. A failure
    ///   of that refetch is logged and leaves the posts slot `Failed`; the post itself was
    ///   created, so the call still succeeds.
    pub async fn create_post(
        &self,
        constituency: Option<&str>,
        title: &str,
        content: &str,
    ) -> Result<Option<PostId>, PostError> {
        let post = validate_post(constituency, title, content).inspect_err(|e| {
            debug!(error = %e, "Rejected post draft");
        })?;
        let ack = self
            .sync
            .service()
            .create_post(&post)
            .await
            .map_err(|e| {
                warn!(constituency = %post.constituency, error = %e, "Post creation failed");
                PostError::Remote(e)
            })?;
        info!(
            post_id = ?ack.post_id,
            constituency = %post.constituency,
            message = %ack.message,
            "Post created"
        );

        let query = QueryDescriptor::new(
            Domain::CommunityPosts,
            [(FilterField::Constituency, post.constituency)],
        );
        if let Err(e) = self.sync.refetch(Domain::CommunityPosts, query).await {
            warn!(error = %e, "Refetch after post creation failed");
        }
        Ok(ack.post_id)
    }

    /// What: Vote on a post and refresh the community posts.
    ///
    /// Inputs:
    /// - `post_id`: Post to vote on
    /// - `vote`: Direction
    ///
    /// # Errors
    /// - `VoteError::InFlight` when a vote on `post_id` has not resolved yet; nothing is sent
    /// - `VoteError::Remote` when the service fails; no refetch is issued
    ///
    /// Details:
    /// - The in-flight marker is released when this future completes or is dropped.
    /// - Votes on different posts proceed independently.
    pub async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), VoteError> {
        let Some(guard) = InFlightGuard::claim(&self.in_flight, post_id) else {
            debug!(%post_id, %vote, "Vote rejected: already in flight");
            return Err(VoteError::InFlight(post_id.clone()));
        };
        let sent = self.sync.service().vote(post_id, vote).await;
        drop(guard);
        sent.map_err(|e| {
            warn!(%post_id, %vote, error = %e, "Vote failed");
            VoteError::Remote(e)
        })?;
        info!(%post_id, %vote, "Vote recorded");

        if let Err(e) = self.sync.refetch_latest(Domain::CommunityPosts).await {
            warn!(error = %e, "Refetch after vote failed");
        }
        Ok(())
    }

    /// Whether a vote on `post_id` is awaiting acknowledgment.
    #[must_use]
    pub fn is_vote_pending(&self, post_id: &PostId) -> bool {
        lock(&self.in_flight).contains(post_id)
    }
}
