//! reqwest-backed client for the remote collection service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{CollectionService, NewPost, PostAck};
use crate::logic::QueryDescriptor;
use crate::sources::FetchError;
use crate::state::{Constituency, Domain, DomainItems, PostId, VoteType};
use crate::util::{join_url, percent_encode};

/// Longest slice of an error body kept in a `FetchError` message.
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP implementation of [`CollectionService`].
///
/// Only a connect timeout is configured. A request that connects but never
/// answers stays pending; the sync layer reports that domain as loading.
#[derive(Clone, Debug)]
pub struct HttpCollectionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCollectionService {
    /// What: Build a client for the service at `base_url`.
    ///
    /// Inputs:
    /// - `base_url`: API root, e.g. `http://localhost:8001/api`
    /// - `connect_timeout`: Limit for establishing the TCP/TLS connection
    ///
    /// Output:
    /// - Ready-to-use service client
    ///
    /// # Errors
    /// - Returns `FetchError` (network kind) if the HTTP client cannot be constructed
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(format!("VoteWise/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// What: Wrap an already configured `reqwest::Client`.
    ///
    /// Inputs:
    /// - `base_url`: API root
    /// - `client`: Client to send requests with
    ///
    /// Output:
    /// - Service client sharing `client`'s connection pool
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        join_url(&self.base_url, path_and_query)
    }

    /// What: Turn a response into `Ok(body bytes)` or a status error.
    ///
    /// Details:
    /// - Non-2xx responses keep a short prefix of the body in the message.
    async fn check(resp: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        if status.is_success() {
            return Ok(body);
        }
        let text = String::from_utf8_lossy(&body);
        let excerpt: String = text.chars().take(ERROR_BODY_LIMIT).collect();
        Err(FetchError::status(
            status.as_u16(),
            if excerpt.is_empty() {
                status.to_string()
            } else {
                excerpt
            },
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, FetchError> {
        let url = self.url(path_and_query);
        debug!(%url, "GET");
        let resp = self.client.get(&url).send().await.inspect_err(|e| {
            warn!(%url, error = %e, "Request failed");
        })?;
        let body = Self::check(resp).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CollectionService for HttpCollectionService {
    async fn list_constituencies(&self) -> Result<Vec<Constituency>, FetchError> {
        self.get_json("/constituencies").await
    }

    async fn list(&self, query: &QueryDescriptor) -> Result<DomainItems, FetchError> {
        let pq = query.path_and_query();
        Ok(match query.domain() {
            Domain::Candidates => DomainItems::Candidates(self.get_json(&pq).await?),
            Domain::Manifestos => DomainItems::Manifestos(self.get_json(&pq).await?),
            Domain::FactChecks => DomainItems::FactChecks(self.get_json(&pq).await?),
            Domain::CommunityPosts => DomainItems::CommunityPosts(self.get_json(&pq).await?),
        })
    }

    async fn create_post(&self, post: &NewPost) -> Result<PostAck, FetchError> {
        let url = self.url(Domain::CommunityPosts.path());
        debug!(%url, constituency = %post.constituency, "POST new community post");
        let resp = self.client.post(&url).json(post).send().await?;
        let body = Self::check(resp).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), FetchError> {
        let url = self.url(&format!(
            "{}/{}/vote",
            Domain::CommunityPosts.path(),
            percent_encode(post_id.as_str())
        ));
        debug!(%url, %vote, "POST vote");
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "vote_type": vote }))
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }
}
