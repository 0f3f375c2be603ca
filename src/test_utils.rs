//! Test utilities for common test setup.
//!
//! Provides a scriptable in-memory [`CollectionService`] and entity builders
//! shared by the sync, community and session tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::oneshot;

use crate::logic::QueryDescriptor;
use crate::sources::{CollectionService, FetchError, NewPost, PostAck};
use crate::state::{
    Candidate, CommunityPost, Constituency, DomainItems, FactCheck, Fulfillment, ManifestoPromise,
    PostId, Verdict, VoteType,
};

#[derive(Default)]
struct FakeState {
    constituencies: Vec<Constituency>,
    constituency_failures: VecDeque<FetchError>,
    lists: HashMap<String, Result<DomainItems, FetchError>>,
    list_gates: HashMap<String, VecDeque<oneshot::Receiver<()>>>,
    vote_gates: VecDeque<oneshot::Receiver<()>>,
    vote_failure: Option<FetchError>,
    post_failure: Option<FetchError>,
    ack_without_id: bool,
    calls: Vec<String>,
}

/// In-memory collection service.
///
/// List responses are keyed by `path_and_query` and read when the call
/// resolves, so a test can change server state while a request is gated.
/// Unknown queries answer with an empty list of the right domain.
#[derive(Default)]
pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    /// What: Shared handle to a fresh fake.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake service lock")
    }

    /// Answer `GET path_and_query` with `result`.
    pub fn set_list(&self, path_and_query: &str, result: Result<DomainItems, FetchError>) {
        self.lock()
            .lists
            .insert(path_and_query.to_string(), result);
    }

    /// Hold the next `GET path_and_query` until the returned sender fires.
    pub fn gate_list(&self, path_and_query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock()
            .list_gates
            .entry(path_and_query.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    /// Hold the next vote until the returned sender fires.
    pub fn gate_vote(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock().vote_gates.push_back(rx);
        tx
    }

    /// Set the constituency list.
    pub fn set_constituencies(&self, list: Vec<Constituency>) {
        self.lock().constituencies = list;
    }

    /// Fail the next constituency request.
    pub fn fail_constituencies_once(&self, err: FetchError) {
        self.lock().constituency_failures.push_back(err);
    }

    /// Fail every vote with `err` (or stop failing with `None`).
    pub fn fail_votes(&self, err: Option<FetchError>) {
        self.lock().vote_failure = err;
    }

    /// Fail every post creation with `err` (or stop failing with `None`).
    pub fn fail_posts(&self, err: Option<FetchError>) {
        self.lock().post_failure = err;
    }

    /// Acknowledge posts with `{message}` only, without an id.
    pub fn ack_posts_without_id(&self) {
        self.lock().ack_without_id = true;
    }

    /// Every call received so far, e.g. `GET /candidates` or `VOTE p-1 upvote`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// What: Wait until at least `n` calls have reached the fake.
    ///
    /// Details:
    /// - Panics after one second so a broken test fails instead of hanging.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while self.lock().calls.len() < n {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("expected calls never arrived");
    }
}

#[async_trait]
impl CollectionService for FakeService {
    async fn list_constituencies(&self) -> Result<Vec<Constituency>, FetchError> {
        let mut state = self.lock();
        state.calls.push("GET /constituencies".to_string());
        if let Some(err) = state.constituency_failures.pop_front() {
            return Err(err);
        }
        Ok(state.constituencies.clone())
    }

    async fn list(&self, query: &QueryDescriptor) -> Result<DomainItems, FetchError> {
        let key = query.path_and_query();
        let gate = {
            let mut state = self.lock();
            state.calls.push(format!("GET {key}"));
            state.list_gates.get_mut(&key).and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.lock()
            .lists
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(DomainItems::empty(query.domain())))
    }

    async fn create_post(&self, post: &NewPost) -> Result<PostAck, FetchError> {
        let mut state = self.lock();
        state.calls.push(format!(
            "POST {}|{}|{}",
            post.constituency, post.title, post.content
        ));
        if let Some(err) = state.post_failure.clone() {
            return Err(err);
        }
        Ok(PostAck {
            message: "Post created successfully".to_string(),
            post_id: (!state.ack_without_id).then(|| PostId::from("p-new")),
        })
    }

    async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), FetchError> {
        let gate = {
            let mut state = self.lock();
            state.calls.push(format!("VOTE {post_id} {vote}"));
            state.vote_gates.pop_front()
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.lock().vote_failure.clone().map_or(Ok(()), Err)
    }
}

/// Constituency with a derived id.
pub fn constituency(name: &str, district: &str) -> Constituency {
    Constituency {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        district: district.to_string(),
    }
}

/// Candidate with neutral defaults.
pub fn candidate(name: &str, party: &str, constituency: &str) -> Candidate {
    Candidate {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        party: party.to_string(),
        constituency: constituency.to_string(),
        age: 45,
        education: "B.A.".to_string(),
        criminal_cases: 0,
        assets: 1_000_000.0,
        liabilities: 0.0,
        incumbent: false,
        photo_url: None,
    }
}

/// Manifesto promise with unknown fulfilment.
pub fn promise(id: &str, party: &str, category: &str, title: &str) -> ManifestoPromise {
    ManifestoPromise {
        id: id.to_string(),
        party: party.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        description: format!("{title} in detail"),
        one_minute_explanation: format!("{title} in short"),
        fulfilled: Fulfillment::Unknown,
        evidence_url: None,
    }
}

/// Fact-check with the given verdict.
pub fn fact_check(id: &str, title: &str, verdict: Verdict) -> FactCheck {
    FactCheck {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        verdict,
        tags: Vec::new(),
        source_url: None,
        date_added: None,
        constituency: None,
    }
}

/// Community post with the given counts.
pub fn post(id: &str, constituency: &str, title: &str, upvotes: u64, downvotes: u64) -> CommunityPost {
    CommunityPost {
        id: PostId::from(id),
        constituency: constituency.to_string(),
        title: title.to_string(),
        content: format!("{title} body"),
        author_id: "anon".to_string(),
        created_at: NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp"),
        upvotes,
        downvotes,
        replies: Vec::new(),
    }
}
