//! In-memory collection service shared by the integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use votewise::logic::QueryDescriptor;
use votewise::sources::{CollectionService, FetchError, NewPost, PostAck};
use votewise::state::{CommunityPost, Constituency, DomainItems, PostId, VoteType};

/// Server-side model: lists keyed by `path_and_query`, posts with live counters.
#[derive(Default)]
struct World {
    lists: HashMap<String, Result<DomainItems, FetchError>>,
    posts: Vec<CommunityPost>,
    constituencies: Vec<Constituency>,
    calls: Vec<String>,
    hold: HashMap<String, Arc<Notify>>,
    next_post: u32,
}

/// Collection service whose posts respond to votes like the real one.
///
/// `GET /community-posts[?constituency=X]` is served from the live post list,
/// so a refetch after a vote observes the new counters.
#[derive(Default)]
pub struct ScriptedService {
    world: Mutex<World>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn world(&self) -> std::sync::MutexGuard<'_, World> {
        self.world.lock().expect("world lock")
    }

    pub fn with_constituencies(self: Arc<Self>, names: &[&str]) -> Arc<Self> {
        self.world().constituencies = names
            .iter()
            .map(|n| Constituency {
                id: n.to_lowercase(),
                name: (*n).to_string(),
                district: "Chennai".to_string(),
            })
            .collect();
        self
    }

    pub fn with_list(self: Arc<Self>, path: &str, body: serde_json::Value) -> Arc<Self> {
        let items = match domain_of(path) {
            votewise::state::Domain::Candidates => {
                DomainItems::Candidates(serde_json::from_value(body).expect("candidates json"))
            }
            votewise::state::Domain::Manifestos => {
                DomainItems::Manifestos(serde_json::from_value(body).expect("manifestos json"))
            }
            votewise::state::Domain::FactChecks => {
                DomainItems::FactChecks(serde_json::from_value(body).expect("fact-checks json"))
            }
            votewise::state::Domain::CommunityPosts => {
                DomainItems::CommunityPosts(serde_json::from_value(body).expect("posts json"))
            }
        };
        self.world().lists.insert(path.to_string(), Ok(items));
        self
    }

    pub fn with_posts(self: Arc<Self>, body: serde_json::Value) -> Arc<Self> {
        self.world().posts = serde_json::from_value(body).expect("posts json");
        self
    }

    pub fn fail(&self, path: &str, err: FetchError) {
        self.world().lists.insert(path.to_string(), Err(err));
    }

    /// Hold calls whose label starts with `prefix` until the returned handle is notified.
    pub fn hold(&self, prefix: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.world()
            .hold
            .insert(prefix.to_string(), Arc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<String> {
        self.world().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.world()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn upvotes(&self, id: &str) -> u64 {
        self.world()
            .posts
            .iter()
            .find(|p| p.id.as_str() == id)
            .map_or(0, |p| p.upvotes)
    }

    pub async fn wait_for(&self, prefix: &str, n: usize) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while self.count(prefix) < n {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("calls never arrived");
    }

    /// Record a call and return the hold handle matching it, if any.
    fn enter(&self, label: String) -> Option<Arc<Notify>> {
        let mut world = self.world();
        let held = world
            .hold
            .iter()
            .find(|(prefix, _)| label.starts_with(prefix.as_str()))
            .map(|(_, n)| Arc::clone(n));
        world.calls.push(label);
        held
    }
}

fn domain_of(path: &str) -> votewise::state::Domain {
    votewise::state::Domain::ALL
        .into_iter()
        .find(|d| path.trim_start_matches('/').starts_with(d.path().trim_start_matches('/')))
        .expect("known collection path")
}

#[async_trait]
impl CollectionService for ScriptedService {
    async fn list_constituencies(&self) -> Result<Vec<Constituency>, FetchError> {
        self.enter("GET /constituencies".to_string());
        Ok(self.world().constituencies.clone())
    }

    async fn list(&self, query: &QueryDescriptor) -> Result<DomainItems, FetchError> {
        let key = query.path_and_query();
        if let Some(n) = self.enter(format!("GET {key}")) {
            n.notified().await;
        }
        let world = self.world();
        if let Some(r) = world.lists.get(&key) {
            return r.clone();
        }
        if query.domain() == votewise::state::Domain::CommunityPosts {
            let wanted = query.get(votewise::logic::FilterField::Constituency);
            let mut posts: Vec<_> = world
                .posts
                .iter()
                .filter(|p| wanted.is_none_or(|c| p.constituency == c))
                .cloned()
                .collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            return Ok(DomainItems::CommunityPosts(posts));
        }
        Ok(DomainItems::empty(query.domain()))
    }

    async fn create_post(&self, post: &NewPost) -> Result<PostAck, FetchError> {
        self.enter(format!("POST {}", post.title));
        let mut world = self.world();
        world.next_post += 1;
        let id = PostId(format!("new-{}", world.next_post));
        world.posts.push(CommunityPost {
            id: id.clone(),
            constituency: post.constituency.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: "anon-1".to_string(),
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 12, 31)
                .and_then(|d| d.and_hms_opt(23, 59, 0))
                .expect("timestamp"),
            upvotes: 0,
            downvotes: 0,
            replies: Vec::new(),
        });
        Ok(PostAck {
            message: "Post created successfully".to_string(),
            post_id: Some(id),
        })
    }

    async fn vote(&self, post_id: &PostId, vote: VoteType) -> Result<(), FetchError> {
        if let Some(n) = self.enter(format!("VOTE {post_id} {vote}")) {
            n.notified().await;
        }
        let mut world = self.world();
        let post = world
            .posts
            .iter_mut()
            .find(|p| &p.id == post_id)
            .ok_or_else(|| FetchError::status(404, "Post not found"))?;
        match vote {
            VoteType::Upvote => post.upvotes += 1,
            VoteType::Downvote => post.downvotes += 1,
        }
        Ok(())
    }
}

/// Two posts in Mylapore and one in Chennai Central, as the service returns them.
pub fn sample_posts() -> serde_json::Value {
    serde_json::json!([
        {"post_id": "p1", "constituency": "Mylapore", "title": "Metro extension",
         "content": "When will phase 2 reach us?", "author_id": "anon-a",
         "created_at": "2026-02-01T10:00:00", "upvotes": 3, "downvotes": 0, "replies": []},
        {"post_id": "p2", "constituency": "Mylapore", "title": "Flooding",
         "content": "Storm drains again", "author_id": "anon-b",
         "created_at": "2026-02-02T10:00:00", "upvotes": 1, "downvotes": 2,
         "replies": [{"author_id": "anon-c", "content": "Same here"}]},
        {"post_id": "p3", "constituency": "Chennai Central", "title": "Parking",
         "content": "No space near the station", "author_id": "anon-d",
         "created_at": "2026-01-15T08:30:00", "upvotes": 0, "downvotes": 0, "replies": []}
    ])
}
