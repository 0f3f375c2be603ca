//! Session-level flows: language gate, filters, tab switches, stale data.

use std::sync::Arc;

use votewise::logic::{FilterChange, FilterField};
use votewise::session::{Session, SessionError};
use votewise::sources::{CollectionService, FetchError};
use votewise::state::{Domain, DomainItems, Verdict};
use votewise::sync::{FetchOutcome, SyncStatus};

use crate::common::{ScriptedService, sample_posts};

fn session(service: &Arc<ScriptedService>) -> Session {
    Session::new(Arc::clone(service) as Arc<dyn CollectionService>)
}

fn candidates_json() -> serde_json::Value {
    serde_json::json!([
        {"candidate_id": "c1", "name": "Arjun Kumar", "party": "DMK",
         "constituency": "Chennai Central", "age": 45, "education": "M.A.",
         "criminal_cases": 0, "assets": 2500000.0, "liabilities": 500000.0, "incumbent": true},
        {"candidate_id": "c2", "name": "Meena Sundaram", "party": "AIADMK",
         "constituency": "Chennai Central", "age": 52, "education": "B.Sc.",
         "criminal_cases": 1, "assets": 1800000.0, "liabilities": 0.0, "incumbent": false}
    ])
}

#[tokio::test]
/// What: The candidates constituency filter reaches the service percent-encoded.
///
/// Inputs:
/// - English selected, then constituency "Chennai Central" on the active candidates tab.
///
/// Output:
/// - Calls: constituencies, unfiltered candidates, then `?constituency=Chennai%20Central`.
async fn constituency_filter_is_encoded() {
    let svc = ScriptedService::new()
        .with_constituencies(&["Chennai Central", "Mylapore"])
        .with_list("/candidates?constituency=Chennai%20Central", candidates_json());
    let mut s = session(&svc);

    s.select_language("english").await.expect("english");
    s.set_filter(Domain::Candidates, FilterField::Constituency, "Chennai Central")
        .await
        .expect("filter");

    assert_eq!(
        svc.calls(),
        vec![
            "GET /constituencies",
            "GET /candidates",
            "GET /candidates?constituency=Chennai%20Central"
        ]
    );
    assert_eq!(s.view(Domain::Candidates).items.len(), 2);
    assert_eq!(s.parties(), vec!["DMK".to_string(), "AIADMK".to_string()]);

    s.set_filter(Domain::Candidates, FilterField::Constituency, "")
        .await
        .expect("clear");
    assert_eq!(svc.calls().last().map(String::as_str), Some("GET /candidates"));
}

#[tokio::test]
/// What: Typing a newer filter while an older request hangs shows only the newer result.
///
/// Inputs:
/// - Posts tab; request for Chennai Central held; filter switched to Mylapore; hold released.
///
/// Output:
/// - View holds the Mylapore posts only; status `Ready`.
async fn newer_filter_wins_over_slow_response() {
    let svc = ScriptedService::new().with_posts(sample_posts());
    let mut s = session(&svc);
    s.activate_tab(Domain::CommunityPosts).await.expect("tab");
    s.select_language("ta").await.expect("tamil");

    let hold = svc.hold("GET /community-posts?constituency=Chennai");
    let sync = Arc::clone(s.sync());
    let slow = tokio::spawn(async move {
        let q = votewise::logic::QueryDescriptor::new(
            Domain::CommunityPosts,
            [(FilterField::Constituency, "Chennai Central".to_string())],
        );
        sync.fetch(Domain::CommunityPosts, q).await
    });
    svc.wait_for("GET /community-posts?constituency=Chennai", 1).await;

    s.set_filter(Domain::CommunityPosts, FilterField::Constituency, "Mylapore")
        .await
        .expect("mylapore");
    hold.notify_one();
    assert_eq!(
        slow.await.expect("join").expect("slow resolves"),
        FetchOutcome::Superseded
    );

    let view = s.view(Domain::CommunityPosts);
    assert_eq!(view.status, SyncStatus::Ready);
    match view.items {
        DomainItems::CommunityPosts(posts) => {
            assert_eq!(posts.len(), 2);
            assert!(posts.iter().all(|p| p.constituency == "Mylapore"));
            assert_eq!(posts[0].id.as_str(), "p2");
            assert_eq!(posts[0].reply_count(), 1);
        }
        other => panic!("unexpected items: {other:?}"),
    }
}

#[tokio::test]
/// What: Fact-check filters combine server verdict and local toggle.
///
/// Inputs:
/// - Unfiltered list `[Unverified, True]`; toggle on; then verdict=false server filter.
///
/// Output:
/// - Toggle leaves only `True` without a request; verdict change requeries `?verdict=False`.
async fn fact_check_filters() {
    let svc = ScriptedService::new()
        .with_list(
            "/fact-checks",
            serde_json::json!([
                {"fact_id": "f1", "title": "Free laptops for all", "description": "Viral post",
                 "verdict": "Unverified", "tags": ["education"]},
                {"fact_id": "f2", "title": "Metro phase 2 funded", "description": "Budget 2026",
                 "verdict": "True", "tags": ["transport"], "source_url": "https://example.org"}
            ]),
        )
        .with_list(
            "/fact-checks?verdict=False",
            serde_json::json!([
                {"fact_id": "f3", "title": "Tax doubled", "description": "", "verdict": "False"}
            ]),
        );
    let mut s = session(&svc);
    s.select_language("english").await.expect("english");
    s.activate_tab(Domain::FactChecks).await.expect("tab");

    let change = s
        .set_filter(Domain::FactChecks, FilterField::ShowOnlyFactChecked, true)
        .await
        .expect("toggle");
    assert_eq!(change, FilterChange::LocalOnly);
    match s.view(Domain::FactChecks).items {
        DomainItems::FactChecks(list) => {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].verdict, Verdict::True);
        }
        other => panic!("unexpected items: {other:?}"),
    }

    s.set_filter(Domain::FactChecks, FilterField::Verdict, "false")
        .await
        .expect("verdict");
    assert_eq!(
        svc.calls().last().map(String::as_str),
        Some("GET /fact-checks?verdict=False")
    );
    assert_eq!(s.view(Domain::FactChecks).items.len(), 1);

    let err = s
        .set_filter(Domain::FactChecks, FilterField::Verdict, "maybe")
        .await
        .expect_err("unknown verdict");
    assert!(matches!(err, SessionError::Filter(_)));
}

#[tokio::test]
/// What: A failed refresh keeps the last good manifestos visible and retry recovers.
async fn failure_is_stale_then_retry_recovers() {
    let promises = serde_json::json!([
        {"promise_id": "m1", "party": "DMK", "category": "Transport", "title": "Free bus travel",
         "description": "For women", "one_minute_explanation": "Free city buses", "fulfilled": true}
    ]);
    let svc = ScriptedService::new().with_list("/manifestos", promises.clone());
    let mut s = session(&svc);
    s.select_language("english").await.expect("english");
    s.activate_tab(Domain::Manifestos).await.expect("tab");
    s.activate_tab(Domain::Candidates).await.expect("away");

    svc.fail("/manifestos", FetchError::network("connection reset"));
    let err = s
        .activate_tab(Domain::Manifestos)
        .await
        .expect_err("refresh fails");
    assert!(matches!(err, SessionError::Fetch(ref e) if e.retryable()));
    let view = s.view(Domain::Manifestos);
    assert!(view.stale);
    assert_eq!(view.items.len(), 1);
    assert_eq!(s.categories(), vec!["Transport".to_string()]);

    let svc = svc.with_list("/manifestos", promises);
    assert!(matches!(
        s.retry().await.expect("retry"),
        FetchOutcome::Applied(_)
    ));
    assert_eq!(s.view(Domain::Manifestos).status, SyncStatus::Ready);
    assert_eq!(svc.count("GET /manifestos"), 3);
}
