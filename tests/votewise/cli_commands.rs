//! CLI subcommands executed against the scripted service.

use std::sync::Arc;

use clap::Parser;
use votewise::args::{self, Args};
use votewise::i18n;
use votewise::session::{Session, SessionError};
use votewise::sources::CollectionService;

use crate::common::{ScriptedService, sample_posts};

async fn run_cli(
    service: &Arc<ScriptedService>,
    argv: &[&str],
) -> Result<String, SessionError> {
    let args = Args::try_parse_from(argv).expect("valid arguments");
    let mut session = Session::new(Arc::clone(service) as Arc<dyn CollectionService>);
    let key = args.language_key(&votewise::settings::Settings::default());
    args::run(&mut session, &args.command, &key).await
}

#[tokio::test]
/// What: A filtered listing issues exactly one list request with every filter applied.
///
/// Inputs:
/// - `votewise manifestos --party DMK --category Transport --lang tamil`
///
/// Output:
/// - Calls: constituencies, then `GET /manifestos?party=DMK&category=Transport`; Tamil heading.
async fn manifestos_command_fetches_once() {
    let svc = ScriptedService::new().with_list(
        "/manifestos?party=DMK&category=Transport",
        serde_json::json!([
            {"promise_id": "m1", "party": "DMK", "category": "Transport",
             "title": "Free bus travel", "description": "For women",
             "one_minute_explanation": "Free city buses", "fulfilled": null}
        ]),
    );
    let out = run_cli(
        &svc,
        &[
            "votewise",
            "manifestos",
            "--party",
            "DMK",
            "--category",
            "Transport",
            "--lang",
            "tamil",
        ],
    )
    .await
    .expect("runs");

    assert_eq!(
        svc.calls(),
        vec![
            "GET /constituencies",
            "GET /manifestos?party=DMK&category=Transport"
        ]
    );
    let ta = i18n::resolve("tamil").expect("tamil");
    assert!(out.contains(&ta.tabs.manifestos));
    assert!(out.contains(&ta.manifestos_tab.pending));
    assert!(out.contains("Free bus travel"));
}

#[tokio::test]
/// What: Listing posts by constituency renders counts and reply numbers.
async fn posts_command_renders_posts() {
    let svc = ScriptedService::new().with_posts(sample_posts());
    let out = run_cli(&svc, &["votewise", "posts", "--constituency", "Mylapore"])
        .await
        .expect("runs");

    assert!(out.contains("Flooding"));
    assert!(out.contains("Metro extension"));
    assert!(!out.contains("Parking"));
    assert!(out.contains("1 replies"));
}

#[tokio::test]
/// What: `vote` records the vote and prints the refreshed posts.
async fn vote_command_refreshes() {
    let svc = ScriptedService::new().with_posts(sample_posts());
    let out = run_cli(&svc, &["votewise", "vote", "p1", "up"])
        .await
        .expect("runs");

    assert!(out.starts_with("Upvote: p1"));
    assert!(out.contains("Upvote: 4"));
    assert_eq!(svc.upvotes("p1"), 4);
}

#[tokio::test]
/// What: Blank post fields fail validation and are described in the chosen language.
async fn post_command_validation_error() {
    let svc = ScriptedService::new();
    let err = run_cli(
        &svc,
        &[
            "votewise",
            "post",
            "--constituency",
            "Mylapore",
            "--title",
            "  ",
            "--content",
            "text",
        ],
    )
    .await
    .expect_err("blank title");

    let en = i18n::resolve("english").expect("english");
    assert!(args::describe_error(&en, &err).starts_with(&en.community_tab.fill_all_fields));
    assert_eq!(svc.count("POST"), 0);
}

#[tokio::test]
/// What: An unsupported language is rejected before any request.
async fn unsupported_language_rejected() {
    let svc = ScriptedService::new();
    let err = run_cli(&svc, &["votewise", "constituencies", "--lang", "hindi"])
        .await
        .expect_err("unsupported");

    assert!(matches!(err, SessionError::Locale(_)));
    assert!(svc.calls().is_empty());
}

#[tokio::test]
/// What: The constituency list is printed with districts.
async fn constituencies_command_lists_names() {
    let svc = ScriptedService::new().with_constituencies(&["Mylapore", "Chennai Central"]);
    let out = run_cli(&svc, &["votewise", "constituencies"])
        .await
        .expect("runs");
    assert!(out.contains("Mylapore (Chennai)"));
    assert!(out.contains("Chennai Central (Chennai)"));
}
