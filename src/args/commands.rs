//! Execution of CLI subcommands through a [`Session`].

use crate::args::definition::Command;
use crate::args::render::{render_constituencies, render_view};
use crate::community::{PostError, VoteError};
use crate::i18n::{StringBundle, resolve_language};
use crate::logic::FilterField;
use crate::session::{Session, SessionError};
use crate::state::{Domain, PostId, VoteType};

/// Tab a command reads from.
const fn domain_of(command: &Command) -> Domain {
    match command {
        Command::Constituencies | Command::Candidates { .. } => Domain::Candidates,
        Command::Manifestos { .. } => Domain::Manifestos,
        Command::FactChecks { .. } => Domain::FactChecks,
        Command::Posts { .. } | Command::Post { .. } | Command::Vote { .. } => {
            Domain::CommunityPosts
        }
    }
}

/// What: Stage a command's filters and tab before the language is selected.
///
/// Details:
/// - Nothing is fetched yet, so selecting the language afterwards issues exactly one list
///   request with every filter applied.
async fn stage(session: &mut Session, command: &Command) -> Result<(), SessionError> {
    let domain = domain_of(command);
    let fields: Vec<(FilterField, Option<&String>)> = match command {
        Command::Candidates {
            constituency,
            search,
        } => vec![
            (FilterField::Constituency, constituency.as_ref()),
            (FilterField::Search, search.as_ref()),
        ],
        Command::Manifestos {
            party,
            category,
            search,
        } => vec![
            (FilterField::Party, party.as_ref()),
            (FilterField::Category, category.as_ref()),
            (FilterField::Search, search.as_ref()),
        ],
        Command::FactChecks {
            verdict, search, ..
        } => vec![
            (FilterField::Verdict, verdict.as_ref()),
            (FilterField::Search, search.as_ref()),
        ],
        Command::Posts { constituency } => vec![(FilterField::Constituency, constituency.as_ref())],
        Command::Post { constituency, .. } => vec![(FilterField::Constituency, Some(constituency))],
        Command::Constituencies | Command::Vote { .. } => Vec::new(),
    };
    for (field, value) in fields {
        if let Some(v) = value {
            session.set_filter(domain, field, v.as_str()).await?;
        }
    }
    if let Command::FactChecks { only_checked, .. } = command {
        session
            .set_filter(domain, FilterField::ShowOnlyFactChecked, *only_checked)
            .await?;
    }
    session.activate_tab(domain).await?;
    Ok(())
}

/// What: Run a subcommand and return the text to print.
///
/// Inputs:
/// - `session`: Fresh session (no language selected yet)
/// - `command`: Parsed subcommand
/// - `language_key`: Language to select
///
/// Output:
/// - Rendered output in the selected language
///
/// # Errors
/// - `SessionError` for an unsupported language, an invalid filter value, or a failed
///   write; list failures are rendered instead
pub async fn run(
    session: &mut Session,
    command: &Command,
    language_key: &str,
) -> Result<String, SessionError> {
    stage(session, command).await?;
    let language = session.select_language(language_key).await?;
    let bundle = resolve_language(language)?;

    match command {
        Command::Constituencies => Ok(session.constituencies().map_or_else(
            || format!("{}\n", bundle.common.error),
            |list| render_constituencies(&bundle, list),
        )),
        Command::Post { title, content, .. } => {
            let draft = session.draft_mut();
            draft.title.clone_from(title);
            draft.content.clone_from(content);
            let header = session
                .submit_post()
                .await?
                .map(|id| format!("{id}\n"))
                .unwrap_or_default();
            Ok(format!(
                "{header}{}",
                render_view(&bundle, &session.view(Domain::CommunityPosts))
            ))
        }
        Command::Vote { post_id, direction } => {
            let vote = VoteType::from(*direction);
            session.vote(&PostId(post_id.clone()), vote).await?;
            Ok(format!(
                "{}: {post_id}\n{}",
                bundle.community_tab.vote_label(vote),
                render_view(&bundle, &session.view(Domain::CommunityPosts))
            ))
        }
        _ => Ok(render_view(&bundle, &session.view(domain_of(command)))),
    }
}

/// What: User-facing text for a failed command.
///
/// Inputs:
/// - `bundle`: Strings of the selected language
/// - `e`: Failure returned by [`run`]
///
/// Output:
/// - Localised message followed by the technical detail
#[must_use]
pub fn describe_error(bundle: &StringBundle, e: &SessionError) -> String {
    let lead = match e {
        SessionError::Post(PostError::Validation(_)) => &bundle.community_tab.fill_all_fields,
        SessionError::Post(PostError::Remote(_)) => &bundle.community_tab.submit_failed,
        SessionError::Vote(VoteError::InFlight(_)) => &bundle.community_tab.vote_pending,
        SessionError::Vote(VoteError::Remote(_)) => &bundle.community_tab.vote_failed,
        SessionError::Fetch(_) | SessionError::Filter(_) | SessionError::Locale(_) => {
            &bundle.common.error
        }
    };
    format!("{lead} ({e})")
}
