//! Plain-text rendering of session views with a string bundle.

use std::fmt::Write as _;

use crate::i18n::StringBundle;
use crate::session::DomainView;
use crate::state::{
    Candidate, CommunityPost, Constituency, DomainItems, FactCheck, ManifestoPromise,
};
use crate::sync::SyncStatus;

/// What: Render one tab's view.
///
/// Inputs:
/// - `bundle`: Strings of the selected language
/// - `view`: Locally filtered items and load state
///
/// Output:
/// - Heading, status notes, and one block per item
#[must_use]
pub fn render_view(bundle: &StringBundle, view: &DomainView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", bundle.tabs.label(view.domain));
    match &view.status {
        SyncStatus::Loading => {
            let _ = writeln!(out, "{}", bundle.common.loading);
        }
        SyncStatus::Failed(e) if view.stale => {
            let _ = writeln!(out, "({}: {e})", bundle.common.stale);
        }
        SyncStatus::Failed(e) => {
            let _ = writeln!(out, "{}: {e}", bundle.common.error);
            if e.retryable() {
                let _ = writeln!(out, "[{}]", bundle.common.retry);
            }
            return out;
        }
        SyncStatus::Idle | SyncStatus::Ready => {}
    }
    if view.items.is_empty() {
        let _ = writeln!(out, "{}", bundle.common.no_data);
        return out;
    }
    match &view.items {
        DomainItems::Candidates(list) => list.iter().for_each(|c| candidate(&mut out, bundle, c)),
        DomainItems::Manifestos(list) => list.iter().for_each(|p| promise(&mut out, bundle, p)),
        DomainItems::FactChecks(list) => list.iter().for_each(|f| fact_check(&mut out, bundle, f)),
        DomainItems::CommunityPosts(list) => list.iter().for_each(|p| post(&mut out, bundle, p)),
    }
    out
}

/// Render the constituency list, one `name (district)` per line.
#[must_use]
pub fn render_constituencies(bundle: &StringBundle, list: &[Constituency]) -> String {
    if list.is_empty() {
        return format!("{}\n", bundle.common.no_data);
    }
    let mut out = format!("== {} ==\n", bundle.candidates_tab.select_constituency);
    for c in list {
        let _ = writeln!(out, "{} ({})", c.name, c.district);
    }
    out
}

/// Whole rupees.
fn rupees(amount: f64) -> String {
    format!("₹{amount:.0}")
}

fn candidate(out: &mut String, b: &StringBundle, c: &Candidate) {
    let t = &b.candidates_tab;
    let incumbent = if c.incumbent {
        format!(" [{}]", t.incumbent)
    } else {
        String::new()
    };
    let _ = writeln!(out, "{} - {}{incumbent}", c.name, c.party);
    let _ = writeln!(
        out,
        "  {}: {} | {}: {} | {}: {}",
        t.age, c.age, t.education, c.education, t.criminal, c.criminal_cases
    );
    let _ = writeln!(
        out,
        "  {}: {} | {}: {}",
        t.assets,
        rupees(c.assets),
        t.liabilities,
        rupees(c.liabilities)
    );
}

fn promise(out: &mut String, b: &StringBundle, p: &ManifestoPromise) {
    let t = &b.manifestos_tab;
    let _ = writeln!(
        out,
        "[{}] {} ({}, {})",
        t.fulfillment_label(p.fulfilled),
        p.title,
        p.party,
        p.category
    );
    let _ = writeln!(out, "  {}", p.one_minute_explanation);
    if let Some(url) = &p.evidence_url {
        let _ = writeln!(out, "  {}: {url}", t.evidence);
    }
}

fn fact_check(out: &mut String, b: &StringBundle, f: &FactCheck) {
    let t = &b.fact_check_tab;
    let _ = writeln!(out, "[{}] {}", t.verdict_label(f.verdict), f.title);
    if !f.description.is_empty() {
        let _ = writeln!(out, "  {}", f.description);
    }
    if !f.tags.is_empty() {
        let _ = writeln!(out, "  {}: {}", t.tags, f.tags.join(", "));
    }
    if let Some(url) = &f.source_url {
        let _ = writeln!(out, "  {}: {url}", t.source);
    }
}

fn post(out: &mut String, b: &StringBundle, p: &CommunityPost) {
    let t = &b.community_tab;
    let author = if p.author_id.is_empty() {
        b.common.anonymous.as_str()
    } else {
        p.author_id.as_str()
    };
    let _ = writeln!(out, "{} [{}] {}", p.id, p.constituency, p.title);
    let _ = writeln!(out, "  {}", p.content);
    let _ = writeln!(
        out,
        "  {author} | {}: {} | {}: {} | {} {} | {}",
        t.upvote,
        p.upvotes,
        t.downvote,
        p.downvotes,
        p.reply_count(),
        t.replies,
        p.created_at.format("%Y-%m-%d %H:%M")
    );
}
