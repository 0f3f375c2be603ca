//! Selector option lists derived from cached result sets.

use crate::state::{Candidate, ManifestoPromise};

/// Push `value` unless an entry with the same case-insensitive text is present.
fn push_unique(out: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() || out.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        return;
    }
    out.push(value.to_string());
}

/// What: Distinct party names for the party selector.
///
/// Inputs:
/// - `candidates`: Cached candidate list
///
/// Output:
/// - Party names in first-seen order, de-duplicated case-insensitively
#[must_use]
pub fn distinct_parties(candidates: &[Candidate]) -> Vec<String> {
    let mut out = Vec::new();
    for c in candidates {
        push_unique(&mut out, &c.party);
    }
    out
}

/// What: Distinct manifesto categories for the category selector.
///
/// Inputs:
/// - `promises`: Cached manifesto promises
///
/// Output:
/// - Category names in first-seen order, de-duplicated case-insensitively
#[must_use]
pub fn distinct_categories(promises: &[ManifestoPromise]) -> Vec<String> {
    let mut out = Vec::new();
    for p in promises {
        push_unique(&mut out, &p.category);
    }
    out
}
