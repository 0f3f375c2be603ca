//! Canonical query descriptors sent to the collection service.

use std::fmt;

use crate::logic::filter::FilterField;
use crate::state::Domain;
use crate::util::percent_encode;

/// Serialization-ready description of a domain's active server-side filters.
///
/// Two descriptors are equal exactly when they would produce the same request,
/// which is what the sync layer uses as query identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    domain: Domain,
    params: Vec<(FilterField, String)>,
}

impl QueryDescriptor {
    /// What: Build a descriptor with no filters for a domain.
    ///
    /// Inputs:
    /// - `domain`: Target domain
    ///
    /// Output:
    /// - Descriptor that lists the whole collection
    #[must_use]
    pub const fn unfiltered(domain: Domain) -> Self {
        Self {
            domain,
            params: Vec::new(),
        }
    }

    /// What: Build a descriptor from `(field, value)` pairs.
    ///
    /// Inputs:
    /// - `domain`: Target domain
    /// - `params`: Server-side filters in emission order
    ///
    /// Output:
    /// - Descriptor; pairs whose value is blank or whose field has no query name are dropped
    #[must_use]
    pub fn new(domain: Domain, params: impl IntoIterator<Item = (FilterField, String)>) -> Self {
        let params = params
            .into_iter()
            .filter(|(field, value)| field.param_name().is_some() && !value.trim().is_empty())
            .collect();
        Self { domain, params }
    }

    /// Domain this query targets.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Value of one parameter, if present.
    #[must_use]
    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.params
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters as `(name, value)` pairs in emission order.
    pub fn params(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params
            .iter()
            .filter_map(|(f, v)| f.param_name().map(|name| (name, v.as_str())))
    }

    /// Whether no server-side filter is active.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.params.is_empty()
    }

    /// What: Render the percent-encoded query string.
    ///
    /// Output:
    /// - `""` when unfiltered, otherwise `?name=value&...`
    ///
    /// Details:
    /// - Values are encoded with `percent_encode` (space becomes `%20`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let joined = self
            .params()
            .map(|(name, value)| format!("{name}={}", percent_encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        if joined.is_empty() {
            joined
        } else {
            format!("?{joined}")
        }
    }

    /// Collection path plus query string, e.g. `/candidates?constituency=X`.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.domain.path(), self.to_query_string())
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_and_query())
    }
}
