//! Classified failures of remote collection calls.

use std::fmt;

use thiserror::Error;

/// Broad cause of a failed remote call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection, DNS or transport failure before a status was received.
    Network,
    /// The service answered with a non-2xx status.
    Status(u16),
    /// The body was not the expected JSON shape.
    Malformed,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network error"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Malformed => f.write_str("malformed response"),
        }
    }
}

/// A remote call failed. Carries enough for the caller to offer a retry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    /// Cause category.
    pub kind: FetchErrorKind,
    /// Human-readable detail.
    pub message: String,
}

impl FetchError {
    /// Transport-level failure.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Network,
            message: message.into(),
        }
    }

    /// Non-2xx response.
    #[must_use]
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Status(code),
            message: message.into(),
        }
    }

    /// Unparseable or wrongly shaped body.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Malformed,
            message: message.into(),
        }
    }

    /// What: Whether repeating the same request may succeed.
    ///
    /// Output:
    /// - `true` for network failures, 5xx, 408 and 429; `false` for other statuses and
    ///   malformed bodies
    ///
    /// Details:
    /// - Advisory only: nothing in this crate retries on its own.
    #[must_use]
    pub const fn retryable(&self) -> bool {
        match self.kind {
            FetchErrorKind::Network => true,
            FetchErrorKind::Status(code) => code >= 500 || code == 408 || code == 429,
            FetchErrorKind::Malformed => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::status(status.as_u16(), e.to_string())
        } else {
            Self::network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed(e.to_string())
    }
}
