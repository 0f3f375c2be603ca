//! Language keys and bundle resolution.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::i18n::bundle::StringBundle;
use crate::i18n::loader::load_bundle;

/// Supported interface languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// Primary language.
    English,
    /// Regional language.
    Tamil,
}

impl Language {
    /// Every supported language, primary first.
    pub const ALL: [Self; 2] = [Self::English, Self::Tamil];

    /// Canonical key, also the top-level key of the locale file.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Tamil => "tamil",
        }
    }

    /// What: Map a user-supplied language key to a `Language`.
    ///
    /// Inputs:
    /// - `key`: `english`/`en` or `tamil`/`ta`, case-insensitive, surrounding whitespace ignored
    ///
    /// Output:
    /// - The matching language
    ///
    /// # Errors
    /// - Returns `UnsupportedLanguageError` for any other key
    pub fn from_key(key: &str) -> Result<Self, UnsupportedLanguageError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "tamil" | "ta" => Ok(Self::Tamil),
            _ => Err(UnsupportedLanguageError {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// The requested language key is not one of the supported languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language '{key}' (expected one of: english, tamil)")]
pub struct UnsupportedLanguageError {
    /// Key as supplied by the caller.
    pub key: String,
}

/// Failure to produce a string bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The key is not a supported language.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedLanguageError),
    /// The embedded locale file could not be parsed.
    #[error("locale bundle for '{language}' is malformed: {message}")]
    Malformed {
        /// Language whose bundle failed.
        language: Language,
        /// Parser message.
        message: String,
    },
}

/// What: Resolve a language key to its full string bundle.
///
/// Inputs:
/// - `language_key`: Language key as accepted by [`Language::from_key`]
///
/// Output:
/// - Fully populated bundle for the language
///
/// # Errors
/// - `LocaleError::Unsupported` when the key is not a supported language
/// - `LocaleError::Malformed` when the embedded bundle fails to parse
///
/// Details:
/// - Pure: no state is read or written.
pub fn resolve(language_key: &str) -> Result<StringBundle, LocaleError> {
    let language = Language::from_key(language_key).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected language key");
    })?;
    resolve_language(language)
}

/// What: Resolve an already-validated language to its bundle.
///
/// # Errors
/// - `LocaleError::Malformed` when the embedded bundle fails to parse
pub fn resolve_language(language: Language) -> Result<StringBundle, LocaleError> {
    load_bundle(language).map_err(|message| LocaleError::Malformed { language, message })
}

/// Session slot holding the chosen language.
///
/// Starts `Unset` ("selection required") and lives only as long as the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguageSelection {
    /// The user has not picked a language yet.
    #[default]
    Unset,
    /// The user's choice.
    Selected(Language),
}

impl LanguageSelection {
    /// Chosen language, if any.
    #[must_use]
    pub const fn language(self) -> Option<Language> {
        match self {
            Self::Unset => None,
            Self::Selected(l) => Some(l),
        }
    }

    /// Whether a language has been picked.
    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Selected(_))
    }
}
