//! Internationalization (i18n) for VoteWise.
//!
//! # Overview
//!
//! Two languages are supported: English (primary) and Tamil (regional).
//! - **Resolution**: [`resolve`] maps a language key to a fully populated [`StringBundle`]
//!   or fails with [`UnsupportedLanguageError`]
//! - **Loading**: locale files in `config/locales/{language}.yml` are embedded at compile
//!   time and parsed with `serde_norway`
//! - **Lookup**: labels for verdicts, fulfilment, tabs and votes are `match` mappings on
//!   the domain enums, never string indexing
//!
//! # Locale Files
//!
//! Each file has a single top-level key naming the language:
//!
//! ```yaml
//! tamil:
//!   tabs:
//!     candidates: "வேட்பாளர்கள்"
//! ```
//!
//! # Usage
//!
//! ```rust
//! use votewise::i18n;
//! use votewise::state::Verdict;
//!
//! let bundle = i18n::resolve("tamil").expect("tamil is supported");
//! let label = bundle.fact_check_tab.verdict_label(Verdict::Misleading);
//! assert!(!label.is_empty());
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create `config/locales/{language}.yml` with every key of `english.yml`
//! 2. Add a variant to [`Language`] and wire it in `Language::from_key` and `loader::locale_source`

mod bundle;
mod loader;
mod resolver;

pub use bundle::{
    CandidatesTab, CommonStrings, CommunityTab, FactCheckTab, LanguageSelectionStrings,
    ManifestosTab, StringBundle, TabStrings,
};
pub use loader::{load_bundle, parse_locale_yaml};
pub use resolver::{
    Language, LanguageSelection, LocaleError, UnsupportedLanguageError, resolve, resolve_language,
};
