//! Locale file parsing.
//!
//! Locale files live in `config/locales/{language}.yml` and are compiled into
//! the binary, so loading never touches the filesystem.

use std::collections::HashMap;

use crate::i18n::Language;
use crate::i18n::bundle::StringBundle;

/// English locale file contents.
const ENGLISH_YML: &str = include_str!("../../config/locales/english.yml");
/// Tamil locale file contents.
const TAMIL_YML: &str = include_str!("../../config/locales/tamil.yml");

/// What: Raw YAML source embedded for a language.
///
/// Inputs:
/// - `language`: Supported language
///
/// Output:
/// - Static YAML text
#[must_use]
pub const fn locale_source(language: Language) -> &'static str {
    match language {
        Language::English => ENGLISH_YML,
        Language::Tamil => TAMIL_YML,
    }
}

/// What: Parse a locale YAML document into a `StringBundle`.
///
/// Inputs:
/// - `language`: Language whose top-level key is expected
/// - `yaml_content`: YAML file content as string
///
/// Output:
/// - `Ok(StringBundle)` when the document has the expected top-level key and every field
///
/// # Errors
/// - Returns `Err` when the content is empty or not valid YAML
/// - Returns `Err` when the top-level key does not match `language`
/// - Returns `Err` when any bundle field is missing or unknown
///
/// Details:
/// - Expects exactly one top-level key matching the language (e.g. `tamil:`)
pub fn parse_locale_yaml(language: Language, yaml_content: &str) -> Result<StringBundle, String> {
    if yaml_content.trim().is_empty() {
        return Err(format!("Locale file for '{language}' is empty"));
    }

    let mut doc: HashMap<String, StringBundle> = serde_norway::from_str(yaml_content)
        .map_err(|e| format!("Failed to parse locale '{language}': {e}"))?;

    if doc.len() != 1 {
        return Err(format!(
            "Locale '{language}' must have exactly one top-level key, found {}",
            doc.len()
        ));
    }

    doc.remove(language.key()).ok_or_else(|| {
        format!(
            "Locale file for '{language}' has top-level key {:?}",
            doc.keys().collect::<Vec<_>>()
        )
    })
}

/// What: Load the embedded bundle for a language.
///
/// Inputs:
/// - `language`: Supported language
///
/// Output:
/// - Parsed bundle
///
/// # Errors
/// - Returns `Err` if the embedded locale file is malformed
pub fn load_bundle(language: Language) -> Result<StringBundle, String> {
    let bundle = parse_locale_yaml(language, locale_source(language))?;
    tracing::debug!(language = %language, "Loaded string bundle");
    Ok(bundle)
}
