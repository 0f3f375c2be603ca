//! Shared utilities for argument processing.

use crate::settings::Settings;

/// What: Determine the log level from flags and settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
/// - `settings`: Settings with `--log-level` already applied
///
/// Output:
/// - Filter directive for the tracing subscriber
///
/// Details:
/// - `--verbose` wins over everything; `RUST_LOG` is honoured later by the subscriber.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args, settings: &Settings) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        settings.log_level.clone()
    }
}
