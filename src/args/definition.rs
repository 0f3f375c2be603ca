//! Command-line argument definition.

use clap::{Parser, Subcommand, ValueEnum};

use crate::settings::Settings;
use crate::state::VoteType;

/// VoteWise - candidates, manifestos, fact checks and community posts for Tamil Nadu elections
#[derive(Parser, Debug)]
#[command(name = "votewise")]
#[command(version)]
#[command(about = "Browse candidates, manifestos, fact checks and community posts", long_about = None)]
pub struct Args {
    /// Display language (english, tamil, en, ta)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// API root of the collection service (overrides settings and VOTEWISE_BACKEND_URL)
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// What to show or do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List constituencies
    Constituencies,
    /// Compare candidates
    Candidates {
        /// Only candidates standing in this constituency
        #[arg(long)]
        constituency: Option<String>,
        /// Case-insensitive text match on name or party
        #[arg(long)]
        search: Option<String>,
    },
    /// Browse manifesto promises
    Manifestos {
        /// Only this party's promises
        #[arg(long)]
        party: Option<String>,
        /// Only this policy category
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text match on title or description
        #[arg(long)]
        search: Option<String>,
    },
    /// Browse fact checks
    FactChecks {
        /// Only this verdict (true, false, misleading, unverified)
        #[arg(long)]
        verdict: Option<String>,
        /// Hide unverified claims
        #[arg(long)]
        only_checked: bool,
        /// Case-insensitive text match on title, description or tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Read community posts
    Posts {
        /// Only posts of this constituency
        #[arg(long)]
        constituency: Option<String>,
    },
    /// Create a community post
    Post {
        /// Constituency the post belongs to
        #[arg(long)]
        constituency: String,
        /// Headline
        #[arg(long)]
        title: String,
        /// Body text
        #[arg(long)]
        content: String,
    },
    /// Vote on a community post
    Vote {
        /// Post identifier
        post_id: String,
        /// Direction
        #[arg(value_enum)]
        direction: VoteDirection,
    },
}

/// Vote direction as typed on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    /// Upvote
    Up,
    /// Downvote
    Down,
}

impl From<VoteDirection> for VoteType {
    fn from(value: VoteDirection) -> Self {
        match value {
            VoteDirection::Up => Self::Upvote,
            VoteDirection::Down => Self::Downvote,
        }
    }
}

impl Args {
    /// What: Overlay command-line flags on loaded settings.
    ///
    /// Inputs:
    /// - `settings`: Settings from file and environment
    ///
    /// Details:
    /// - An unsupported `--lang` is kept out of `settings`; the session reports it on selection.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(api) = self.api.as_deref().filter(|a| !a.trim().is_empty()) {
            settings.api_base_url = api.trim().to_string();
        }
        if let Some(level) = &self.log_level {
            settings.log_level.clone_from(level);
        }
    }

    /// Language key to select: `--lang`, then the configured language, then English.
    #[must_use]
    pub fn language_key(&self, settings: &Settings) -> String {
        self.lang.clone().unwrap_or_else(|| {
            settings
                .language
                .unwrap_or(crate::i18n::Language::English)
                .key()
                .to_string()
        })
    }
}
