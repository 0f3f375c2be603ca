//! VoteWise binary entrypoint: settings, logging, then one CLI command.

use std::fmt;
use std::process::ExitCode;
use std::sync::{Arc, OnceLock};

use clap::Parser;

use votewise::args::{self, Args};
use votewise::i18n;
use votewise::session::Session;
use votewise::settings;
use votewise::sources::HttpCollectionService;

struct VoteWiseTimer;

impl tracing_subscriber::fmt::time::FormatTime for VoteWiseTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialise tracing to `<config>/logs/votewise.log`, or stderr when that fails.
///
/// Inputs:
/// - `level`: Default filter directive; `RUST_LOG` takes precedence
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let opened = settings::logs_dir()
        .map(|dir| dir.join("votewise.log"))
        .ok_or_else(|| "no config directory (HOME and XDG_CONFIG_HOME unset)".to_string())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map(|file| (path, file))
                .map_err(|e| e.to_string())
        });
    match opened {
        Ok((path, file)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(VoteWiseTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(VoteWiseTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let loaded = settings::load_settings();
    let mut settings = loaded.settings.clone();
    args.apply_to(&mut settings);
    init_logging(&args::determine_log_level(&args, &settings));
    loaded.log();

    let language_key = args.language_key(&settings);
    tracing::info!(
        api = %settings.api_base_url,
        language = %language_key,
        command = ?args.command,
        "VoteWise starting"
    );

    let service = match HttpCollectionService::new(&settings.api_base_url, settings.connect_timeout())
    {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Cannot create HTTP client");
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut session = Session::new(Arc::new(service));

    match args::run(&mut session, &args.command, &language_key).await {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            let bundle = i18n::resolve(&language_key)
                .or_else(|_| i18n::resolve_language(i18n::Language::English));
            match bundle {
                Ok(b) => eprintln!("{}", args::describe_error(&b, &e)),
                Err(_) => eprintln!("{e}"),
            }
            ExitCode::FAILURE
        }
    }
}
