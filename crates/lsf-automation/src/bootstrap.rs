use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of every log file name.
const LOG_FILE_PREFIX: &str = "lsf_automation";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Create `log_dir` (and missing parents) if it does not exist yet.
pub fn ensure_log_dir(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))
}

/// `<log_dir>/lsf_automation_<YYYYMMDD_HHMMSS>.log` for the given start time.
pub fn log_file_path(log_dir: &Path, started: DateTime<Local>) -> PathBuf {
    log_dir.join(format!(
        "{LOG_FILE_PREFIX}_{}.log",
        started.format("%Y%m%d_%H%M%S")
    ))
}

// ── Environment bootstrap ─────────────────────────────────────────────────────

/// Load `KEY=value` pairs from a `.env` file into the process environment.
///
/// With `None` the file is searched in the working directory and its
/// ancestors. Variables that are already set keep their value. Returns the
/// file that was loaded, or `None` when there was none to load.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|()| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map `WARNING`/`CRITICAL` style level names onto `tracing` filter directives.
///
/// Unknown names are passed through lowercased and validated by
/// [`EnvFilter`] later.
pub fn normalize_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" | "FATAL" => "error".to_string(),
        "NOTSET" => "trace".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Every event goes to stderr and, without ANSI colours, to `log_file`.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(normalize_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    let console = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);
    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
