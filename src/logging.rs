//! Logging bootstrap.
//!
//! Quiet by default: the TUI owns the terminal, so normal runs log WARN and
//! above to stderr only. `--debug` adds daily-rotated file logs under
//! `~/.inkbook/logs/`, filtered by `RUST_LOG` when set.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    debug_mode: bool,
    log_dir: PathBuf,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            log_dir: crate::config::inkbook_home().join("logs"),
        }
    }

    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug_mode = debug;
        self
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns a guard that must be held for the lifetime of the process so the
/// non-blocking file writer flushes on exit.
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config.debug_mode {
            EnvFilter::new("inkbook=debug")
        } else {
            EnvFilter::new("inkbook=warn")
        }
    });

    if config.debug_mode {
        fs::create_dir_all(&config.log_dir)
            .with_context(|| format!("failed to create {}", config.log_dir.display()))?;
        let appender = tracing_appender::rolling::daily(&config.log_dir, "inkbook.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();

        tracing::debug!("Debug logging enabled, writing to {:?}", config.log_dir);
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        Ok(None)
    }
}

/// Remove log files older than `days`. Returns how many were removed.
pub fn cleanup_old_logs(days: u64) -> Result<usize> {
    let log_dir = crate::config::inkbook_home().join("logs");
    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    let mut removed = 0;

    for entry in fs::read_dir(&log_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = entry.metadata().and_then(|m| m.modified());
        if let Ok(modified) = modified
            && modified < cutoff
            && fs::remove_file(&path).is_ok()
        {
            removed += 1;
        }
    }

    Ok(removed)
}
