//! Diagnostic logging for the client.
//!
//! Both front ends write to the terminal (the TUI redraws the whole screen,
//! `ask` prints the answer), so log lines never go there. They go to a file,
//! and only when one is requested through [`LOG_ENV`].

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV: &str = "GASTROASSIST_LOG";

/// Start logging request and UI events if `GASTROASSIST_LOG` is set.
///
/// Each run writes its own file, `<path>.<unix secs>.<pid>`, so an `ask`
/// started while the TUI is open does not truncate the TUI's log. `RUST_LOG`
/// picks the levels; without it request starts and outcomes (`info`) are
/// kept and per-completion detail (`debug`) is not.
pub fn init_tracing() {
    let Some(base) = log_base_from_env() else {
        return;
    };
    let path = unique_log_path(&base);

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot write log file {}: {}", path.display(), err);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    // Tests may install a subscriber first; that one stays.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn log_base_from_env() -> Option<PathBuf> {
    std::env::var_os(LOG_ENV)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

fn unique_log_path(base: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.{}", secs, std::process::id()));
    PathBuf::from(name)
}
