use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILE: &str = "plaints.log";

/// Filter used when `RUST_LOG` is unset: this crate and HTTP request traces.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("plaints={level},tower_http={level}")
}

/// Splits a log path into the directory and file-name prefix the daily
/// roller expects.
fn rolling_target(log_path: &Path) -> (&Path, &OsStr) {
    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let prefix = log_path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    (dir, prefix)
}

/// Installs the global subscriber: compact lines on stderr, plus one JSON
/// object per line in `log_file` (rotated daily) when given.
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(log_path) = log_file else {
        let _ = registry.try_init();
        return;
    };

    let (dir, prefix) = rolling_target(&log_path);
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("warning: cannot create log directory {}: {}", dir.display(), e);
    }

    let json_layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(dir, prefix))
        .with_ansi(false)
        .json();

    let _ = registry.with(json_layer).try_init();
}
