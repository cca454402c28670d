use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "maze-chase.log";

/// Sends all tracing output to a log file.
///
/// The game owns the screen, so nothing is logged to stdout or stderr. The
/// returned guard flushes the file writer and must live until exit.
pub fn init() -> io::Result<(WorkerGuard, PathBuf)> {
    let dir = log_dir();
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    let path = dir.join(LOG_FILE);
    tracing::info!("logging to {}", path.display());
    Ok((guard, path))
}

fn log_dir() -> PathBuf {
    if let Some(cache) = env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(cache).join("maze-chase").join("logs");
    }
    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".cache")
            .join("maze-chase")
            .join("logs");
    }
    env::temp_dir().join("maze-chase")
}
