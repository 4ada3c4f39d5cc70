//! Diagnostic logging
//!
//! The terminal belongs to the UI, so logs go to a file:
//! `<data_local_dir>/textobj/logs/textobj-<pid>.log` unless `--log-file` says
//! otherwise.
//!
//! Filter priority: `TEXTOBJ_LOG` > `RUST_LOG` > `info`.

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Install the file subscriber. Returns the path being written.
pub fn init(config: LogConfig) -> Result<PathBuf> {
    let path = resolve_log_path(config.log_file_path);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    Registry::default()
        .with(create_filter())
        .with(file_layer)
        .try_init()
        .context("Logging already initialized")?;

    Ok(path)
}

/// Stdout logging for tests. Safe to call from every test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> PathBuf {
    let filename = format!("textobj-{}.log", std::process::id());

    match override_path {
        Some(path) if path.extension().is_some() => path,
        Some(dir) => dir.join(filename),
        None => dirs::data_local_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("textobj")
            .join("logs")
            .join(filename),
    }
}

fn create_filter() -> EnvFilter {
    if let Ok(filter) = env::var("TEXTOBJ_LOG") {
        return EnvFilter::new(filter);
    }
    if let Ok(filter) = env::var("RUST_LOG") {
        return EnvFilter::new(filter);
    }
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_file_is_used_as_is() {
        let path = resolve_log_path(Some(PathBuf::from("/tmp/x/run.log")));
        assert_eq!(path, PathBuf::from("/tmp/x/run.log"));
    }

    #[test]
    fn test_directory_gets_pid_file() {
        let path = resolve_log_path(Some(PathBuf::from("/tmp/logs")));
        assert_eq!(path.parent(), Some(Path::new("/tmp/logs")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("textobj-") && name.ends_with(".log"));
    }

    #[test]
    fn test_is_idempotent() {
        test();
        test();
        tracing::info!("logging twice is fine");
    }
}
