//! File-based log bootstrap.
//!
//! The TUI owns the terminal, so log records go to rotating files inside the
//! application data directory instead of stderr.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;

const LOG_FILE_BASENAME: &str = "book-collection";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const SUPPORTED_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Start the file logger. The returned handle must stay alive for the rest of
/// the process or buffered records are dropped.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let handle = Logger::try_with_str(&level)
        .with_context(|| format!("invalid log level `{level}`"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .duplicate_to_stderr(Duplicate::None)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(handle)
}

/// Lowercase a user-supplied level and reject anything `log` has no name for.
pub fn normalize_level(level: &str) -> Result<String> {
    let normalized = level.trim().to_ascii_lowercase();
    if SUPPORTED_LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(anyhow!(
            "unsupported log level `{level}`; expected one of {}",
            SUPPORTED_LOG_LEVELS.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_case_insensitive() {
        assert_eq!(normalize_level(" DEBUG ").unwrap(), "debug");
        assert_eq!(normalize_level("warn").unwrap(), "warn");
    }

    #[test]
    fn unknown_level_fails_before_touching_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        let err = init_logging("verbose", &log_dir).err().unwrap();

        assert!(err.to_string().contains("unsupported log level `verbose`"));
        assert!(!log_dir.exists());
    }
}
