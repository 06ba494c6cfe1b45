//! Runtime configuration: where the library lives and how chatty the log is.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-collection-manager";
/// JSON file name stored inside the application data directory.
pub const DATA_FILE_NAME: &str = "books_data.json";
/// Log folder name inside the application data directory.
const LOG_DIR_NAME: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DATA_FILE_ENV: &str = "BOOK_COLLECTION_FILE";
pub const LOG_DIR_ENV: &str = "BOOK_COLLECTION_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "BOOK_COLLECTION_LOG";

/// Resolved settings handed to `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    /// Level as supplied. Validated when the logger starts so a typo only
    /// costs the log, never the library.
    pub log_level: String,
}

/// Values that win over the home-directory defaults. Empty or
/// whitespace-only values count as unset.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<OsString>,
    pub log_dir: Option<OsString>,
    pub log_level: Option<OsString>,
}

impl ConfigOverrides {
    /// Collect overrides from the process: the first CLI argument names the
    /// storage file, falling back to the environment. Paths are kept as raw OS
    /// strings so non-UTF-8 names survive.
    pub fn from_process() -> Self {
        let data_file = env::args_os()
            .nth(1)
            .or_else(|| env::var_os(DATA_FILE_ENV));
        Self {
            data_file,
            log_dir: env::var_os(LOG_DIR_ENV),
            log_level: env::var_os(LOG_LEVEL_ENV),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration for the current user and process.
    pub fn from_env() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::resolve(
            base_dirs.home_dir(),
            ConfigOverrides::from_process(),
        ))
    }

    /// Combine a home directory with explicit overrides.
    pub fn resolve(home: &Path, overrides: ConfigOverrides) -> Self {
        let data_dir = home.join(DATA_DIR_NAME);

        let data_file = non_blank(overrides.data_file)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DATA_FILE_NAME));
        let log_dir = non_blank(overrides.log_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));
        let log_level = non_blank(overrides.log_level)
            .map(|level| level.to_string_lossy().trim().to_string())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            data_file,
            log_dir,
            log_level,
        }
    }
}

/// Drop empty values. A value is only inspected for whitespace when it is
/// valid UTF-8; anything else is a real path and kept byte-for-byte.
fn non_blank(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| match v.to_str() {
        Some(text) => !text.trim().is_empty(),
        None => !v.is_empty(),
    })
}
