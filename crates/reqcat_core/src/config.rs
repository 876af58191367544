//! Runtime configuration for the requirements core.
//!
//! # Responsibility
//! - Bundle the file paths and logging settings a host process injects
//!   into the core (no global state, no singletons).
//!
//! # Invariants
//! - Construction never touches the filesystem; paths are created lazily
//!   by the components that use them.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_DB_PATH: &str = "REQCAT_DB_PATH";
const ENV_MIRROR_PATH: &str = "REQCAT_MIRROR_PATH";
const ENV_LOG_DIR: &str = "REQCAT_LOG_DIR";
const ENV_LOG_LEVEL: &str = "REQCAT_LOG_LEVEL";

/// Injected configuration for store, mirror and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file path.
    pub db_path: PathBuf,
    /// Xlsx mirror file path.
    pub mirror_path: PathBuf,
    /// Log directory; file logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
    /// Log level name (trace|debug|info|warn|error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/requirements.db"),
            mirror_path: PathBuf::from("data/requirements_data.xlsx"),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: env_path(ENV_DB_PATH).unwrap_or(defaults.db_path),
            mirror_path: env_path(ENV_MIRROR_PATH).unwrap_or(defaults.mirror_path),
            log_dir: env_path(ENV_LOG_DIR),
            log_level: std::env::var(ENV_LOG_LEVEL)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.log_level),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_data_directory() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("data/requirements.db"));
        assert_eq!(
            config.mirror_path,
            PathBuf::from("data/requirements_data.xlsx")
        );
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }
}
