//! Runtime configuration for roster front ends.
//!
//! # Responsibility
//! - Collect the database location and logging options in one value.
//! - Resolve relative database paths against a caller-supplied base.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

/// Default roster database file name.
pub const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// SQLite file holding the roster slot.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Returns `db_path`, joined onto `base` when it is relative.
    pub fn resolve_db_path(&self, base: &Path) -> PathBuf {
        if self.db_path.is_absolute() {
            self.db_path.clone()
        } else {
            base.join(&self.db_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RosterConfig, DEFAULT_DB_FILE_NAME};
    use std::path::{Path, PathBuf};

    #[test]
    fn default_points_at_local_db_file() {
        let config = RosterConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn relative_db_path_is_joined_onto_base() {
        let config = RosterConfig::default();
        let resolved = config.resolve_db_path(Path::new("/srv/roster"));
        assert_eq!(resolved, PathBuf::from("/srv/roster").join(DEFAULT_DB_FILE_NAME));
    }

    #[test]
    fn absolute_db_path_ignores_base() {
        let config = RosterConfig {
            db_path: PathBuf::from("/var/lib/roster/class.sqlite3"),
            ..RosterConfig::default()
        };
        assert_eq!(
            config.resolve_db_path(Path::new("/home/teacher")),
            PathBuf::from("/var/lib/roster/class.sqlite3")
        );
    }
}
