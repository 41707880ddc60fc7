//! Configuration
//!
//! Where the database lives. Resolution order:
//! 1. An explicit directory (e.g. `--data-dir`)
//! 2. `LEETREPEAT_DATA_DIR`
//! 3. The platform data directory (`directories::ProjectDirs`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::storage::{Result, StorageError};

/// Overrides the data directory
pub const DATA_DIR_ENV: &str = "LEETREPEAT_DATA_DIR";

/// SQLCipher key, read only with the `encryption` feature
pub const ENCRYPTION_KEY_ENV: &str = "LEETREPEAT_ENCRYPTION_KEY";

/// Database file name inside the data directory
pub const DB_FILE_NAME: &str = "leetrepeat.db";

/// Resolved storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve from an explicit directory, the environment, or platform defaults
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let from_env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::resolve_with(explicit, from_env)
    }

    fn resolve_with(explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = explicit.or(from_env).filter(|d| !d.as_os_str().is_empty()) {
            return Ok(Self { data_dir: dir });
        }

        let proj_dirs = ProjectDirs::from("com", "leetrepeat", "core").ok_or_else(|| {
            StorageError::Init("Could not determine project directories".to_string())
        })?;
        Ok(Self {
            data_dir: proj_dirs.data_dir().to_path_buf(),
        })
    }

    /// Config rooted at `dir`
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Create the data directory, owner-only on Unix
    pub fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            let _ = std::fs::set_permissions(&self.data_dir, perms);
        }
        Ok(())
    }
}
