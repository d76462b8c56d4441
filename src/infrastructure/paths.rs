//! Data directory resolution and layout

use crate::error::{NotepadError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "NOTEPAD_HOME";

/// Where the database, preferences and legacy files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
}

impl AppPaths {
    pub fn new(root: PathBuf) -> Self {
        AppPaths { root }
    }

    /// Resolve the data directory: explicit path, then NOTEPAD_HOME, then the
    /// platform data directory. The directory is created if missing.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let root = match explicit {
            Some(path) => path,
            None => match std::env::var_os(HOME_ENV) {
                Some(path) => PathBuf::from(path),
                None => directories::ProjectDirs::from("com", "farmerbb", "Notepad")
                    .map(|dirs| dirs.data_local_dir().to_path_buf())
                    .ok_or_else(|| NotepadError::DataDir(PathBuf::from("~")))?,
            },
        };

        fs::create_dir_all(&root).map_err(|e| {
            tracing::error!("cannot create {}: {e}", root.display());
            NotepadError::DataDir(root.clone())
        })?;

        Ok(AppPaths::new(root))
    }

    pub fn database(&self) -> PathBuf {
        self.root.join("notepad.db")
    }

    pub fn preferences(&self) -> PathBuf {
        self.root.join("settings.toml")
    }

    /// Directory holding notes written by the old flat-file layout
    pub fn legacy_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
