//! Document picker abstraction
//!
//! Import and export never touch paths chosen by themselves; they ask a
//! picker, which may also report that the user backed out.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of a picker interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picked<T> {
    Selected(T),
    Cancelled,
}

/// File selection surface used by import/export
pub trait DocumentPicker {
    /// Choose any number of existing files to read
    fn pick_files(&mut self) -> Picked<Vec<PathBuf>>;

    /// Choose a directory to write into
    fn pick_directory(&mut self) -> Picked<PathBuf>;

    /// Choose where to create a single file, starting from `suggested_name`
    fn create_file(&mut self, suggested_name: &str) -> Picked<PathBuf>;
}

/// Picker backed by paths given up front (command-line arguments).
///
/// No paths means the user cancelled.
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    paths: Vec<PathBuf>,
}

impl PathPicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        PathPicker { paths }
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }

    fn expand_dir(dir: &Path, files: &mut Vec<PathBuf>) {
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_hidden(entry.path()));

        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
}

impl DocumentPicker for PathPicker {
    fn pick_files(&mut self) -> Picked<Vec<PathBuf>> {
        if self.paths.is_empty() {
            return Picked::Cancelled;
        }

        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                Self::expand_dir(path, &mut files);
            } else {
                files.push(path.clone());
            }
        }
        Picked::Selected(files)
    }

    fn pick_directory(&mut self) -> Picked<PathBuf> {
        let Some(dir) = self.paths.first() else {
            return Picked::Cancelled;
        };

        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!("cannot use {} as export directory: {e}", dir.display());
            return Picked::Cancelled;
        }
        Picked::Selected(dir.clone())
    }

    fn create_file(&mut self, suggested_name: &str) -> Picked<PathBuf> {
        let Some(target) = self.paths.first() else {
            return Picked::Cancelled;
        };

        if target.is_dir() {
            Picked::Selected(target.join(suggested_name))
        } else {
            Picked::Selected(target.clone())
        }
    }
}
