//! External editor sessions for note text

use crate::error::{NotepadError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Session for editing note text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Session using $EDITOR, then $VISUAL, then a platform default
    pub fn from_env() -> Self {
        let command = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        EditorSession::new(command)
    }

    /// Write `text` to a scratch file under `work_dir`, wait for the editor to
    /// exit, and return the edited text. The scratch file is always removed.
    pub fn edit(&self, work_dir: &Path, text: &str) -> Result<String> {
        let scratch = Self::scratch_path(work_dir);
        fs::write(&scratch, text)?;

        let result = self
            .run(&scratch)
            .and_then(|()| fs::read_to_string(&scratch).map_err(NotepadError::from));

        if let Err(e) = fs::remove_file(&scratch) {
            tracing::warn!("could not remove {}: {e}", scratch.display());
        }
        result
    }

    fn scratch_path(work_dir: &Path) -> PathBuf {
        work_dir.join(format!("edit-{}.txt", std::process::id()))
    }

    fn run(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command();
        args.push(file_path.to_string_lossy().to_string());

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&args).status();

        let status = status.map_err(|e| {
            NotepadError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(NotepadError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            return ("nano".to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}
