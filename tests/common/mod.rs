#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// `notepad` binary with a clean environment and its data in `home`
pub fn notepad_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notepad").unwrap();
    cmd.env_remove("NOTEPAD_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env("NOTEPAD_HOME", home);
    cmd
}

/// Create a note through the CLI and return its id
pub fn create_note(home: &Path, text: &str) -> i64 {
    let output = notepad_cmd(home)
        .args(["new", "--text", text])
        .output()
        .unwrap();
    assert!(output.status.success(), "new failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    parse_id(&stdout).unwrap_or_else(|| panic!("no id in {:?}", stdout))
}

/// Pull `N` out of a `... (id N)` line
pub fn parse_id(stdout: &str) -> Option<i64> {
    let start = stdout.find("(id ")? + "(id ".len();
    let end = start + stdout[start..].find(')')?;
    stdout[start..end].parse().ok()
}
