//! Integration tests for creating, showing, editing and deleting notes

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{create_note, notepad_cmd};

#[test]
fn test_list_no_notes() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));

    assert!(home.path().join("notepad.db").exists());
}

#[test]
fn test_new_then_show() {
    let home = TempDir::new().unwrap();
    let id = create_note(home.path(), "Shopping\nmilk\neggs");

    notepad_cmd(home.path())
        .args(["show", &id.to_string()])
        .assert()
        .success()
        .stdout("Shopping\nmilk\neggs\n");

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping"))
        .stdout(predicate::str::contains("milk").not());
}

#[test]
fn test_new_empty_note_is_refused() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["new", "--text", ""])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("empty"));

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_show_missing_note() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["show", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Note not found: 42"))
        .stderr(predicate::str::contains("notepad list"));
}

#[test]
fn test_list_newest_first() {
    let home = TempDir::new().unwrap();
    create_note(home.path(), "older");
    create_note(home.path(), "newer");

    let output = notepad_cmd(home.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("newer"));
    assert!(lines[1].ends_with("older"));
}

#[test]
fn test_list_sort_override() {
    let home = TempDir::new().unwrap();
    create_note(home.path(), "banana");
    create_note(home.path(), "Apple");

    let output = notepad_cmd(home.path())
        .args(["list", "--sort", "name"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(lines[0].ends_with("Apple"));
    assert!(lines[1].ends_with("banana"));

    notepad_cmd(home.path())
        .args(["list", "--sort", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid preference"));
}

#[test]
fn test_list_search_ignores_case() {
    let home = TempDir::new().unwrap();
    create_note(home.path(), "Groceries\nOat MILK");
    create_note(home.path(), "Milestones");
    create_note(home.path(), "Recipes\nmilkshake");

    let output = notepad_cmd(home.path())
        .args(["list", "--search", "mIlK"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("Groceries"));
    assert!(stdout.contains("Recipes"));

    notepad_cmd(home.path())
        .args(["list", "--search", "nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_edit_replaces_text_and_title() {
    let home = TempDir::new().unwrap();
    let id = create_note(home.path(), "Draft title\nbody");

    notepad_cmd(home.path())
        .args(["edit", &id.to_string(), "--text", "Final title\nbody"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Note saved (id {})", id)));

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("Final title"))
        .stdout(predicate::str::contains("Draft title").not());
}

#[test]
fn test_draft_then_discard() {
    let home = TempDir::new().unwrap();
    let id = create_note(home.path(), "kept");
    let id_arg = id.to_string();

    notepad_cmd(home.path())
        .args(["edit", &id_arg, "--text", "work in progress", "--draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft saved"));

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("[draft]"));
    notepad_cmd(home.path())
        .args(["show", &id_arg])
        .assert()
        .stdout("work in progress\n");
    notepad_cmd(home.path())
        .args(["show", &id_arg, "--saved"])
        .assert()
        .stdout("kept\n");

    notepad_cmd(home.path())
        .args(["discard-draft", &id_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft discarded"));

    notepad_cmd(home.path())
        .args(["show", &id_arg])
        .assert()
        .stdout("kept\n");
}

#[test]
fn test_resume_saves_draft() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .arg("resume")
        .assert()
        .success()
        .stdout(predicate::str::contains("No draft to resume"));

    let id = create_note(home.path(), "base");
    notepad_cmd(home.path())
        .args(["edit", &id.to_string(), "--text", "base\nmore", "--draft"])
        .assert()
        .success();

    notepad_cmd(home.path())
        .args(["resume", "--text", "base\nmore\nfinished"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Draft restored (id {})", id)))
        .stdout(predicate::str::contains(format!("Note saved (id {})", id)));

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("[draft]").not());
}

#[cfg(unix)]
#[test]
fn test_new_with_editor_that_writes_nothing() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .env("EDITOR", "true")
        .arg("new")
        .assert()
        .code(4);
}

#[cfg(unix)]
#[test]
fn test_edit_with_editor_keeps_text() {
    let home = TempDir::new().unwrap();
    let id = create_note(home.path(), "untouched");

    notepad_cmd(home.path())
        .env("EDITOR", "true")
        .args(["edit", &id.to_string()])
        .assert()
        .success();

    notepad_cmd(home.path())
        .args(["show", &id.to_string()])
        .assert()
        .stdout("untouched\n");
}

#[test]
fn test_delete_single_and_many() {
    let home = TempDir::new().unwrap();
    let a = create_note(home.path(), "a");
    let b = create_note(home.path(), "b");
    let c = create_note(home.path(), "c");

    notepad_cmd(home.path())
        .args(["delete", &a.to_string()])
        .assert()
        .success()
        .stdout("Note deleted\n");

    notepad_cmd(home.path())
        .args(["delete", &b.to_string(), &c.to_string()])
        .assert()
        .success()
        .stdout("2 notes deleted\n");

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No notes found"));
}

#[test]
fn test_delete_unknown_deletes_nothing() {
    let home = TempDir::new().unwrap();
    let a = create_note(home.path(), "survivor");

    notepad_cmd(home.path())
        .args(["delete", &a.to_string(), "999"])
        .assert()
        .code(3);

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("survivor"));
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let home = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["--data-dir"])
        .arg(other.path())
        .args(["new", "--text", "elsewhere"])
        .assert()
        .success();

    assert!(other.path().join("notepad.db").exists());
    assert!(!home.path().join("notepad.db").exists());
}

#[test]
fn test_no_command_shows_hint() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}
