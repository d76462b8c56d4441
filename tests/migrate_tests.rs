//! Integration tests for migrating the old flat-file layout

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::notepad_cmd;

fn legacy_home() -> TempDir {
    let home = TempDir::new().unwrap();
    let legacy = home.path().join("files");
    fs::create_dir_all(&legacy).unwrap();
    fs::write(legacy.join("1625000000000"), "Groceries\nmilk").unwrap();
    fs::write(legacy.join("1626000000000"), "Ideas\nmore").unwrap();
    fs::write(legacy.join("notes.bak"), "not a note").unwrap();
    home
}

#[test]
fn test_migrate_moves_legacy_notes() {
    let home = legacy_home();

    notepad_cmd(home.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 2 notes from the old format"));

    let legacy = home.path().join("files");
    assert!(!legacy.join("1625000000000").exists());
    assert!(legacy.join("notes.bak").exists());
    assert!(legacy.join("migration_complete").exists());

    notepad_cmd(home.path())
        .args(["list", "--sort", "date-reversed"])
        .assert()
        .stdout(predicate::str::is_match("(?s)Groceries.*Ideas").unwrap());
}

#[test]
fn test_migrate_twice() {
    let home = legacy_home();

    notepad_cmd(home.path()).arg("migrate").assert().success();
    notepad_cmd(home.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migration already complete"));

    let output = notepad_cmd(home.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_any_command_migrates_first() {
    let home = legacy_home();

    notepad_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("Migrated 2 notes"))
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn test_migrate_legacy_theme() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("settings.toml"),
        "theme = \"dark-monospace\"\n",
    )
    .unwrap();

    notepad_cmd(home.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preferences migrated"));

    notepad_cmd(home.path())
        .args(["config", "color_scheme"])
        .assert()
        .stdout("dark\n");
    notepad_cmd(home.path())
        .args(["config", "font_type"])
        .assert()
        .stdout("monospace\n");

    let settings = fs::read_to_string(home.path().join("settings.toml")).unwrap();
    assert!(!settings.contains("theme ="));
}

#[test]
fn test_migrate_without_legacy_data() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 0 notes"));
}
