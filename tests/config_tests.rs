//! Integration tests for the config command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{create_note, notepad_cmd};

#[test]
fn test_config_list_defaults() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort_by = date"))
        .stdout(predicate::str::contains("export_filename = text-only"))
        .stdout(predicate::str::contains("font_size = normal"));
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["config", "sort_by", "name"])
        .assert()
        .success()
        .stdout("Set sort_by = name\n");

    notepad_cmd(home.path())
        .args(["config", "sort_by"])
        .assert()
        .success()
        .stdout("name\n");

    let settings = fs::read_to_string(home.path().join("settings.toml")).unwrap();
    assert!(settings.contains("sort_by = \"name\""));
}

#[test]
fn test_sort_preference_orders_list() {
    let home = TempDir::new().unwrap();
    create_note(home.path(), "zebra");
    create_note(home.path(), "aardvark");

    notepad_cmd(home.path())
        .args(["config", "sort_by", "name-reversed"])
        .assert()
        .success();

    let output = notepad_cmd(home.path()).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].ends_with("zebra"));
    assert!(lines[1].ends_with("aardvark"));
}

#[test]
fn test_config_unknown_key() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["config", "wallpaper"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown key 'wallpaper'"));
}

#[test]
fn test_config_bad_value() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .args(["config", "show_date", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected true or false"));

    assert!(!home.path().join("settings.toml").exists());
}

#[test]
fn test_config_usage_without_key() {
    let home = TempDir::new().unwrap();

    notepad_cmd(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: notepad config"))
        .stdout(predicate::str::contains("sort_by"));
}
