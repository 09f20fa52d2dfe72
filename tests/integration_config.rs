// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.

use std::fs;
use std::path::PathBuf;

use gitsync::cli::global::GlobalOptions;
use gitsync::cmd::config::build_config_loader;
use gitsync::config::Config;
use gitsync::config::types::CommitMessageType;
use gitsync::logging::LogLevel;
use gitsync::sync::Command;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_automation_section() {
    let toml = r"
[automation]
auto_push_on_hide = true
check_remote_periodically = true
";
    let config = Config::parse(toml).unwrap();
    insta::assert_yaml_snapshot!(config.automation, @r"
    check_on_change: true
    auto_check_synced: false
    auto_push_on_hide: true
    auto_pull_before_push: true
    check_remote_periodically: true
    auto_pull_on_remote_change: false
    ");
}

#[test]
fn config_parse_commit_and_ui() {
    let toml = r#"
[commit]
message_type = "Custom Message"
custom_message = "notes: sync"

[ui]
buttons = ["Commit & Push", "Pull"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.commit.message_type, CommitMessageType::Custom);
    assert_eq!(
        config.toolbar_commands(),
        vec![Command::CommitAndPush, Command::Pull]
    );
}

#[test]
fn config_invalid_log_level_rejected() {
    let toml = r"
[global]
output_log_level = 9
";
    assert!(Config::parse(toml).is_err());
}

// =============================================================================
// Layering
// =============================================================================

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn config_later_file_and_flags_win() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        &dir,
        "base.toml",
        "[remote]\nowner = \"alice\"\nrepo = \"notes\"\n",
    );
    let local = write(&dir, "local.toml", "[remote]\nowner = \"bob\"\n");

    let global = GlobalOptions {
        configs: vec![base, local],
        log_level: Some(4),
        log_json: true,
        repo: Some(PathBuf::from("/srv/notes")),
        options: vec!["remote.branch=trunk".to_string()],
        ..GlobalOptions::default()
    };
    let config = build_config_loader(&global, &[])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.remote.owner, "bob");
    assert_eq!(config.remote.repo, "notes");
    assert_eq!(config.remote.branch, "trunk");
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::DEBUG);
    assert!(config.global.log_json);
    assert_eq!(
        config.global.repository.as_deref(),
        Some(std::path::Path::new("/srv/notes"))
    );
}

#[test]
fn config_extra_overrides_apply_last() {
    let global = GlobalOptions {
        options: vec!["automation.auto_push_on_hide=false".to_string()],
        ..GlobalOptions::default()
    };
    let extra = ["automation.auto_push_on_hide=true".to_string()];
    let config = build_config_loader(&global, &extra)
        .unwrap()
        .build()
        .unwrap();
    assert!(config.automation.auto_push_on_hide);
}

#[test]
fn config_missing_explicit_file_fails() {
    let global = GlobalOptions {
        configs: vec![PathBuf::from("/nonexistent/gitsync.toml")],
        ..GlobalOptions::default()
    };
    assert!(
        build_config_loader(&global, &[])
            .unwrap()
            .build()
            .is_err()
    );
}

#[test]
fn config_malformed_override_rejected() {
    let global = GlobalOptions {
        options: vec!["owner=me".to_string()],
        ..GlobalOptions::default()
    };
    assert!(build_config_loader(&global, &[]).is_err());
}
