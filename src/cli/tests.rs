// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::run::RunOp;
use crate::cli::{Cli, Command};
use crate::sync::command::Command as SyncCommand;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["gitsync", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "gitsync",
        "-l",
        "5",
        "--repo",
        "/notes",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--set",
        "remote.owner=me",
        "options",
    ])
    .unwrap();
    assert_eq!(cli.global.configs.len(), 2);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "remote.owner=me",
        "global.output_log_level=5",
        "global.file_log_level=5",
        "global.repository=/notes",
    ]
    "#);
}

#[test]
fn test_file_log_level_overrides_console_level() {
    let cli =
        Cli::try_parse_from(["gitsync", "-l", "2", "--file-log-level", "4", "version"]).unwrap();
    let overrides = cli.global.to_config_overrides();
    assert!(overrides.contains(&"global.output_log_level=2".to_string()));
    assert!(overrides.contains(&"global.file_log_level=4".to_string()));
}

#[test]
fn test_log_json_flag_becomes_override() {
    let cli = Cli::try_parse_from(["gitsync", "--log-json", "options"]).unwrap();
    assert!(cli.global.log_json);
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "global.log_json=true",
    ]
    "#);

    let cli = Cli::try_parse_from(["gitsync", "options"]).unwrap();
    assert!(cli.global.to_config_overrides().is_empty());
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["gitsync", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_run_ops() {
    let cli = Cli::try_parse_from(["gitsync", "run", "commit-and-push"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.op, RunOp::CommitAndPush);
    assert_eq!(args.op.command(), Some(SyncCommand::CommitAndPush));

    let cli = Cli::try_parse_from(["gitsync", "run", "remote-ahead"]).unwrap();
    let Some(Command::Run(args)) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.op.command(), None);

    assert!(Cli::try_parse_from(["gitsync", "run", "deploy"]).is_err());
}

#[test]
fn test_run_op_names_match_commands() {
    use clap::ValueEnum;
    for op in RunOp::value_variants() {
        if let Some(command) = op.command() {
            let name = op.to_possible_value().unwrap();
            assert_eq!(name.get_name(), command.name());
        }
    }
}

#[test]
fn test_parse_watch() {
    let cli = Cli::try_parse_from(["gitsync", "watch", "--no-start"]).unwrap();
    let Some(Command::Watch(args)) = cli.command else {
        panic!("expected watch");
    };
    assert!(args.no_start);
}
