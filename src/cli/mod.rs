// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitsync using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitsync [global options] <command>
//! version
//! options
//! buttons
//! run <op>
//! watch
//! ```

pub mod global;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::run::{RunArgs, WatchArgs};
use clap::{Parser, Subcommand};

/// Git synchronization orchestrator.
///
/// Serializes git invocations on one working tree, debounces host triggers
/// and automates pull, commit and push.
#[derive(Debug, Parser)]
#[command(
    name = "gitsync",
    author,
    version,
    about = "Git synchronization orchestrator",
    long_about = "gitsync Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a notes directory in sync with a remote git repository.\n\n\
                  `gitsync run <op>` runs one operation and exits. `gitsync watch`\n\
                  reads host events from stdin, one per line, and writes notices\n\
                  and indicator changes to stdout as JSON lines.",
    after_help = "CONFIG FILES:\n\n\
                  gitsync reads `gitsync.toml` from the current directory if it\n\
                  exists. Additional files can be given with --config; later files\n\
                  override earlier ones. GITSYNC_SECTION__KEY environment variables\n\
                  and --set section.key=value override every file."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the toolbar buttons and the configured selection.
    Buttons,

    /// Runs one git operation and exits.
    Run(RunArgs),

    /// Runs the sync engine, fed by host events on stdin.
    Watch(WatchArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
