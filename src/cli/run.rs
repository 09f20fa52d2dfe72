// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `run` and `watch`.
//!
//! ```text
//! run check | log | pull | pull-rebase | checkout | commit | push
//!     commit-and-push | init-repository | test-credentials | remote-ahead
//! watch [--no-start]
//! ```

use clap::{Args, ValueEnum};

use crate::sync::command::Command;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Operation to run.
    #[arg(value_enum)]
    pub op: RunOp,
}

/// One-shot operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunOp {
    /// `git status --porcelain`, reported as changes or a clean tree.
    Check,
    /// Recent history with changed files.
    Log,
    Pull,
    PullRebase,
    /// Discard unstaged changes.
    Checkout,
    /// Stage everything and commit with the configured message.
    Commit,
    Push,
    /// Pull-rebase when behind, commit when dirty, then push.
    CommitAndPush,
    /// Create the repository, commit everything and push to the remote.
    InitRepository,
    /// Check the configured remote is reachable with the credentials.
    TestCredentials,
    /// Fetch and report whether the upstream has unpulled commits.
    RemoteAhead,
}

impl RunOp {
    /// The toolbar command behind this operation, if any.
    #[must_use]
    pub const fn command(self) -> Option<Command> {
        match self {
            Self::Check => Some(Command::Check),
            Self::Log => Some(Command::Log),
            Self::Pull => Some(Command::Pull),
            Self::PullRebase => Some(Command::PullRebase),
            Self::Checkout => Some(Command::Checkout),
            Self::Commit => Some(Command::Commit),
            Self::Push => Some(Command::Push),
            Self::CommitAndPush => Some(Command::CommitAndPush),
            Self::InitRepository => Some(Command::InitRepository),
            Self::TestCredentials | Self::RemoteAhead => None,
        }
    }
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct WatchArgs {
    /// Skip the startup status check, synced check and poll timer.
    #[arg(long = "no-start")]
    pub no_start: bool,
}
