// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!          ops.rs  (GitOps: status, log, pull, ..., init)
//!            |
//!            v
//!         gate.rs  (SerialGate: one invocation at a time, FIFO)
//!            |
//!            v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitBackend   Workspace
//!         |          |
//!         v          v
//!   ShellBackend  RepositoryPath
//! ```
//!
//! `message.rs` derives commit messages, `url.rs` builds the credentialed
//! remote URL, `outcome.rs` holds what an operation reports.

pub mod backend;
pub mod gate;
pub mod message;
pub mod ops;
pub mod outcome;
pub mod result;
pub mod url;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{GitBackend, RepositoryPath, ShellBackend, Workspace};
pub use gate::SerialGate;
pub use ops::GitOps;
pub use outcome::{Notice, NoticeLevel, Outcome, OutcomeKind};
pub use result::CommandResult;
