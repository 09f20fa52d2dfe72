// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Serial execution gate.
//!
//! ```text
//! caller A ──┐
//! caller B ──┼──> Mutex<()> (FIFO) ──> resolve cwd ──> backend.invoke
//! caller C ──┘        |
//!               guard dropped on every exit path
//! ```
//!
//! `tokio::sync::Mutex` hands the lock out in the order `lock()` was first
//! polled, so two calls issued back-to-back chain instead of racing.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::backend::{GitBackend, Workspace};
use super::result::CommandResult;
use crate::core::redact::redact_userinfo;
use crate::error::SyncResult;

/// Wraps a [`GitBackend`] so at most one invocation is in flight.
pub struct SerialGate<B> {
    backend: B,
    workspace: Arc<dyn Workspace>,
    slot: Mutex<()>,
}

impl<B: GitBackend> SerialGate<B> {
    pub fn new(backend: B, workspace: Arc<dyn Workspace>) -> Self {
        Self {
            backend,
            workspace,
            slot: Mutex::new(()),
        }
    }

    /// Run one git invocation after every earlier caller has settled.
    ///
    /// # Errors
    ///
    /// Returns the backend error when git could not be run. The slot is
    /// released either way.
    pub async fn execute(&self, args: &[String]) -> SyncResult<CommandResult> {
        let _pending = self.slot.lock().await;
        let cwd = self.workspace.current_dir();
        trace!(args = %redact_userinfo(&args.join(" ")), cwd = ?cwd, "gate acquired");

        let result = self.backend.invoke(cwd.as_deref(), args).await;
        match &result {
            Ok(res) => debug!(
                cmd = %args.first().map_or("", String::as_str),
                exit_code = res.exit_code,
                "git settled"
            ),
            Err(e) => debug!(error = %e, "git invocation failed"),
        }
        result
    }
}
