// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Status indicator state machine.
//!
//! ```text
//!            begin_operation()
//!   INACTIVE ─────────────────> LOADING
//!      ^  \                       |
//!      |   \ complete_check       | complete_check
//!      |    v (non-empty)         v (newer than the op start)
//!      └──── ACTIVE <──────── INACTIVE / ACTIVE
//! ```
//!
//! Every operation start and every check draws a sequence number. A finished
//! check is applied only when its number is greater than the last applied
//! one, so a slow check can never overwrite a newer state.

use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::watch;
use tracing::trace;

use crate::git::CommandResult;

/// What the toolbar dot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorState {
    /// Last check found a clean tree (or nothing checked yet).
    #[default]
    Inactive,
    /// Last check found changes.
    Active,
    /// A mutating operation is running.
    Loading,
}

impl std::fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "INACTIVE"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Loading => write!(f, "LOADING"),
        }
    }
}

/// Handed out when a status check starts; redeemed when it completes.
#[derive(Debug)]
#[must_use = "a check ticket must be passed to complete_check"]
pub struct CheckTicket {
    seq: u64,
}

#[derive(Debug, Default)]
struct Sequencer {
    next_seq: u64,
    last_applied: u64,
}

impl Sequencer {
    fn draw(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Owns the indicator state and publishes every change.
#[derive(Debug)]
pub struct StatusIndicator {
    seq: Mutex<Sequencer>,
    tx: watch::Sender<IndicatorState>,
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicator {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(IndicatorState::Inactive);
        Self {
            seq: Mutex::new(Sequencer::default()),
            tx,
        }
    }

    #[must_use]
    pub fn state(&self) -> IndicatorState {
        *self.tx.borrow()
    }

    /// Receiver for the rendering side.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<IndicatorState> {
        self.tx.subscribe()
    }

    /// A mutating operation started.
    pub fn begin_operation(&self) {
        let mut seq = self.lock();
        let n = seq.draw();
        seq.last_applied = n;
        trace!(seq = n, "indicator: operation started");
        self.tx.send_replace(IndicatorState::Loading);
    }

    pub fn begin_check(&self) -> CheckTicket {
        CheckTicket {
            seq: self.lock().draw(),
        }
    }

    /// Apply a finished `git status --porcelain`.
    ///
    /// Returns `false` when a newer operation or check already landed. A
    /// failed check has no porcelain output and reads as clean.
    pub fn complete_check(&self, ticket: CheckTicket, status: &CommandResult) -> bool {
        let mut seq = self.lock();
        if ticket.seq <= seq.last_applied {
            trace!(seq = ticket.seq, last = seq.last_applied, "indicator: stale check dropped");
            return false;
        }
        seq.last_applied = ticket.seq;
        let state = if status.stdout.trim().is_empty() {
            IndicatorState::Inactive
        } else {
            IndicatorState::Active
        };
        trace!(seq = ticket.seq, %state, "indicator: check applied");
        self.tx.send_replace(state);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sequencer> {
        self.seq
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
