// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Orchestration above the git facade.
//!
//! ```text
//! triggers ──> Debouncer ──> EngineCore ──> GitOps ──> SerialGate
//!                               |   \
//!                               v    v
//!                     StatusIndicator  Reporter ──> Notifier
//!
//! PollTimer ── every 5 min ──> EngineCore::poll_tick
//! ```

pub mod command;
pub mod debounce;
pub mod engine;
pub mod indicator;
pub mod notify;
pub mod poll;


pub use command::Command;
pub use engine::{EngineOptions, HostEvent, SyncEngine};
pub use indicator::IndicatorState;
pub use notify::{JsonLinesNotifier, Notifier, Reporter, TracingNotifier};
