// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process plumbing.
//!
//! ```text
//!     core
//!      |
//!      +------------+
//!      v            v
//!   process       redact
//!      |            (masks URL passwords in logged text)
//!   Builder --> tokio::process --> ProcessOutput
//! ```

pub mod process;
pub mod redact;
