// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification sinks.
//!
//! ```text
//! Outcome ──> Reporter ──> dyn Notifier
//!                            ├─ TracingNotifier    (log events)
//!                            └─ JsonLinesNotifier  (one JSON object per line)
//! ```
//!
//! `JsonLinesNotifier` also carries indicator changes and the toolbar catalog,
//! so everything the host reads arrives on one ordered stream.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{error, info, warn};

use super::command::ToolbarButton;
use super::indicator::IndicatorState;
use crate::git::{Notice, NoticeLevel, Outcome};

/// Receives user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes notices as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        let persistent = notice.persistent;
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(level = %notice.level, persistent, "{}", notice.message);
            }
            NoticeLevel::Warning => warn!(persistent, "{}", notice.message),
            NoticeLevel::Error => error!(persistent, "{}", notice.message),
        }
    }
}

/// Line-delimited JSON for a host reading our stdout.
pub struct JsonLinesNotifier<W> {
    out: Mutex<W>,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
enum Line<'a> {
    Notice(&'a Notice),
    Indicator { state: IndicatorState },
    Toolbar { buttons: &'a [ToolbarButton] },
}

impl<W> JsonLinesNotifier<W> {
    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl JsonLinesNotifier<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLinesNotifier<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn indicator(&self, state: IndicatorState) {
        self.write_line(&Line::Indicator { state });
    }

    pub fn toolbar(&self, buttons: &[ToolbarButton]) {
        self.write_line(&Line::Toolbar { buttons });
    }

    fn write_line(&self, line: &Line<'_>) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *out, line)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(out))
            .and_then(|()| out.flush());
        if let Err(e) = written {
            warn!(error = %e, "failed to write host event");
        }
    }
}

impl<W: Write + Send> Notifier for JsonLinesNotifier<W> {
    fn notify(&self, notice: &Notice) {
        self.write_line(&Line::Notice(notice));
    }
}

/// Delivers facade outcomes to the notification sink.
#[derive(Clone)]
pub struct Reporter {
    notifier: Arc<dyn Notifier>,
}

impl Reporter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn notify(&self, notice: &Notice) {
        self.notifier.notify(notice);
    }

    /// Show the notice an operation decided on.
    pub fn deliver(&self, outcome: &Outcome) {
        self.notifier.notify(&outcome.notice);
    }
}

/// Keeps every notice in memory.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

#[cfg(test)]
impl MemoryNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.message).collect()
    }
}

#[cfg(test)]
impl Notifier for MemoryNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
