// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted backend for unit tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::backend::GitBackend;
use super::result::CommandResult;
use crate::error::{SyncError, SyncResult};

enum Reply {
    Result(CommandResult),
    Error(String),
}

#[derive(Default)]
struct State {
    /// `(prefix, reply)`; the latest matching rule wins.
    rules: Vec<(String, Reply)>,
    calls: Vec<String>,
    cwds: Vec<Option<PathBuf>>,
    in_flight: usize,
    max_in_flight: usize,
    delay: Option<Duration>,
}

/// Records every invocation and answers from a script. Unscripted commands
/// succeed with empty output.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Answer commands starting with `prefix` (space-joined args).
    pub(crate) fn respond(&self, prefix: &str, result: CommandResult) -> &Self {
        self.lock()
            .rules
            .push((prefix.to_string(), Reply::Result(result)));
        self
    }

    /// Make commands starting with `prefix` fail to run at all.
    pub(crate) fn error(&self, prefix: &str, message: &str) -> &Self {
        self.lock()
            .rules
            .push((prefix.to_string(), Reply::Error(message.to_string())));
        self
    }

    /// Every invocation sleeps this long before answering.
    pub(crate) fn delay(&self, delay: Duration) -> &Self {
        self.lock().delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub(crate) fn cwds(&self) -> Vec<Option<PathBuf>> {
        self.lock().cwds.clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    pub(crate) fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

impl GitBackend for FakeBackend {
    async fn invoke(&self, cwd: Option<&Path>, args: &[String]) -> SyncResult<CommandResult> {
        let line = args.join(" ");
        let delay = {
            let mut state = self.lock();
            state.calls.push(line.clone());
            state.cwds.push(cwd.map(Path::to_path_buf));
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.lock();
        state.in_flight -= 1;
        match state.rules.iter().rev().find(|(prefix, _)| line.starts_with(prefix.as_str())) {
            Some((_, Reply::Result(result))) => Ok(result.clone()),
            Some((_, Reply::Error(message))) => Err(SyncError::Other(message.clone().into_boxed_str())),
            None => Ok(CommandResult::ok("")),
        }
    }
}
