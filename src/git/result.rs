// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outcome of one git invocation.

use serde::Serialize;

use crate::core::process::builder::ProcessOutput;
use crate::error::SyncError;

/// Exit code standing in for "no exit code" (spawn failure, signal, timeout).
pub const SENTINEL_EXIT_CODE: i32 = 1;

/// Exit status and captured output of a single git invocation.
///
/// Exit code 0 means success; every other value means failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A successful result carrying `stdout`.
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// A failed result with the sentinel exit code and `message` as stderr.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(SENTINEL_EXIT_CODE, "", message)
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout, or stderr when stdout is blank.
    #[must_use]
    pub fn stdout_or_stderr(&self) -> &str {
        if self.stdout.trim().is_empty() {
            &self.stderr
        } else {
            &self.stdout
        }
    }
}

impl From<ProcessOutput> for CommandResult {
    fn from(output: ProcessOutput) -> Self {
        let (exit_code, stdout, stderr) = output.into_parts();
        // Killed by a signal: no exit code.
        let exit_code = if exit_code < 0 { SENTINEL_EXIT_CODE } else { exit_code };
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }
}

impl From<SyncError> for CommandResult {
    fn from(err: SyncError) -> Self {
        Self::failure(err.to_string())
    }
}
