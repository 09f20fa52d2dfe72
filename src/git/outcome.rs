// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! What a facade operation decided, separate from how it is shown.

use serde::Serialize;

use super::result::CommandResult;
use crate::error::GitError;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message for the notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    /// Stays on screen until dismissed.
    pub persistent: bool,
}

impl Notice {
    #[must_use]
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            persistent: false,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    #[must_use]
    pub const fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// Classification of an operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeKind {
    Success,
    /// Configuration was incomplete; git was never called.
    Validation,
    /// A git step exited non-zero or could not run.
    CommandFailure,
    /// `init` found an existing repository.
    AlreadyInitialized,
}

/// Result of one facade operation plus the notice it would show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub result: CommandResult,
    pub notice: Notice,
}

impl Outcome {
    #[must_use]
    pub const fn new(kind: OutcomeKind, result: CommandResult, notice: Notice) -> Self {
        Self {
            kind,
            result,
            notice,
        }
    }

    /// Success notice on exit 0, otherwise an error notice built from
    /// `failure` and the text chosen by `detail`.
    pub(crate) fn from_result(
        result: CommandResult,
        success: &str,
        failure: &str,
        detail: fn(&CommandResult) -> &str,
    ) -> Self {
        if result.success() {
            Self::new(OutcomeKind::Success, result, Notice::success(success))
        } else {
            let notice = Notice::error(format!("{failure}\n{}", detail(&result)));
            Self::new(OutcomeKind::CommandFailure, result, notice)
        }
    }

    /// A validation failure: no git call was made. The error text becomes
    /// stderr; the notice adds `hint`.
    #[must_use]
    pub fn validation(err: &GitError, hint: &str) -> Self {
        let message = err.to_string();
        let notice = Notice::error(format!("{message}. {hint}"));
        Self::new(
            OutcomeKind::Validation,
            CommandResult::failure(message),
            notice,
        )
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Success)
    }
}
