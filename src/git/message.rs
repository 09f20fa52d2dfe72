// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit message derivation.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::types::{CommitConfig, CommitMessageType};

/// Message used when no custom text applies.
pub const DEFAULT_COMMIT_MESSAGE: &str = "[gitsync:commit]";

/// Build the commit message for `config` at time `now`.
///
/// Timestamps are ISO-8601 UTC with millisecond precision, e.g.
/// `2026-01-02T03:04:05.678Z`. A blank custom text falls back to the default.
#[must_use]
pub fn commit_message(config: &CommitConfig, now: DateTime<Utc>) -> String {
    let custom = config.custom_message.trim();
    let base: &str = match config.message_type {
        CommitMessageType::Default | CommitMessageType::DefaultWithDate => DEFAULT_COMMIT_MESSAGE,
        CommitMessageType::Custom | CommitMessageType::CustomWithDate if custom.is_empty() => {
            DEFAULT_COMMIT_MESSAGE
        }
        CommitMessageType::Custom | CommitMessageType::CustomWithDate => config.custom_message.as_str(),
    };
    match config.message_type {
        CommitMessageType::Default | CommitMessageType::Custom => base.to_string(),
        CommitMessageType::DefaultWithDate | CommitMessageType::CustomWithDate => {
            format!("{base} {}", now.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
    }
}
