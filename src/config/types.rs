// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitsync.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, RemoteConfig, IdentityConfig,
//!         CommitConfig, AutomationConfig, UiConfig
//! ```
//!
//! # Commit Message Type
//!
//! ```text
//! CommitMessageType: Default Message | Default Message With Date (default)
//!                  | Custom Message  | Custom Message With Date
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Policy used to derive commit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommitMessageType {
    #[serde(rename = "Default Message")]
    Default,
    #[default]
    #[serde(rename = "Default Message With Date")]
    DefaultWithDate,
    #[serde(rename = "Custom Message")]
    Custom,
    #[serde(rename = "Custom Message With Date")]
    CustomWithDate,
}

impl std::fmt::Display for CommitMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "Default Message"),
            Self::DefaultWithDate => write!(f, "Default Message With Date"),
            Self::Custom => write!(f, "Custom Message"),
            Self::CustomWithDate => write!(f, "Custom Message With Date"),
        }
    }
}

impl std::str::FromStr for CommitMessageType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default message" | "default" => Ok(Self::Default),
            "default message with date" | "default-with-date" => Ok(Self::DefaultWithDate),
            "custom message" | "custom" => Ok(Self::Custom),
            "custom message with date" | "custom-with-date" => Ok(Self::CustomWithDate),
            _ => Err(ConfigError::InvalidValue {
                section: "commit".to_string(),
                key: "message_type".to_string(),
                message: format!(
                    "expected 'Default Message', 'Default Message With Date', \
                     'Custom Message', or 'Custom Message With Date', got '{s}'"
                ),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Emit console logs as JSON objects.
    pub log_json: bool,
    /// Working tree git runs in. When unset, git runs without `-C`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_json: false,
            repository: None,
        }
    }
}

/// Remote repository coordinates and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Git hosting domain (e.g. github.com, codeberg.org).
    pub host: String,
    /// Username used for HTTPS authentication.
    pub username: String,
    /// Password or personal access token.
    pub password: String,
    /// Repository owner (first URL path segment).
    pub owner: String,
    /// Repository name, without `.git`.
    pub repo: String,
    /// Default branch pushed by `init`.
    pub branch: String,
    /// Momentary trigger: flipping it to true runs a credentials test.
    pub test_credentials: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_string(),
            username: String::new(),
            password: String::new(),
            owner: String::new(),
            repo: String::new(),
            branch: "main".to_string(),
            test_credentials: false,
        }
    }
}

impl RemoteConfig {
    /// Names of the required fields that are blank, in declaration order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("host", &self.host),
            ("username", &self.username),
            ("password", &self.password),
            ("owner", &self.owner),
            ("repo", &self.repo),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Branch to push, falling back to `main` when blank.
    #[must_use]
    pub fn branch_or_default(&self) -> &str {
        if self.branch.trim().is_empty() {
            "main"
        } else {
            &self.branch
        }
    }
}

/// Commit author identity written by `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub email: String,
    pub name: String,
}

/// Commit message settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    pub message_type: CommitMessageType,
    /// Text used by the custom message policies.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_message: String,
}

/// Automation switches consulted by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomationConfig {
    /// Debounced status check on document changes.
    pub check_on_change: bool,
    /// Compare with the remote on startup and when the host becomes visible.
    pub auto_check_synced: bool,
    /// Commit and push when the host becomes hidden.
    pub auto_push_on_hide: bool,
    /// Pull-rebase inside commit-and-push when the remote is ahead.
    pub auto_pull_before_push: bool,
    /// Poll the remote every five minutes.
    pub check_remote_periodically: bool,
    /// Pull-rebase when the periodic poll finds remote changes.
    pub auto_pull_on_remote_change: bool,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            check_on_change: true,
            auto_check_synced: false,
            auto_push_on_hide: false,
            auto_pull_before_push: true,
            check_remote_periodically: false,
            auto_pull_on_remote_change: false,
        }
    }
}

/// Toolbar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Titles of the buttons shown in the toolbar popup, in display order.
    pub buttons: Vec<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            buttons: ["Check Status", "Show Log", "Pull Rebase", "Commit & Push"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
