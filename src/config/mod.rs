// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitsync.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitsync.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GITSYNC_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITSYNC_REMOTE__PASSWORD=tok          → remote.password = "tok"
//! GITSYNC_AUTOMATION__AUTO_PUSH_ON_HIDE → automation.auto_push_on_hide
//! GITSYNC_GLOBAL__REPOSITORY=/notes     → global.repository = "/notes"
//! ```
//!
//! A loaded [`Config`] is an immutable snapshot. The sync engine holds it in
//! an `Arc` and swaps the whole snapshot when settings change.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::sync::command::Command;

use loader::ConfigLoader;
use types::{AutomationConfig, CommitConfig, GlobalConfig, IdentityConfig, RemoteConfig, UiConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Remote coordinates and credentials.
    pub remote: RemoteConfig,
    /// Commit author identity.
    pub identity: IdentityConfig,
    /// Commit message policy.
    pub commit: CommitConfig,
    /// Automation switches.
    pub automation: AutomationConfig,
    /// Toolbar selection.
    pub ui: UiConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitsync::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitsync.toml")
    ///     .with_env_prefix("GITSYNC")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an unknown toolbar button title.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for title in &self.ui.buttons {
            if Command::from_title(title).is_none() {
                return Err(ConfigError::InvalidValue {
                    section: "ui".to_string(),
                    key: "buttons".to_string(),
                    message: format!("unknown button '{title}'"),
                });
            }
        }
        Ok(())
    }

    /// Commands behind the configured toolbar buttons, in display order.
    #[must_use]
    pub fn toolbar_commands(&self) -> Vec<Command> {
        self.ui
            .buttons
            .iter()
            .filter_map(|title| Command::from_title(title))
            .collect()
    }

    /// Format configuration options for display.
    ///
    /// Secrets are replaced with `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_remote_options(&mut options);
        self.format_commit_options(&mut options);
        self.format_automation_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: Option<&Path>| p.map_or_else(String::new, |p| p.display().to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            fmt(self.global.log_file.as_deref()),
        );
        options.insert("global.log_json".into(), self.global.log_json.to_string());
        options.insert(
            "global.repository".into(),
            fmt(self.global.repository.as_deref()),
        );
    }

    fn format_remote_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("remote.host".into(), self.remote.host.clone());
        options.insert("remote.username".into(), self.remote.username.clone());
        if !self.remote.password.is_empty() {
            options.insert("remote.password".into(), "[hidden]".into());
        }
        options.insert("remote.owner".into(), self.remote.owner.clone());
        options.insert("remote.repo".into(), self.remote.repo.clone());
        options.insert("remote.branch".into(), self.remote.branch.clone());
        options.insert("identity.email".into(), self.identity.email.clone());
        options.insert("identity.name".into(), self.identity.name.clone());
    }

    fn format_commit_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "commit.message_type".into(),
            self.commit.message_type.to_string(),
        );
        if !self.commit.custom_message.is_empty() {
            options.insert(
                "commit.custom_message".into(),
                self.commit.custom_message.clone(),
            );
        }
        options.insert("ui.buttons".into(), self.ui.buttons.join(", "));
    }

    fn format_automation_options(&self, options: &mut BTreeMap<String, String>) {
        let a = &self.automation;
        for (key, value) in [
            ("check_on_change", a.check_on_change),
            ("auto_check_synced", a.auto_check_synced),
            ("auto_push_on_hide", a.auto_push_on_hide),
            ("auto_pull_before_push", a.auto_pull_before_push),
            ("check_remote_periodically", a.check_remote_periodically),
            ("auto_pull_on_remote_change", a.auto_pull_on_remote_change),
        ] {
            options.insert(format!("automation.{key}"), value.to_string());
        }
    }
}
