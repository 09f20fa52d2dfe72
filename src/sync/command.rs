// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The user-facing command surface and the toolbar button catalog.
//!
//! ```text
//! key            title                  name             keybinding
//! status         Check Status           check
//! log            Show Log               log
//! pull           Pull                   pull
//! pullRebase     Pull Rebase            pull-rebase      mod+alt+s
//! checkout       Checkout               checkout
//! commit         Commit                 commit           alt+shift+s
//! push           Push                   push
//! commitAndPush  Commit & Push          commit-and-push  mod+s
//! initRepo       Initialize Repository  init-repository
//! ```

use serde::Serialize;

/// A command the host can trigger. None take arguments; each is debounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    Check,
    Log,
    Pull,
    PullRebase,
    Checkout,
    Commit,
    Push,
    CommitAndPush,
    InitRepository,
}

impl Command {
    /// Every command in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Check,
        Self::Log,
        Self::Pull,
        Self::PullRebase,
        Self::Checkout,
        Self::Commit,
        Self::Push,
        Self::CommitAndPush,
        Self::InitRepository,
    ];

    /// Stable button key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Check => "status",
            Self::Log => "log",
            Self::Pull => "pull",
            Self::PullRebase => "pullRebase",
            Self::Checkout => "checkout",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::CommitAndPush => "commitAndPush",
            Self::InitRepository => "initRepo",
        }
    }

    /// Button title, as written in `[ui] buttons`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Check => "Check Status",
            Self::Log => "Show Log",
            Self::Pull => "Pull",
            Self::PullRebase => "Pull Rebase",
            Self::Checkout => "Checkout",
            Self::Commit => "Commit",
            Self::Push => "Push",
            Self::CommitAndPush => "Commit & Push",
            Self::InitRepository => "Initialize Repository",
        }
    }

    /// Command name used on the command line and in host events.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Log => "log",
            Self::Pull => "pull",
            Self::PullRebase => "pull-rebase",
            Self::Checkout => "checkout",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::CommitAndPush => "commit-and-push",
            Self::InitRepository => "init-repository",
        }
    }

    /// Global shortcut registered with the host's command palette.
    #[must_use]
    pub const fn keybinding(self) -> Option<&'static str> {
        match self {
            Self::Commit => Some("alt+shift+s"),
            Self::CommitAndPush => Some("mod+s"),
            Self::PullRebase => Some("mod+alt+s"),
            _ => None,
        }
    }

    /// Commands that put the indicator into LOADING when they start.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Pull | Self::PullRebase | Self::Push | Self::CommitAndPush | Self::InitRepository
        )
    }

    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.title() == title.trim())
    }

    /// The full catalog, with `selected` marking the configured toolbar.
    #[must_use]
    pub fn toolbar(selected: &[Self]) -> Vec<ToolbarButton> {
        Self::ALL
            .into_iter()
            .map(|command| ToolbarButton {
                key: command.key(),
                title: command.title(),
                command,
                keybinding: command.keybinding(),
                selected: selected.contains(&command),
            })
            .collect()
    }

    /// Look up by command name or button key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.key() == name)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the toolbar catalog as sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarButton {
    pub key: &'static str,
    pub title: &'static str,
    pub command: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keybinding: Option<&'static str>,
    pub selected: bool,
}
