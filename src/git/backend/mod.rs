// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! Workspace  --> Option<PathBuf>   (resolved before every call)
//! GitBackend --> invoke(cwd?, args) --> CommandResult
//!                  |
//!                  v
//!             ShellBackend (git CLI, exit code is data)
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use super::result::CommandResult;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::SyncResult;

// --- Invocation Trait ---

/// The external git capability: takes an argument list and an optional
/// working directory and returns a structured result.
///
/// A non-zero exit is reported through [`CommandResult::exit_code`]. `Err` is
/// reserved for failures to run git at all.
pub trait GitBackend: Send + Sync + 'static {
    /// Run git once with `args`, inside `cwd` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be spawned or does not finish.
    fn invoke(
        &self,
        cwd: Option<&Path>,
        args: &[String],
    ) -> impl Future<Output = SyncResult<CommandResult>> + Send;
}

// --- Workspace ---

/// Supplies the directory git should run in.
pub trait Workspace: Send + Sync {
    /// Current repository directory, if the host has one.
    fn current_dir(&self) -> Option<PathBuf>;
}

/// A repository path that can be replaced while the engine runs.
#[derive(Debug, Default)]
pub struct RepositoryPath {
    path: RwLock<Option<PathBuf>>,
}

impl RepositoryPath {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: RwLock::new(path),
        }
    }

    pub fn set(&self, path: Option<PathBuf>) {
        *self
            .path
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = path;
    }
}

impl Workspace for RepositoryPath {
    fn current_dir(&self) -> Option<PathBuf> {
        self.path
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Every call sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so a
/// missing credential fails instead of waiting on a prompt nobody sees.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    git: PathBuf,
    timeout: Option<Duration>,
}

impl ShellBackend {
    /// Resolve `git` on PATH.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if git is not installed.
    pub fn new() -> SyncResult<Self> {
        let builder = ProcessBuilder::which("git")?;
        Ok(Self::with_program(builder.program()))
    }

    /// Use an explicit git executable.
    #[must_use]
    pub fn with_program(git: impl Into<PathBuf>) -> Self {
        Self {
            git: git.into(),
            timeout: None,
        }
    }

    /// Kill invocations that run longer than `timeout`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, cwd: Option<&Path>, args: &[String]) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&self.git).name("git");
        if let Some(dir) = cwd {
            builder = builder.arg("-C").arg(dir);
        }
        builder = builder
            .args(args)
            .env_var("GCM_INTERACTIVE", "never")
            .env_var("GIT_TERMINAL_PROMPT", "0")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}

impl GitBackend for ShellBackend {
    async fn invoke(&self, cwd: Option<&Path>, args: &[String]) -> SyncResult<CommandResult> {
        let output = self.command(cwd, args).run().await?;
        Ok(output.into())
    }
}
