// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations facade.
//!
//! ```text
//! status            status --porcelain
//! log               log --pretty=... --date=... --name-status
//! pull              pull
//! pull_rebase       pull --rebase
//! checkout          checkout .
//! commit            add .  ->  commit -m <message>
//! push              push
//! init              validate -> status -> init -> config x2 -> remote add
//!                   -> branch -M -> add . -> commit -> push -u
//! test_credentials  validate -> ls-remote <url> HEAD
//! check_remote_ahead fetch -> rev-list HEAD..@{upstream} --count
//! ```
//!
//! Every operation is a terminal boundary: a backend error becomes a failed
//! [`CommandResult`] and never escapes as `Err`.

use tracing::{debug, info, warn};

use super::backend::GitBackend;
use super::gate::SerialGate;
use super::outcome::{Notice, Outcome, OutcomeKind};
use super::result::CommandResult;
use super::url::{credentialed_remote_url, redacted_remote_url};
use crate::config::types::{IdentityConfig, RemoteConfig};
use crate::core::redact::redact_userinfo;
use crate::error::GitError;

/// Argument list for `git log`.
pub const LOG_ARGS: [&str; 4] = [
    "log",
    "--pretty=format:\"%h %ad | %s [%an]\"",
    "--date=format:\"%Y-%m-%d %H:%M:%S\"",
    "--name-status",
];

/// Commit message of the first commit written by `init`.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

fn stderr(result: &CommandResult) -> &str {
    &result.stderr
}

fn stdout_or_stderr(result: &CommandResult) -> &str {
    result.stdout_or_stderr()
}

/// The fixed catalog of named git operations.
pub struct GitOps<B> {
    gate: SerialGate<B>,
}

impl<B: GitBackend> GitOps<B> {
    pub const fn new(gate: SerialGate<B>) -> Self {
        Self { gate }
    }

    #[must_use]
    pub const fn gate(&self) -> &SerialGate<B> {
        &self.gate
    }

    /// One gated invocation. Backend errors fold into a failed result.
    async fn git(&self, args: &[&str]) -> CommandResult {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        match self.gate.execute(&args).await {
            Ok(mut result) => {
                // git may echo the credentialed remote URL.
                let masked = redact_userinfo(&result.stderr).into_owned();
                result.stderr = masked;
                result
            }
            Err(e) => {
                warn!(cmd = %args.first().map_or("", String::as_str), error = %e, "git could not run");
                e.into()
            }
        }
    }

    /// `git status --porcelain`. Empty stdout means a clean tree.
    pub async fn status(&self) -> Outcome {
        let result = self.git(&["status", "--porcelain"]).await;
        Outcome::from_result(result, "Git status success", "Git status failed", stderr)
    }

    /// Commit history with changed files. The log text is the success notice.
    pub async fn log(&self) -> Outcome {
        let result = self.git(&LOG_ARGS).await;
        if result.success() {
            let notice = Notice::success(result.stdout.clone()).persistent();
            Outcome::new(OutcomeKind::Success, result, notice)
        } else {
            Outcome::from_result(result, "", "Git log failed", stderr)
        }
    }

    pub async fn pull(&self) -> Outcome {
        let result = self.git(&["pull"]).await;
        Outcome::from_result(result, "Git pull success", "Git pull failed", stderr)
    }

    pub async fn pull_rebase(&self) -> Outcome {
        let result = self.git(&["pull", "--rebase"]).await;
        Outcome::from_result(
            result,
            "Git pull --rebase success",
            "Git pull --rebase failed",
            stderr,
        )
    }

    /// Discard unstaged changes in the working tree.
    pub async fn checkout(&self) -> Outcome {
        let result = self.git(&["checkout", "."]).await;
        Outcome::from_result(result, "Git checkout success", "Git checkout failed", stderr)
    }

    /// Stage everything and commit with `message`.
    ///
    /// Staging failures surface through the commit step. A failed commit
    /// reports stdout first, since git prints "nothing to commit" there.
    pub async fn commit(&self, message: &str) -> Outcome {
        let staged = self.git(&["add", "."]).await;
        if !staged.success() {
            debug!(stderr = %staged.stderr, "git add failed");
        }
        let result = self.git(&["commit", "-m", message]).await;
        Outcome::from_result(
            result,
            "Git commit success",
            "Git commit failed",
            stdout_or_stderr,
        )
    }

    pub async fn push(&self) -> Outcome {
        let result = self.git(&["push"]).await;
        Outcome::from_result(result, "Git push success", "Git push failed", stderr)
    }

    /// Initialize a repository wired to the configured HTTPS remote.
    ///
    /// Stops at the first failing step without undoing earlier ones.
    pub async fn init(&self, remote: &RemoteConfig, identity: &IdentityConfig) -> Outcome {
        if let Some(outcome) = validate_remote(remote) {
            return outcome;
        }
        let missing_identity: Vec<&'static str> =
            [("email", &identity.email), ("name", &identity.name)]
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(name, _)| name)
                .collect();
        if !missing_identity.is_empty() {
            return Outcome::validation(
                &GitError::MissingFields {
                    fields: missing_identity,
                },
                "Fill in [identity] email and name.",
            );
        }

        if self.git(&["status"]).await.success() {
            let message = GitError::AlreadyInitialized.to_string();
            return Outcome::new(
                OutcomeKind::AlreadyInitialized,
                CommandResult::failure(message),
                Notice::warning("Repository already initialized."),
            );
        }

        let branch = remote.branch_or_default();
        let url = credentialed_remote_url(remote);
        info!(remote = %redacted_remote_url(remote), branch, "initializing repository");

        let steps: [(&[&str], &str); 7] = [
            (&["init"], "Git init failed"),
            (
                &["config", "user.email", identity.email.as_str()],
                "Failed to set user.email",
            ),
            (
                &["config", "user.name", identity.name.as_str()],
                "Failed to set user.name",
            ),
            (&["remote", "add", "origin", url.as_str()], "Failed to add remote"),
            (&["branch", "-M", branch], "Failed to set branch"),
            (&["add", "."], "Failed to stage files"),
            (
                &["commit", "-m", INITIAL_COMMIT_MESSAGE],
                "Failed to create initial commit",
            ),
        ];
        for (args, failure) in steps {
            let result = self.git(args).await;
            if !result.success() {
                let notice = Notice::error(format!("{failure}: {}", result.stdout_or_stderr()));
                return Outcome::new(OutcomeKind::CommandFailure, result, notice);
            }
        }

        let pushed = self.git(&["push", "-u", "origin", branch]).await;
        if !pushed.success() {
            let notice = Notice::warning(format!(
                "Repository initialized locally, but push failed: {}. \
                 You may need to create the repository on {} first.",
                pushed.stderr.trim(),
                remote.host.trim()
            ));
            return Outcome::new(OutcomeKind::CommandFailure, pushed, notice);
        }

        Outcome::new(
            OutcomeKind::Success,
            CommandResult::ok("Repository initialized successfully"),
            Notice::success("Repository initialized successfully!"),
        )
    }

    /// Ask the remote for `HEAD` using the configured credentials.
    pub async fn test_credentials(&self, remote: &RemoteConfig) -> Outcome {
        if let Some(outcome) = validate_remote(remote) {
            return outcome;
        }
        let url = credentialed_remote_url(remote);
        debug!(remote = %redacted_remote_url(remote), "testing credentials");

        let result = self.git(&["ls-remote", url.as_str(), "HEAD"]).await;
        if result.success() {
            return Outcome::new(
                OutcomeKind::Success,
                CommandResult::ok("Credentials valid"),
                Notice::success("Credentials valid! Successfully connected to remote repository."),
            );
        }
        let reason = if result.stderr.trim().is_empty() {
            "Repository not found or invalid credentials"
        } else {
            result.stderr.trim()
        };
        let notice = Notice::error(format!("Credential test failed: {reason}"));
        Outcome::new(OutcomeKind::CommandFailure, result, notice)
    }

    /// True iff the upstream branch has commits missing locally.
    ///
    /// Any failure, including a failed fetch, yields `false`.
    pub async fn check_remote_ahead(&self) -> bool {
        let fetched = self.git(&["fetch"]).await;
        if !fetched.success() {
            debug!(stderr = %fetched.stderr, "fetch failed, assuming remote is not ahead");
            return false;
        }
        let counted = self.git(&["rev-list", "HEAD..@{upstream}", "--count"]).await;
        if !counted.success() {
            return false;
        }
        counted
            .stdout
            .trim()
            .parse::<u64>()
            .is_ok_and(|count| count > 0)
    }
}

fn validate_remote(remote: &RemoteConfig) -> Option<Outcome> {
    let fields = remote.missing_fields();
    if fields.is_empty() {
        return None;
    }
    Some(Outcome::validation(
        &GitError::MissingFields { fields },
        "Fill in [remote] host, username, password, owner and repo.",
    ))
}
