// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Automation policy engine.
//!
//! ```text
//! host events ─┬─ changed (if check_on_change) ─┐
//!              ├─ route ─────────────────────────┴─> debounced status check
//!              ├─ visible (if auto_check_synced) ──> synced check
//!              └─ hidden  (if auto_push_on_hide) ──> commit-and-push
//! commands ─────────────────────────────────────────> one debouncer each
//! settings  ── test_credentials false→true ─────────> test-credentials
//!           └─ check_remote_periodically changed ───> restart poll
//! poll (5 min) ── remote ahead? ──> warn [──> pull --rebase]
//! ```
//!
//! The engine is a thin owner of debouncers and the poll timer. All work runs
//! on [`EngineCore`], shared through an `Arc` by every spawned task.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use bon::Builder;
use chrono::Utc;
use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::command::Command;
use super::debounce::{DEBOUNCE_DELAY, Debouncer};
use super::indicator::{IndicatorState, StatusIndicator};
use super::notify::{Notifier, Reporter};
use super::poll::{PollTimer, REMOTE_POLL_PERIOD};
use crate::config::Config;
use crate::git::message::commit_message;
use crate::git::{GitBackend, GitOps, Notice, Outcome, SerialGate, Workspace};

/// Warning shown when the remote has commits we do not.
pub const REMOTE_AHEAD_NOTICE: &str = "Remote repository has new changes. Pull to sync.";
pub const AUTO_PULL_NOTICE: &str = "Auto-pulling remote changes...";
pub const PRE_PUSH_PULL_NOTICE: &str = "Remote has changes, pulling before push...";

/// Lifecycle notifications from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    DocumentChanged,
    RouteChanged,
    Visible,
    Hidden,
}

impl std::str::FromStr for HostEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "changed" => Ok(Self::DocumentChanged),
            "route" => Ok(Self::RouteChanged),
            "visible" => Ok(Self::Visible),
            "hidden" => Ok(Self::Hidden),
            other => Err(format!("unknown host event '{other}'")),
        }
    }
}

/// Timing knobs.
#[derive(Debug, Clone, Builder)]
pub struct EngineOptions {
    #[builder(setters(name = with_debounce_delay), default = DEBOUNCE_DELAY)]
    debounce_delay: Duration,
    #[builder(setters(name = with_poll_period), default = REMOTE_POLL_PERIOD)]
    poll_period: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// State and behavior shared by every engine task.
pub struct EngineCore<B> {
    ops: GitOps<B>,
    indicator: StatusIndicator,
    reporter: Reporter,
    config: RwLock<Arc<Config>>,
}

impl<B: GitBackend> EngineCore<B> {
    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(
            &self
                .config
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }

    fn replace_config(&self, config: Arc<Config>) -> Arc<Config> {
        let mut slot = self
            .config
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::replace(&mut *slot, config)
    }

    pub const fn ops(&self) -> &GitOps<B> {
        &self.ops
    }

    pub const fn indicator(&self) -> &StatusIndicator {
        &self.indicator
    }

    /// Status check that only feeds the indicator.
    pub async fn refresh_status(&self) -> Outcome {
        let ticket = self.indicator.begin_check();
        let outcome = self.ops.status().await;
        if !outcome.success() {
            debug!(stderr = %outcome.result.stderr, "status refresh failed");
        }
        self.indicator.complete_check(ticket, &outcome.result);
        outcome
    }

    /// Run one command to completion, bypassing its debouncer.
    ///
    /// Returns the outcome that decides whether the command succeeded.
    pub async fn run_command(&self, command: Command) -> Outcome {
        debug!(%command, "running command");
        if command.is_mutating() {
            self.indicator.begin_operation();
        }
        match command {
            Command::Check => self.check().await,
            Command::Log => self.reported(self.ops.log().await),
            Command::Pull => self.then_refresh(self.ops.pull().await).await,
            Command::PullRebase => self.then_refresh(self.ops.pull_rebase().await).await,
            Command::Checkout => self.then_refresh(self.ops.checkout().await).await,
            Command::Commit => {
                let message = commit_message(&self.config().commit, Utc::now());
                self.then_refresh(self.ops.commit(&message).await).await
            }
            Command::Push => self.then_refresh(self.ops.push().await).await,
            Command::CommitAndPush => self.commit_and_push().await,
            Command::InitRepository => {
                let config = self.config();
                let outcome = self.ops.init(&config.remote, &config.identity).await;
                self.then_refresh(outcome).await
            }
        }
    }

    fn reported(&self, outcome: Outcome) -> Outcome {
        self.reporter.deliver(&outcome);
        outcome
    }

    async fn then_refresh(&self, outcome: Outcome) -> Outcome {
        self.reporter.deliver(&outcome);
        self.refresh_status().await;
        outcome
    }

    async fn check(&self) -> Outcome {
        let outcome = self.refresh_status().await;
        if !outcome.success() {
            self.reporter.deliver(&outcome);
        } else if outcome.result.stdout.trim().is_empty() {
            self.reporter.notify(&Notice::info("No changes detected."));
        } else {
            let message = format!("Changes detected:\n{}", outcome.result.stdout);
            self.reporter.notify(&Notice::success(message).persistent());
        }
        outcome
    }

    /// Pull-rebase if needed, commit when dirty, push if the commit landed,
    /// then refresh. Steps short-circuit without rollback.
    async fn commit_and_push(&self) -> Outcome {
        let config = self.config();

        if config.automation.auto_pull_before_push && self.ops.check_remote_ahead().await {
            self.reporter.notify(&Notice::info(PRE_PUSH_PULL_NOTICE));
            let pulled = self.ops.pull_rebase().await;
            if !pulled.success() {
                warn!(stderr = %pulled.result.stderr, "pre-push pull --rebase failed");
            }
        }

        let status = self.ops.status().await;
        let outcome = if status.result.stdout.trim().is_empty() {
            debug!("working tree clean, nothing to commit");
            status
        } else {
            let message = commit_message(&config.commit, Utc::now());
            let committed = self.reported(self.ops.commit(&message).await);
            if committed.success() {
                self.reported(self.ops.push().await)
            } else {
                committed
            }
        };

        self.refresh_status().await;
        outcome
    }

    /// Warn when the remote is ahead and refresh the indicator.
    pub async fn check_synced(&self) -> bool {
        let ahead = self.ops.check_remote_ahead().await;
        if ahead {
            self.reporter
                .notify(&Notice::warning(REMOTE_AHEAD_NOTICE).persistent());
        }
        self.refresh_status().await;
        ahead
    }

    async fn poll_tick(&self) {
        if !self.ops.check_remote_ahead().await {
            debug!("poll: remote not ahead");
            return;
        }
        info!("poll: remote has new commits");
        self.reporter
            .notify(&Notice::warning(REMOTE_AHEAD_NOTICE).persistent());

        if self.config().automation.auto_pull_on_remote_change {
            self.reporter.notify(&Notice::info(AUTO_PULL_NOTICE));
            self.indicator.begin_operation();
            let pulled = self.ops.pull_rebase().await;
            self.then_refresh(pulled).await;
        }
    }

    /// Test credentials and report the result.
    pub async fn test_credentials(&self) -> Outcome {
        let config = self.config();
        self.reported(self.ops.test_credentials(&config.remote).await)
    }
}

/// Split the credentials trigger off a loaded snapshot.
fn take_credentials_request(config: Arc<Config>) -> (Arc<Config>, bool) {
    if !config.remote.test_credentials {
        return (config, false);
    }
    let mut config = Arc::unwrap_or_clone(config);
    config.remote.test_credentials = false;
    (Arc::new(config), true)
}

/// Owns the debouncers and the poll timer around a shared [`EngineCore`].
pub struct SyncEngine<B: GitBackend> {
    core: Arc<EngineCore<B>>,
    commands: BTreeMap<Command, Debouncer<()>>,
    status_check: Debouncer<()>,
    poll: Mutex<PollTimer>,
    tracker: TaskTracker,
    /// Last `remote.test_credentials` value as loaded, before the reset.
    credentials_requested: AtomicBool,
}

impl<B: GitBackend> SyncEngine<B> {
    pub fn new(
        backend: B,
        workspace: Arc<dyn Workspace>,
        notifier: Arc<dyn Notifier>,
        config: Arc<Config>,
        options: &EngineOptions,
    ) -> Self {
        let (config, requested) = take_credentials_request(config);
        let core = Arc::new(EngineCore {
            ops: GitOps::new(SerialGate::new(backend, workspace)),
            indicator: StatusIndicator::new(),
            reporter: Reporter::new(notifier),
            config: RwLock::new(config),
        });
        let tracker = TaskTracker::new();

        let commands = Command::ALL
            .into_iter()
            .map(|command| {
                let core = Arc::clone(&core);
                let debouncer = Debouncer::new(command.name(), options.debounce_delay, move |()| {
                    let core = Arc::clone(&core);
                    async move {
                        core.run_command(command).await;
                    }
                })
                .with_tracker(tracker.clone());
                (command, debouncer)
            })
            .collect();

        let status_core = Arc::clone(&core);
        let status_check = Debouncer::new("status-check", options.debounce_delay, move |()| {
            let core = Arc::clone(&status_core);
            async move {
                core.refresh_status().await;
            }
        })
        .with_tracker(tracker.clone());

        Self {
            core,
            commands,
            status_check,
            poll: Mutex::new(PollTimer::new(options.poll_period).with_tracker(tracker.clone())),
            tracker,
            credentials_requested: AtomicBool::new(requested),
        }
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore<B> {
        &self.core
    }

    #[must_use]
    pub fn config(&self) -> Arc<Config> {
        self.core.config()
    }

    #[must_use]
    pub fn indicator(&self) -> IndicatorState {
        self.core.indicator.state()
    }

    #[must_use]
    pub fn subscribe_indicator(&self) -> watch::Receiver<IndicatorState> {
        self.core.indicator.subscribe()
    }

    /// Startup: debounced status check, optional synced check, poll timer.
    pub fn start(&self) {
        let config = self.core.config();
        self.status_check.call(());
        if config.automation.auto_check_synced {
            self.spawn_check_synced();
        }
        self.restart_poll(&config);
    }

    /// Debounced trigger for a host command.
    pub fn trigger(&self, command: Command) {
        if let Some(debouncer) = self.commands.get(&command) {
            debouncer.call(());
        }
    }

    pub fn handle_event(&self, event: HostEvent) {
        let config = self.core.config();
        let automation = &config.automation;
        debug!(?event, "host event");
        match event {
            HostEvent::DocumentChanged if automation.check_on_change => self.status_check.call(()),
            HostEvent::DocumentChanged => {}
            HostEvent::RouteChanged => self.status_check.call(()),
            HostEvent::Visible if automation.auto_check_synced => self.spawn_check_synced(),
            HostEvent::Visible => {}
            HostEvent::Hidden if automation.auto_push_on_hide => {
                self.trigger(Command::CommitAndPush);
            }
            HostEvent::Hidden => {}
        }
    }

    /// Swap in a new settings snapshot and react to the changes that matter.
    ///
    /// `remote.test_credentials` is a momentary trigger: only a false→true
    /// edge between loaded snapshots runs the test. A value that stays true,
    /// as when a config file sets it, fires once at most. Stored snapshots
    /// always read false.
    pub fn apply_settings(&self, config: Config) {
        let (new, requested) = take_credentials_request(Arc::new(config));
        let old = self.core.replace_config(Arc::clone(&new));
        let was_requested = self.credentials_requested.swap(requested, Ordering::AcqRel);

        if requested && !was_requested {
            let core = Arc::clone(&self.core);
            self.tracker.spawn(async move {
                core.test_credentials().await;
            });
        }
        if old.automation.check_remote_periodically != new.automation.check_remote_periodically {
            self.restart_poll(&new);
        }
    }

    fn spawn_check_synced(&self) {
        let core = Arc::clone(&self.core);
        self.tracker.spawn(async move {
            core.check_synced().await;
        });
    }

    fn restart_poll(&self, config: &Config) {
        let mut poll = self
            .poll
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        poll.stop();
        if config.automation.check_remote_periodically {
            let core = Arc::clone(&self.core);
            poll.start(move || {
                let core = Arc::clone(&core);
                async move { core.poll_tick().await }
            });
        }
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poll
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_running()
    }

    /// Stop polling and wait for scheduled and running work to finish,
    /// including a poll tick already in progress.
    pub async fn shutdown(&self) {
        self.poll
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .stop();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

#[cfg(test)]
mod tests;
