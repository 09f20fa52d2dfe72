// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Restartable periodic timer.
//!
//! ```text
//! start(tick) ──> stop() previous ──> spawn loop
//!                                      select! {
//!                                        cancelled => break
//!                                        interval.tick() => tick().await
//!                                      }
//! ```
//!
//! The first tick fires one full period after `start`. Ticks never overlap:
//! a slow tick delays the next one. With a tracker, waiting on it covers a
//! tick that is still running after `stop`.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

/// Period of the remote-ahead poll.
pub const REMOTE_POLL_PERIOD: Duration = Duration::from_secs(5 * 60);

/// At most one live periodic task.
#[derive(Debug)]
pub struct PollTimer {
    period: Duration,
    running: Option<(CancellationToken, JoinHandle<()>)>,
    tracker: Option<TaskTracker>,
}

impl PollTimer {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            running: None,
            tracker: None,
        }
    }

    /// Spawn the tick loop on `tracker`.
    #[must_use]
    pub fn with_tracker(mut self, tracker: TaskTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Start ticking, replacing any running timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(&mut self, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let period = self.period;
        let ticking = async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = interval.tick() => tick().await,
                }
            }
        };
        let handle = match &self.tracker {
            Some(tracker) => tracker.spawn(ticking),
            None => tokio::spawn(ticking),
        };
        debug!(period_secs = period.as_secs(), "poll timer started");
        self.running = Some((token, handle));
    }

    /// Stop the running timer. A tick already in progress is left to finish.
    pub fn stop(&mut self) {
        if let Some((token, _handle)) = self.running.take() {
            token.cancel();
            debug!("poll timer stopped");
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
