// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Trailing-edge debouncer.
//!
//! ```text
//! call(a1) ──┐ cancel
//! call(a2) ──┼──┐ cancel
//! call(a3) ──┴──┴──> sleep(delay) ──> action(a3)
//! ```
//!
//! Each call cancels the previous schedule and arms a new one. Once the
//! action has started it runs to completion regardless of later calls.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::trace;

/// Quiet period used for every host-facing command.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

/// Collapses a burst of calls into one delayed call with the last arguments.
pub struct Debouncer<A> {
    name: &'static str,
    delay: Duration,
    action: Action<A>,
    pending: Mutex<Option<CancellationToken>>,
    tracker: Option<TaskTracker>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(name: &'static str, delay: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            delay,
            action: Arc::new(move |args| -> BoxFuture<'static, ()> { Box::pin(action(args)) }),
            pending: Mutex::new(None),
            tracker: None,
        }
    }

    /// Spawn scheduled calls on `tracker`, so waiting on it covers calls that
    /// are still in their quiet period.
    #[must_use]
    pub fn with_tracker(mut self, tracker: TaskTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Schedule the action with `args`, replacing any pending schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&self, args: A) {
        let token = CancellationToken::new();
        if let Some(previous) = self.slot().replace(token.clone()) {
            previous.cancel();
        }

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let name = self.name;
        let scheduled = async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    trace!(debounce = name, "superseded");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }
            trace!(debounce = name, "firing");
            action(args).await;
        };
        match &self.tracker {
            Some(tracker) => drop(tracker.spawn(scheduled)),
            None => drop(tokio::spawn(scheduled)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let slot = self
            .pending
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(token) = slot.take() {
            token.cancel();
        }
    }
}
