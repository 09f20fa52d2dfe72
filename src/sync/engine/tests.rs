// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use super::{AUTO_PULL_NOTICE, EngineOptions, HostEvent, REMOTE_AHEAD_NOTICE, SyncEngine};
use crate::config::Config;
use crate::git::fake::FakeBackend;
use crate::git::{CommandResult, NoticeLevel, OutcomeKind, RepositoryPath};
use crate::sync::command::Command;
use crate::sync::indicator::IndicatorState;
use crate::sync::notify::MemoryNotifier;

const SETTLE: Duration = Duration::from_millis(600);
const POLL: Duration = Duration::from_secs(300);

struct Harness {
    fake: FakeBackend,
    notices: Arc<MemoryNotifier>,
    engine: SyncEngine<FakeBackend>,
}

fn harness(config: Config) -> Harness {
    let fake = FakeBackend::new();
    let notices = Arc::new(MemoryNotifier::default());
    let engine = SyncEngine::new(
        fake.clone(),
        Arc::new(RepositoryPath::new(None)),
        notices.clone(),
        Arc::new(config),
        &EngineOptions::default(),
    );
    Harness {
        fake,
        notices,
        engine,
    }
}

fn config(edit: impl FnOnce(&mut Config)) -> Config {
    let mut config = Config::default();
    edit(&mut config);
    config
}

fn dirty() -> CommandResult {
    CommandResult::ok(" M pages/today.md\n")
}

fn remote_ahead(fake: &FakeBackend) {
    fake.respond("rev-list", CommandResult::ok("2\n"));
}

// --- Commands ---

#[tokio::test(start_paused = true)]
async fn test_check_on_dirty_tree() {
    let h = harness(Config::default());
    h.fake.respond("status --porcelain", dirty());

    let outcome = h.engine.core().run_command(Command::Check).await;
    assert!(outcome.success());
    assert_eq!(h.engine.indicator(), IndicatorState::Active);

    let notices = h.notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert!(notices[0].persistent);
    insta::assert_snapshot!(notices[0].message, @r"
    Changes detected:
     M pages/today.md
    ");
}

#[tokio::test(start_paused = true)]
async fn test_check_twice_is_stable() {
    let h = harness(Config::default());
    h.engine.core().run_command(Command::Check).await;
    h.engine.core().run_command(Command::Check).await;

    assert_eq!(h.engine.indicator(), IndicatorState::Inactive);
    assert_eq!(
        h.notices.messages(),
        vec!["No changes detected.", "No changes detected."]
    );
}

#[tokio::test(start_paused = true)]
async fn test_commit_and_push_on_clean_tree_does_nothing() {
    let h = harness(config(|c| c.automation.auto_pull_before_push = false));

    let outcome = h.engine.core().run_command(Command::CommitAndPush).await;
    assert!(outcome.success());
    assert_eq!(h.fake.count("commit"), 0);
    assert_eq!(h.fake.count("push"), 0);
    insta::assert_debug_snapshot!(h.fake.calls(), @r#"
    [
        "status --porcelain",
        "status --porcelain",
    ]
    "#);
    assert!(h.notices.notices().is_empty());
    assert_eq!(h.engine.indicator(), IndicatorState::Inactive);
}

#[tokio::test(start_paused = true)]
async fn test_commit_and_push_pulls_first_when_remote_ahead() {
    let h = harness(Config::default());
    remote_ahead(&h.fake);
    h.fake.respond("status --porcelain", dirty());

    let outcome = h.engine.core().run_command(Command::CommitAndPush).await;
    assert!(outcome.success());

    let mut calls = h.fake.calls();
    let commit = calls
        .iter()
        .position(|c| c.starts_with("commit -m "))
        .unwrap();
    calls[commit] = "commit -m <message>".to_string();
    insta::assert_debug_snapshot!(calls, @r#"
    [
        "fetch",
        "rev-list HEAD..@{upstream} --count",
        "pull --rebase",
        "status --porcelain",
        "add .",
        "commit -m <message>",
        "push",
        "status --porcelain",
    ]
    "#);
    assert_eq!(h.fake.count("pull --rebase"), 1);
    assert_eq!(
        h.notices.messages(),
        vec![
            "Remote has changes, pulling before push...",
            "Git commit success",
            "Git push success",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_commit_failure_skips_push() {
    let h = harness(config(|c| c.automation.auto_pull_before_push = false));
    h.fake.respond("status --porcelain", dirty());
    h.fake
        .respond("commit", CommandResult::new(1, "nothing to commit", ""));

    let outcome = h.engine.core().run_command(Command::CommitAndPush).await;
    assert_eq!(outcome.kind, OutcomeKind::CommandFailure);
    assert_eq!(h.fake.count("push"), 0);
    assert_eq!(
        h.notices.messages(),
        vec!["Git commit failed\nnothing to commit"]
    );
    // The closing refresh still ran.
    assert_eq!(h.engine.indicator(), IndicatorState::Active);
}

#[tokio::test(start_paused = true)]
async fn test_mutating_command_shows_loading_until_refresh() {
    let h = harness(Config::default());
    h.fake.delay(Duration::from_millis(50));
    let mut rx = h.engine.subscribe_indicator();

    let run = h.engine.core().run_command(Command::Pull);
    let watch = async {
        rx.changed().await.unwrap();
        *rx.borrow_and_update()
    };
    let (outcome, first) = tokio::join!(run, watch);

    assert!(outcome.success());
    assert_eq!(first, IndicatorState::Loading);
    assert_eq!(h.engine.indicator(), IndicatorState::Inactive);
    assert_eq!(h.notices.messages(), vec!["Git pull success"]);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_trigger_collapses_burst() {
    let h = harness(Config::default());
    for _ in 0..5 {
        h.engine.trigger(Command::Push);
        sleep(Duration::from_millis(100)).await;
    }
    sleep(SETTLE).await;
    assert_eq!(h.fake.count("push"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_distinct_commands_do_not_cancel_each_other() {
    let h = harness(Config::default());
    h.engine.trigger(Command::Pull);
    h.engine.trigger(Command::Log);
    sleep(SETTLE).await;
    assert_eq!(h.fake.count("pull"), 1);
    assert_eq!(h.fake.count("log"), 1);
}

// --- Host events ---

#[tokio::test(start_paused = true)]
async fn test_route_burst_runs_one_status_check() {
    let h = harness(Config::default());
    h.fake.respond("status --porcelain", dirty());
    for _ in 0..4 {
        h.engine.handle_event(HostEvent::RouteChanged);
    }
    sleep(SETTLE).await;
    assert_eq!(h.fake.calls(), vec!["status --porcelain"]);
    assert_eq!(h.engine.indicator(), IndicatorState::Active);
    assert!(h.notices.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_document_change_respects_check_on_change() {
    let h = harness(config(|c| c.automation.check_on_change = false));
    h.engine.handle_event(HostEvent::DocumentChanged);
    sleep(SETTLE).await;
    assert!(h.fake.calls().is_empty());

    h.engine
        .apply_settings(config(|c| c.automation.check_on_change = true));
    h.engine.handle_event(HostEvent::DocumentChanged);
    sleep(SETTLE).await;
    assert_eq!(h.fake.calls(), vec!["status --porcelain"]);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_commits_and_pushes_when_enabled() {
    let h = harness(config(|c| {
        c.automation.auto_push_on_hide = true;
        c.automation.auto_pull_before_push = false;
    }));
    h.fake.respond("status --porcelain", dirty());

    h.engine.handle_event(HostEvent::Hidden);
    sleep(SETTLE).await;
    assert_eq!(h.fake.count("commit"), 1);
    assert_eq!(h.fake.count("push"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_ignored_by_default() {
    let h = harness(Config::default());
    h.engine.handle_event(HostEvent::Hidden);
    sleep(SETTLE).await;
    assert!(h.fake.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_visible_warns_when_remote_ahead() {
    let h = harness(config(|c| c.automation.auto_check_synced = true));
    remote_ahead(&h.fake);

    h.engine.handle_event(HostEvent::Visible);
    h.engine.shutdown().await;

    let notices = h.notices.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, REMOTE_AHEAD_NOTICE);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert!(notices[0].persistent);
    assert_eq!(h.fake.count("pull"), 0);
}

// --- Startup and polling ---

#[tokio::test(start_paused = true)]
async fn test_start_with_defaults_checks_status_only() {
    let h = harness(Config::default());
    h.engine.start();
    assert!(!h.engine.is_polling());
    sleep(SETTLE).await;
    assert_eq!(h.fake.calls(), vec!["status --porcelain"]);
}

#[tokio::test(start_paused = true)]
async fn test_start_with_sync_check_and_poll() {
    let h = harness(config(|c| {
        c.automation.auto_check_synced = true;
        c.automation.check_remote_periodically = true;
    }));
    h.engine.start();
    assert!(h.engine.is_polling());
    sleep(SETTLE).await;

    assert_eq!(h.fake.count("fetch"), 1);
    assert_eq!(h.fake.count("status --porcelain"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_poll_tick_warns_and_auto_pulls() {
    let h = harness(config(|c| {
        c.automation.check_remote_periodically = true;
        c.automation.auto_pull_on_remote_change = true;
    }));
    remote_ahead(&h.fake);
    h.engine.start();
    sleep(SETTLE).await;
    h.fake.clear_calls();

    sleep(POLL).await;
    insta::assert_debug_snapshot!(h.fake.calls(), @r#"
    [
        "fetch",
        "rev-list HEAD..@{upstream} --count",
        "pull --rebase",
        "status --porcelain",
    ]
    "#);
    assert_eq!(
        h.notices.messages(),
        vec![
            REMOTE_AHEAD_NOTICE,
            AUTO_PULL_NOTICE,
            "Git pull --rebase success",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_poll_tick_quiet_when_up_to_date() {
    let h = harness(config(|c| c.automation.check_remote_periodically = true));
    h.engine.start();
    sleep(SETTLE + POLL).await;

    assert_eq!(h.fake.count("fetch"), 1);
    assert_eq!(h.fake.count("pull"), 0);
    assert!(h.notices.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_settings_toggle_poll() {
    let h = harness(Config::default());
    h.engine.start();
    assert!(!h.engine.is_polling());

    h.engine
        .apply_settings(config(|c| c.automation.check_remote_periodically = true));
    assert!(h.engine.is_polling());

    h.engine.apply_settings(Config::default());
    assert!(!h.engine.is_polling());
    sleep(POLL * 2).await;
    assert_eq!(h.fake.count("fetch"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_settings_credentials_trigger() {
    let h = harness(Config::default());
    h.engine.apply_settings(config(|c| c.remote.test_credentials = true));
    h.engine.shutdown().await;

    assert!(!h.engine.config().remote.test_credentials);
    assert_eq!(h.fake.count("ls-remote"), 0);
    insta::assert_snapshot!(h.notices.messages().join("\n"), @"missing required fields: username, password, owner, repo. Fill in [remote] host, username, password, owner and repo.");
}

#[tokio::test(start_paused = true)]
async fn test_settings_credentials_held_true_fires_once() {
    let h = harness(Config::default());
    for _ in 0..3 {
        h.engine.apply_settings(config(|c| c.remote.test_credentials = true));
    }
    h.engine.shutdown().await;

    assert_eq!(h.notices.notices().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_settings_credentials_true_at_startup_waits_for_edge() {
    let h = harness(config(|c| c.remote.test_credentials = true));
    assert!(!h.engine.config().remote.test_credentials);

    h.engine.apply_settings(config(|c| c.remote.test_credentials = true));
    sleep(SETTLE).await;
    assert!(h.notices.notices().is_empty());

    h.engine.apply_settings(Config::default());
    h.engine.apply_settings(config(|c| c.remote.test_credentials = true));
    h.engine.shutdown().await;
    assert_eq!(h.notices.notices().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_settings_without_trigger_skip_credentials() {
    let h = harness(Config::default());
    h.engine
        .apply_settings(config(|c| c.automation.check_on_change = false));
    h.engine.shutdown().await;
    assert!(h.notices.notices().is_empty());
    assert!(h.fake.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_drains_pending_trigger() {
    let h = harness(Config::default());
    h.engine.trigger(Command::Checkout);
    h.engine.shutdown().await;
    assert_eq!(h.fake.count("checkout ."), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_waits_for_running_poll_tick() {
    let h = harness(config(|c| {
        c.automation.check_remote_periodically = true;
        c.automation.auto_pull_on_remote_change = true;
    }));
    remote_ahead(&h.fake);
    h.engine.start();
    sleep(SETTLE).await;
    h.fake.clear_calls();
    h.fake.delay(Duration::from_secs(10));

    sleep(POLL).await;
    assert_eq!(h.fake.calls(), vec!["fetch"], "tick in flight");

    h.engine.shutdown().await;
    insta::assert_debug_snapshot!(h.fake.calls(), @r#"
    [
        "fetch",
        "rev-list HEAD..@{upstream} --count",
        "pull --rebase",
        "status --porcelain",
    ]
    "#);
    assert_eq!(
        h.notices.messages().last().map(String::as_str),
        Some("Git pull --rebase success")
    );
}

#[test]
fn test_host_event_parse() {
    assert_eq!("changed".parse::<HostEvent>(), Ok(HostEvent::DocumentChanged));
    assert_eq!(" route ".parse::<HostEvent>(), Ok(HostEvent::RouteChanged));
    assert_eq!("visible".parse::<HostEvent>(), Ok(HostEvent::Visible));
    assert_eq!("hidden".parse::<HostEvent>(), Ok(HostEvent::Hidden));
    assert_eq!(
        "closed".parse::<HostEvent>(),
        Err("unknown host event 'closed'".to_string())
    );
}
