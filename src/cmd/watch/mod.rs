// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Long-running `watch` command.
//!
//! ```text
//! stdin thread ──flume──┐
//! ctrl-c ───────────────┼──> select! loop ──> SyncEngine
//! indicator watch ──────┘          |
//!                                  v
//!                     stdout: {"event":"notice"|"indicator"|"toolbar",..}
//! ```
//!
//! Input is one instruction per line:
//!
//! ```text
//! changed | route | visible | hidden      host events
//! check | pull | commit-and-push | ...    debounced commands
//! reload                                 re-read settings
//! set section.key=value                  override a setting, then reload
//! toolbar                                emit the button catalog
//! ```

use std::io::BufRead;
use std::sync::Arc;

use flume::Receiver;
use tracing::{debug, info, warn};

use super::config::build_config_loader;
use crate::cli::global::GlobalOptions;
use crate::cli::run::WatchArgs;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::error::Result;
use crate::git::{GitBackend, Notice, RepositoryPath, ShellBackend};
use crate::sync::command::Command;
use crate::sync::{EngineOptions, HostEvent, JsonLinesNotifier, Notifier, SyncEngine};


/// Lines buffered between the stdin thread and the engine loop.
const INPUT_BUFFER: usize = 64;

/// The settings key whose `true` is consumed by a single reload.
const TEST_CREDENTIALS_KEY: &str = "remote.test_credentials";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Event(HostEvent),
    Command(Command),
    Reload,
    Set(String),
    Toolbar,
}

impl std::str::FromStr for Instruction {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        if let Some(option) = line.strip_prefix("set ") {
            return Ok(Self::Set(option.trim().to_string()));
        }
        match line {
            "reload" => return Ok(Self::Reload),
            "toolbar" => return Ok(Self::Toolbar),
            _ => {}
        }
        if let Ok(event) = line.parse() {
            return Ok(Self::Event(event));
        }
        Command::from_name(line)
            .map(Self::Command)
            .ok_or_else(|| format!("unrecognized input '{line}'"))
    }
}

/// Settings overrides accumulated from `set` lines.
#[derive(Debug, Default)]
struct Overrides(Vec<String>);

impl Overrides {
    fn push(&mut self, option: String) {
        self.0.push(option);
    }

    /// Drop the momentary credentials trigger once it has been applied.
    fn consume_trigger(&mut self) {
        self.0
            .retain(|option| !option.trim_start().starts_with(TEST_CREDENTIALS_KEY));
    }
}

/// Main handler for the watch command.
///
/// # Errors
///
/// Returns an error if `git` cannot be found.
pub async fn run_watch_command(
    args: &WatchArgs,
    global: &GlobalOptions,
    config: Config,
) -> Result<()> {
    let backend = ShellBackend::new()?;
    let workspace = Arc::new(RepositoryPath::new(config.global.repository.clone()));
    let sink = Arc::new(JsonLinesNotifier::stdout());
    let engine = SyncEngine::new(
        backend,
        workspace.clone(),
        sink.clone(),
        Arc::new(config),
        &EngineOptions::default(),
    );
    let session = Session {
        engine,
        sink,
        workspace,
        global,
        overrides: Overrides::default(),
    };
    session.run(!args.no_start, spawn_stdin_reader()).await;
    Ok(())
}

struct Session<'a, B: GitBackend> {
    engine: SyncEngine<B>,
    sink: Arc<JsonLinesNotifier<std::io::Stdout>>,
    workspace: Arc<RepositoryPath>,
    global: &'a GlobalOptions,
    overrides: Overrides,
}

impl<B: GitBackend> Session<'_, B> {
    async fn run(mut self, start: bool, lines: Receiver<String>) {
        let mut indicator = self.engine.subscribe_indicator();
        self.sink.indicator(*indicator.borrow_and_update());
        if start {
            self.engine.start();
        }
        info!("watching for host events");

        let interrupted = tokio::signal::ctrl_c();
        tokio::pin!(interrupted);
        loop {
            tokio::select! {
                signal = &mut interrupted => {
                    if let Err(e) = signal {
                        warn!(error = %e, "failed to listen for ctrl-c");
                    }
                    info!("interrupted");
                    break;
                }
                line = lines.recv_async() => {
                    let Ok(line) = line else {
                        debug!("stdin closed");
                        break;
                    };
                    self.handle_line(&line);
                }
                changed = indicator.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.sink.indicator(*indicator.borrow_and_update());
                }
            }
        }

        self.engine.shutdown().await;
        if indicator.has_changed().unwrap_or(false) {
            self.sink.indicator(*indicator.borrow_and_update());
        }
        info!("watch stopped");
    }

    fn handle_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match line.parse() {
            Ok(Instruction::Event(event)) => self.engine.handle_event(event),
            Ok(Instruction::Command(command)) => self.engine.trigger(command),
            Ok(Instruction::Toolbar) => {
                let config = self.engine.config();
                self.sink.toolbar(&Command::toolbar(&config.toolbar_commands()));
            }
            Ok(Instruction::Reload) => self.reload(),
            Ok(Instruction::Set(option)) => {
                self.overrides.push(option);
                self.reload();
            }
            Err(e) => warn!(input = line, "{e}"),
        }
    }

    fn reload(&mut self) {
        let loaded = build_config_loader(self.global, &self.overrides.0)
            .and_then(ConfigLoader::build);
        self.overrides.consume_trigger();
        match loaded {
            Ok(config) => {
                debug!("settings reloaded");
                self.workspace.set(config.global.repository.clone());
                self.engine.apply_settings(config);
            }
            Err(e) => {
                self.sink
                    .notify(&Notice::error(format!("Failed to reload settings: {e:#}")));
            }
        }
    }
}

/// Read stdin on a plain thread; the channel closes on EOF.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = flume::bounded(INPUT_BUFFER);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}
