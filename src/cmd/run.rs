// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! One-shot `run` command.
//!
//! Runs one operation through the engine core, without debouncing. Notices
//! go to the log; the exit status reflects the operation's outcome.

use std::sync::Arc;

use anyhow::bail;
use clap::ValueEnum;
use tracing::info;

use crate::cli::run::{RunArgs, RunOp};
use crate::config::Config;
use crate::error::Result;
use crate::git::{RepositoryPath, ShellBackend};
use crate::sync::{EngineOptions, SyncEngine, TracingNotifier};

/// Main handler for the run command.
///
/// # Errors
///
/// Returns an error if `git` cannot be found or the operation fails.
pub async fn run_run_command(args: &RunArgs, config: Config) -> Result<()> {
    let backend = ShellBackend::new()?;
    let workspace = Arc::new(RepositoryPath::new(config.global.repository.clone()));
    let engine = SyncEngine::new(
        backend,
        workspace,
        Arc::new(TracingNotifier),
        Arc::new(config),
        &EngineOptions::default(),
    );
    let core = engine.core();

    let success = match (args.op, args.op.command()) {
        (_, Some(command)) => core.run_command(command).await.success(),
        (RunOp::TestCredentials, None) => core.test_credentials().await.success(),
        (RunOp::RemoteAhead, None) => {
            let ahead = core.check_synced().await;
            println!("{}", if ahead { "ahead" } else { "up-to-date" });
            true
        }
        (op, None) => bail!("{op:?} has no runner"),
    };
    info!(state = %engine.indicator(), "indicator");

    if !success {
        let name = args
            .op
            .to_possible_value()
            .map_or_else(String::new, |value| value.get_name().to_string());
        bail!("{name} failed");
    }
    Ok(())
}
