// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Buttons | Run | Watch
//! ```

use std::process::ExitCode;

use gitsync::cli::{self, Command};
use gitsync::cmd::config::{load_config, run_buttons_command, run_options_command};
use gitsync::cmd::run::run_run_command;
use gitsync::cmd::watch::run_watch_command;
use gitsync::config::Config;
use gitsync::logging::{LogConfig, LogGuard, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match &cli.command {
        Some(Command::Version) | None => None,
        Some(_) => match load_config(&cli.global) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Failed to load config: {e:#}");
                return ExitCode::FAILURE;
            }
        },
    };

    let _log_guard = match start_logging(config.as_ref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn start_logging(config: Option<&Config>) -> gitsync::error::Result<LogGuard> {
    let log_config = config.map_or_else(LogConfig::default, build_log_config);
    init_logging(&log_config)
}

/// Logging settings come from the merged config, which already carries the
/// --log-level / --file-log-level / --log-file / --log-json overrides.
fn build_log_config(config: &Config) -> LogConfig {
    let global = &config.global;
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_json_console(global.log_json)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Option<Config>) -> ExitCode {
    let result = match (&cli.command, config) {
        (Some(Command::Version), _) => {
            handle_version_command();
            Ok(())
        }
        (Some(Command::Options), Some(config)) => {
            run_options_command(&config);
            Ok(())
        }
        (Some(Command::Buttons), Some(config)) => {
            run_buttons_command(&config);
            Ok(())
        }
        (Some(Command::Run(args)), Some(config)) => run_run_command(args, config).await,
        (Some(Command::Watch(args)), Some(config)) => {
            run_watch_command(args, &cli.global, config).await
        }
        (Some(_), None) => Err(anyhow::anyhow!("configuration was not loaded")),
        (None, _) => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}
