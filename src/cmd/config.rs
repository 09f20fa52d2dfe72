// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config loading and the config-related commands.

use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::error::Result;
use crate::sync::command::Command;

/// Config file read from the current directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "gitsync.toml";

/// Environment prefix for `GITSYNC_SECTION__KEY` overrides.
pub const ENV_PREFIX: &str = "GITSYNC";

/// Assemble the layered loader for `global`, then apply `extra` overrides
/// after the command-line ones.
///
/// # Errors
///
/// Returns an error if an override is malformed.
pub fn build_config_loader(global: &GlobalOptions, extra: &[String]) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides().iter().chain(extra) {
        loader = loader.set_override(option)?;
    }
    Ok(loader)
}

/// Load the configuration for `global`.
///
/// # Errors
///
/// Returns an error if a file is missing or invalid, or validation fails.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global, &[])?.build()
}

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display the button catalog; `*` marks the configured toolbar.
pub fn run_buttons_command(config: &Config) {
    for button in Command::toolbar(&config.toolbar_commands()) {
        let mark = if button.selected { '*' } else { ' ' };
        let keybinding = button.keybinding.unwrap_or("");
        println!(
            "{mark} {:<14} {:<22} {:<16} {keybinding}",
            button.key,
            button.title,
            button.command.name()
        );
    }
}
