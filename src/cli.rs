//! Command-line argument parsing for ledit.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and the way they override the built-in configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigValue};

/// ledit - a multi-buffer line editor driven by typed commands
#[derive(Debug, Default, Parser)]
#[command(name = "ledit", version, about)]
pub struct Cli {
    /// File(s) to open after the previous session is restored
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Workspace state file
    #[arg(short = 's', long = "state", value_name = "PATH", env = "LEDIT_STATE")]
    pub state: Option<PathBuf>,

    /// Start with no files open instead of restoring the last session
    #[arg(long)]
    pub no_restore: bool,

    /// Print the active file after every command
    #[arg(short, long)]
    pub debug: bool,

    /// Undo steps kept per buffer
    #[arg(long, value_name = "N")]
    pub undo_limit: Option<usize>,

    /// Diagnostic log filter, e.g. `debug` or `ledit::core=trace`
    #[arg(long, value_name = "DIRECTIVE", env = "LEDIT_LOG")]
    pub log: Option<String>,
}

impl Cli {
    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(state) = &self.state {
            config.set(
                "state_file",
                ConfigValue::String(state.to_string_lossy().into_owned()),
            );
        }
        if self.no_restore {
            config.set("restore_session", false);
        }
        if self.debug {
            config.set("show_active", true);
        }
        if let Some(limit) = self.undo_limit {
            config.set("undo_limit", i64::try_from(limit).unwrap_or(i64::MAX));
        }
    }
}
