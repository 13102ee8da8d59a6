//! This module defines the central `EditorApp` structure, which owns the
//! workspace of open buffers, the storage behind it, the configuration and
//! the command registry.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::core::command::Command;
use crate::core::error::WorkspaceError;
use crate::core::history::MAX_UNDO_DEPTH;
use crate::core::storage::LocalStorage;
use crate::core::workspace::Workspace;

/// State file used when the config does not name one
pub const DEFAULT_STATE_FILE: &str = "./workspace_state.json";

/// EditorApp: The root application state the interactive loop drives.
pub struct EditorApp {
    /// Open buffers and the active one
    pub workspace: Workspace,
    /// File contents and the session memento on disk
    pub storage: LocalStorage,
    pub config: Config,
    /// Registry of commands implementing the Command pattern
    pub command_registry: HashMap<String, Box<dyn Command>>,
}

impl EditorApp {
    /// App with the built-in configuration and every command registered.
    pub fn new() -> Self {
        let mut config = Config::new();
        crate::user_config::configure(&mut config);
        Self::with_config(config)
    }

    /// App built from `config`, with no files open.
    pub fn with_config(config: Config) -> Self {
        let undo_limit = config
            .get_usize("undo_limit")
            .unwrap_or(MAX_UNDO_DEPTH);
        let state_file = config
            .get_string("state_file")
            .unwrap_or(DEFAULT_STATE_FILE)
            .to_string();

        let mut app = Self {
            workspace: Workspace::with_undo_limit(undo_limit),
            storage: LocalStorage::new(state_file),
            config,
            command_registry: HashMap::new(),
        };
        crate::core::commands::register_all(&mut app);
        app
    }

    /// Initialize an EditorApp with config settings and initial files.
    ///
    /// Restores the previous session when the config asks for it, then
    /// opens `files` on top. Failures are logged and skipped so start-up
    /// always yields a usable editor.
    pub fn initialize_with_config(config: &Config, files: &[PathBuf]) -> Self {
        let mut app = Self::with_config(config.clone());

        if app.config.get_bool("restore_session").unwrap_or(true) {
            if let Err(err) = app.restore_session() {
                warn!(error = %err, "could not restore previous session");
            }
        }

        for path in files {
            if let Err(err) = app.workspace.load(&app.storage, path) {
                warn!(path = %path.display(), error = %err, "could not open file");
            }
        }

        app
    }

    /// Reopen the buffers recorded in the state file. Returns false when
    /// there was nothing to restore.
    pub fn restore_session(&mut self) -> Result<bool, WorkspaceError> {
        let Some(memento) = self.storage.load_memento()? else {
            return Ok(false);
        };
        self.workspace.restore(&memento);
        info!(state = %self.storage.state_file().display(), "session restored");
        Ok(true)
    }

    /// Record the open buffers in the state file.
    pub fn save_session(&self) -> Result<(), WorkspaceError> {
        self.storage.save_memento(&self.workspace.create_memento())
    }

    /// Whether the loop should print the active file after each command
    pub fn show_active(&self) -> bool {
        self.config.get_bool("show_active").unwrap_or(false)
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}
