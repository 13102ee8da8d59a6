use tracing::debug;

use crate::core::app::EditorApp;

/// Result of command dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Command executed successfully, nothing to report
    Success,
    /// Informational message to display
    Info(String),
    /// Command failed; the message says why
    Error(String),
    /// Command not found/handled
    NotHandled,
    /// Exit requested
    Exit,
}

impl DispatchResult {
    pub fn error(err: impl std::fmt::Display) -> Self {
        DispatchResult::Error(err.to_string())
    }
}

/// Split a command line into the command name and its argument text.
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim_start()),
        None => (line, ""),
    }
}

/// Command dispatcher for EditorApp (Command Pattern architecture)
///
/// Resolves aliases through the config, looks the command up in the
/// registry and executes it. A blank line is a successful no-op.
pub fn dispatch(app: &mut EditorApp, line: &str) -> DispatchResult {
    let (name, args) = split_command(line);
    if name.is_empty() {
        return DispatchResult::Success;
    }

    let command_name = app.config.resolve(name).to_string();
    let Some(command_obj) = app.command_registry.get(&command_name).cloned() else {
        debug!(command = name, "command not found in registry");
        return DispatchResult::NotHandled;
    };

    debug!(command = %command_name, args, "dispatch");
    command_obj.execute(app, args)
}
