// ledit Configuration
// Edit this file to change the built-in defaults, then rebuild

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Aliases
    config.alias("ls", "editor-list");
    config.alias("q", "exit");
    config.alias("quit", "exit");
    config.alias("w", "save");
    config.alias("u", "undo");
    config.alias("r", "redo");
    config.alias("o", "load");
    config.alias("?", "help");

    // =========================================================================
    // SESSION
    // =========================================================================
    // Where the list of open files is kept between runs.
    // CLI override: -s/--state, LEDIT_STATE
    config.set("state_file", "./workspace_state.json");

    // Reopen the files from the previous run on start-up
    // CLI override: --no-restore
    config.set("restore_session", true);

    // =========================================================================
    // EDITING
    // =========================================================================
    config.set("undo_limit", 10_000i64); // Undo steps kept per buffer

    // Print the active file after every command
    // CLI override: -d/--debug
    config.set("show_active", false);
}
