//! The interactive read-dispatch-print loop.
//!
//! One command per input line, run to completion before the next is read.
//! Generic over reader and writer so scripts and tests can drive it the same
//! way a terminal does.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::core::app::EditorApp;
use crate::core::dispatcher::{DispatchResult, dispatch, split_command};

const PROMPT: &str = "> ";

/// Run commands from `input` until `exit` or end of input, then save the
/// workspace memento.
///
/// Command failures are printed and the loop carries on. Only I/O errors on
/// `input`/`output` end it early.
pub fn run_interactive<R: BufRead, W: Write>(
    app: &mut EditorApp,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "ledit {}, type 'help' for commands", env!("CARGO_PKG_VERSION"))?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match dispatch(app, &line) {
            DispatchResult::Success => {}
            DispatchResult::Info(msg) => writeln!(output, "{msg}")?,
            DispatchResult::Error(msg) => writeln!(output, "error: {msg}")?,
            DispatchResult::NotHandled => {
                let (name, _) = split_command(&line);
                writeln!(output, "unknown command '{name}', type 'help' for commands")?;
            }
            DispatchResult::Exit => break,
        }

        if app.show_active() {
            let active = app
                .workspace
                .active_buffer()
                .map(|b| b.display_name())
                .unwrap_or_else(|| "none".to_string());
            writeln!(output, "[debug] active file: {active}")?;
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    if let Err(err) = app.save_session() {
        warn!(error = %err, "failed to save workspace state");
        writeln!(output, "error: could not save workspace state: {err}")?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app_in(dir: &std::path::Path) -> EditorApp {
        let mut config = Config::new();
        crate::user_config::configure(&mut config);
        config.set(
            "state_file",
            dir.join("state.json").to_string_lossy().into_owned(),
        );
        EditorApp::with_config(config)
    }

    fn run_script(app: &mut EditorApp, script: &str) -> String {
        let mut out = Vec::new();
        run_interactive(app, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let out = run_script(&mut app, "undo\nlog-show\nfrobnicate\nhelp\n");
        assert_eq!(out.matches("error: no active buffer").count(), 2);
        assert!(out.contains("unknown command 'frobnicate'"));
        assert!(!out.contains("unknown command 'log-show'"));
        assert!(out.contains("commands:"));
    }

    #[test]
    fn test_exit_stops_reading_and_saves_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let mut app = app_in(dir.path());
        let script = format!("init {}\nexit\nappend \"never\"\n", file.display());
        run_script(&mut app, &script);

        let buffer = app.workspace.active_buffer().unwrap();
        assert_eq!(buffer.serialize_content(), "");
        assert!(dir.path().join("state.json").exists());
    }

    #[test]
    fn test_debug_prints_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.config.set("show_active", true);
        let out = run_script(&mut app, "editor-list\n");
        assert!(out.contains("[debug] active file: none"));
    }
}
