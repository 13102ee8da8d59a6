use crate::core::app::EditorApp;
/// Edit log sidecar commands
use crate::core::command::Command;
use crate::core::commands::optional_path;
use crate::core::dispatcher::DispatchResult;
use crate::core::error::WorkspaceError;
use crate::core::log_sink::log_path_for;

fn set_logging(app: &mut EditorApp, args: &str, enabled: bool) -> DispatchResult {
    let path = optional_path(args);
    match app.workspace.target_mut(path.as_deref()) {
        Ok(buffer) => {
            buffer.set_log_enabled(enabled);
            let state = if enabled { "on" } else { "off" };
            DispatchResult::Info(format!("logging {state} for {}", buffer.display_name()))
        }
        Err(err) => DispatchResult::error(err),
    }
}

/// log-on [<file>]
#[derive(Clone)]
pub struct LogOn;

impl Command for LogOn {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        set_logging(app, args, true)
    }

    fn usage(&self) -> &'static str {
        "log-on [<file>]"
    }
}

/// log-off [<file>]
#[derive(Clone)]
pub struct LogOff;

impl Command for LogOff {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        set_logging(app, args, false)
    }

    fn usage(&self) -> &'static str {
        "log-off [<file>]"
    }
}

/// log-show [<file>] - print the edit log of a buffer
#[derive(Clone)]
pub struct LogShow;

impl Command for LogShow {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let path = optional_path(args);
        let file = app.workspace.target(path.as_deref()).and_then(|id| {
            app.workspace
                .get(id)
                .map(|b| b.path().to_path_buf())
                .ok_or(WorkspaceError::NoActiveBuffer)
        });
        let file = match file {
            Ok(file) => file,
            Err(err) => return DispatchResult::error(err),
        };

        match app.storage.read_log(&file) {
            Ok(Some(log)) => DispatchResult::Info(log.trim_end().to_string()),
            Ok(None) => DispatchResult::Info(format!(
                "no log yet at {}",
                log_path_for(&file).display()
            )),
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "log-show [<file>]"
    }
}

#[cfg(test)]
mod tests {
    use crate::core::app::EditorApp;
    use crate::core::dispatcher::{DispatchResult, dispatch};

    #[test]
    fn test_log_on_records_edits() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        let mut app = EditorApp::new();
        dispatch(&mut app, &format!("init {}", file.display()));

        assert!(matches!(
            dispatch(&mut app, "log-show"),
            DispatchResult::Info(msg) if msg.starts_with("no log yet")
        ));

        dispatch(&mut app, "log-on");
        dispatch(&mut app, "append \"one\"");
        dispatch(&mut app, "insert 2:1 \">\"");
        dispatch(&mut app, "log-off");
        dispatch(&mut app, "append \"unlogged\"");

        let DispatchResult::Info(log) = dispatch(&mut app, "log-show") else {
            panic!("log-show failed");
        };
        let entries: Vec<&str> = log.lines().map(|l| &l[18..]).collect();
        assert_eq!(
            entries,
            vec!["session start", r#"append "one""#, r#"insert 2:1 ">""#]
        );
    }

    #[test]
    fn test_log_on_unknown_file() {
        let mut app = EditorApp::new();
        assert_eq!(
            dispatch(&mut app, "log-on nope.txt"),
            DispatchResult::Error("nope.txt is not open".to_string())
        );
    }

    #[test]
    fn test_log_show_without_buffer_is_an_error() {
        let mut app = EditorApp::new();
        assert_eq!(
            dispatch(&mut app, "log-show"),
            DispatchResult::Error("no active buffer".to_string())
        );
        assert_eq!(
            dispatch(&mut app, "log-show nope.txt"),
            DispatchResult::Error("nope.txt is not open".to_string())
        );
    }
}
