use crate::core::app::EditorApp;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Undo the last edit in the active buffer
#[derive(Clone)]
pub struct Undo;

impl Command for Undo {
    fn execute(&self, app: &mut EditorApp, _args: &str) -> DispatchResult {
        match app.workspace.undo() {
            Ok(outcome) => DispatchResult::Info(format!("undone, cursor at {}", outcome.cursor)),
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "undo"
    }
}

/// Redo the last undone edit in the active buffer
#[derive(Clone)]
pub struct Redo;

impl Command for Redo {
    fn execute(&self, app: &mut EditorApp, _args: &str) -> DispatchResult {
        match app.workspace.redo() {
            Ok(outcome) => DispatchResult::Info(format!("redone, cursor at {}", outcome.cursor)),
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "redo"
    }
}
