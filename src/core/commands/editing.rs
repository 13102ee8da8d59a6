use crate::core::app::EditorApp;
/// Position-addressed editing commands
use crate::core::command::Command;
use crate::core::commands::{next_token, parse_payload, parse_position, parse_positive, parse_range};
use crate::core::dispatcher::DispatchResult;
use crate::core::edit::{EditOp, EditOutcome};

/// Run `op` on the active buffer and describe what happened
fn apply(app: &mut EditorApp, op: EditOp) -> DispatchResult {
    let kind = op.kind();
    match app.workspace.apply_edit(op) {
        Ok(EditOutcome { lines, cursor }) => DispatchResult::Info(format!(
            "{kind}: lines {}-{} affected, cursor at {cursor}",
            lines.start(),
            lines.end()
        )),
        Err(err) => DispatchResult::error(err),
    }
}

/// insert <line:col> "text"
#[derive(Clone)]
pub struct Insert;

impl Command for Insert {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let (pos, rest) = next_token(args);
        let parsed = parse_position(pos).and_then(|at| Ok((at, parse_payload(rest)?)));
        match parsed {
            Ok((at, text)) => apply(app, EditOp::Insert { at, text }),
            Err(msg) => DispatchResult::Error(format!("{msg}\nusage: {}", self.usage())),
        }
    }

    fn usage(&self) -> &'static str {
        "insert <line:col> \"text\""
    }
}

/// delete <line:col> <len>
#[derive(Clone)]
pub struct Delete;

impl Command for Delete {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let (pos, rest) = next_token(args);
        let (len, extra) = next_token(rest);
        if !extra.is_empty() {
            return DispatchResult::Error(format!("usage: {}", self.usage()));
        }
        let parsed = parse_position(pos).and_then(|at| Ok((at, parse_positive(len, "len")?)));
        match parsed {
            Ok((at, len)) => apply(app, EditOp::Delete { at, len }),
            Err(msg) => DispatchResult::Error(format!("{msg}\nusage: {}", self.usage())),
        }
    }

    fn usage(&self) -> &'static str {
        "delete <line:col> <len>"
    }
}

/// replace <line:col> <len> "text"
#[derive(Clone)]
pub struct Replace;

impl Command for Replace {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let (pos, rest) = next_token(args);
        let (len, rest) = next_token(rest);
        let parsed = parse_position(pos).and_then(|at| {
            let len = parse_positive(len, "len")?;
            Ok((at, len, parse_payload(rest)?))
        });
        match parsed {
            Ok((at, len, text)) => apply(app, EditOp::Replace { at, len, text }),
            Err(msg) => DispatchResult::Error(format!("{msg}\nusage: {}", self.usage())),
        }
    }

    fn usage(&self) -> &'static str {
        "replace <line:col> <len> \"text\""
    }
}

/// append "text"
#[derive(Clone)]
pub struct Append;

impl Command for Append {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        match parse_payload(args) {
            Ok(text) => apply(app, EditOp::Append { text }),
            Err(msg) => DispatchResult::Error(format!("{msg}\nusage: {}", self.usage())),
        }
    }

    fn usage(&self) -> &'static str {
        "append \"text\""
    }
}

/// show [<start:end>] - whole buffer without a range
#[derive(Clone)]
pub struct Show;

impl Command for Show {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let Some(buffer) = app.workspace.active_buffer() else {
            return DispatchResult::error(crate::core::error::WorkspaceError::NoActiveBuffer);
        };

        let (token, _) = next_token(args);
        let range = if token.is_empty() {
            Ok((1, buffer.line_count()))
        } else {
            parse_range(token)
        };
        let (start, end) = match range {
            Ok(range) => range,
            Err(msg) => return DispatchResult::Error(format!("{msg}\nusage: {}", self.usage())),
        };

        match buffer.show(start, end) {
            Ok(lines) => DispatchResult::Info(
                lines
                    .map(|(n, text)| format!("{n}: {text}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "show [<start:end>]"
    }
}
