use std::path::{Path, PathBuf};

use crate::core::app::EditorApp;
/// File and buffer operation commands
use crate::core::command::Command;
use crate::core::commands::{next_token, optional_path};
use crate::core::dispatcher::DispatchResult;
use crate::core::error::WorkspaceError;

fn modified_label(modified: bool) -> &'static str {
    if modified { "modified" } else { "unmodified" }
}

/// load <file> - open a file, or switch to it if it is already open
#[derive(Clone)]
pub struct Load;

impl Command for Load {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let Some(path) = optional_path(args) else {
            return DispatchResult::Error(format!("usage: {}", self.usage()));
        };
        match app.workspace.load(&app.storage, &path) {
            Ok(id) => {
                let modified = app.workspace.get(id).is_some_and(|b| b.is_modified());
                DispatchResult::Info(format!(
                    "loaded {} ({})",
                    path.display(),
                    modified_label(modified)
                ))
            }
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "load <file>"
    }
}

/// save [<file>|all] - write the active, named or every buffer
#[derive(Clone)]
pub struct Save;

impl Command for Save {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let (token, _) = next_token(args);
        if token == "all" {
            return save_all(app);
        }

        let path = (!token.is_empty()).then(|| Path::new(token));
        let id = match app.workspace.target(path) {
            Ok(id) => id,
            Err(err) => return DispatchResult::error(err),
        };
        match app.workspace.save(&app.storage, id) {
            Ok(()) => {
                let name = app
                    .workspace
                    .get(id)
                    .map(|b| b.display_name())
                    .unwrap_or_default();
                DispatchResult::Info(format!("saved {name}"))
            }
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "save [<file>|all]"
    }
}

fn save_all(app: &mut EditorApp) -> DispatchResult {
    if app.workspace.is_empty() {
        return DispatchResult::Info("no open files".to_string());
    }
    let results = app.workspace.save_all(&app.storage);
    let mut lines = Vec::new();
    let mut failed = 0;
    for (id, result) in &results {
        if let Err(err) = result {
            failed += 1;
            let name = app
                .workspace
                .get(*id)
                .map(|b| b.display_name())
                .unwrap_or_default();
            lines.push(format!("failed to save {name}: {err}"));
        }
    }
    lines.push(format!(
        "saved {} file(s), {failed} failed",
        results.len() - failed
    ));
    let message = lines.join("\n");
    if failed > 0 {
        DispatchResult::Error(message)
    } else {
        DispatchResult::Info(message)
    }
}

/// close [<file>] [force] - close a buffer, refusing unsaved changes unless forced
#[derive(Clone)]
pub struct Close;

impl Command for Close {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let mut path: Option<PathBuf> = None;
        let mut force = false;
        let mut rest = args;
        loop {
            let (token, tail) = next_token(rest);
            if token.is_empty() {
                break;
            }
            if token == "force" {
                force = true;
            } else if path.is_none() {
                path = Some(PathBuf::from(token));
            } else {
                return DispatchResult::Error(format!("usage: {}", self.usage()));
            }
            rest = tail;
        }

        match app.workspace.close(path.as_deref(), force) {
            Ok(buffer) => {
                let mut message = format!("closed {}", buffer.display_name());
                if let Some(active) = app.workspace.active_buffer() {
                    message.push_str(&format!(", active: {}", active.display_name()));
                }
                DispatchResult::Info(message)
            }
            Err(err @ WorkspaceError::UnsavedChanges(_)) => {
                DispatchResult::Error(format!("{err}, use 'close force' to discard them"))
            }
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "close [<file>] [force]"
    }
}

/// init <file> [with-log] - start a new unsaved buffer
#[derive(Clone)]
pub struct Init;

impl Command for Init {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let (file, rest) = next_token(args);
        let (flag, _) = next_token(rest);
        if file.is_empty() || !(flag.is_empty() || flag == "with-log") {
            return DispatchResult::Error(format!("usage: {}", self.usage()));
        }
        let with_log = flag == "with-log";

        match app.workspace.init(Path::new(file), with_log) {
            Ok(_) => {
                let mut message = format!("created {file} (unsaved)");
                if with_log {
                    message.push_str(", logging on");
                }
                DispatchResult::Info(message)
            }
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "init <file> [with-log]"
    }
}

/// edit <file> - make an open buffer the active one
#[derive(Clone)]
pub struct Edit;

impl Command for Edit {
    fn execute(&self, app: &mut EditorApp, args: &str) -> DispatchResult {
        let Some(path) = optional_path(args) else {
            return DispatchResult::Error(format!("usage: {}", self.usage()));
        };
        match app.workspace.edit(&path) {
            Ok(_) => DispatchResult::Info(format!("active: {}", path.display())),
            Err(err) => DispatchResult::error(err),
        }
    }

    fn usage(&self) -> &'static str {
        "edit <file>"
    }
}

/// editor-list - open buffers in opening order
#[derive(Clone)]
pub struct EditorList;

impl Command for EditorList {
    fn execute(&self, app: &mut EditorApp, _args: &str) -> DispatchResult {
        let entries = app.workspace.list();
        if entries.is_empty() {
            return DispatchResult::Info("no open files".to_string());
        }
        let lines: Vec<String> = entries
            .iter()
            .map(|e| {
                format!(
                    "{} {}{}",
                    if e.active { "*" } else { " " },
                    e.name,
                    if e.modified { " [modified]" } else { "" }
                )
            })
            .collect();
        DispatchResult::Info(lines.join("\n"))
    }

    fn usage(&self) -> &'static str {
        "editor-list"
    }
}

/// dir-tree [<dir>] - print a directory as a tree
#[derive(Clone)]
pub struct DirTree;

impl Command for DirTree {
    fn execute(&self, _app: &mut EditorApp, args: &str) -> DispatchResult {
        let root = optional_path(args).unwrap_or_else(|| PathBuf::from("."));
        match crate::core::dir_tree::render(&root) {
            Ok(tree) => DispatchResult::Info(tree.trim_end().to_string()),
            Err(err) => DispatchResult::Error(format!("{}: {err}", root.display())),
        }
    }

    fn usage(&self) -> &'static str {
        "dir-tree [<dir>]"
    }
}
