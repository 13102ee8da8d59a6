//! This module constitutes the core, headless editing engine of ledit.
//! It manages the line store and edit operations behind each buffer, the
//! undo/redo history, the workspace of open buffers with its storage and
//! session memento, and command dispatch.

pub mod app;
pub mod buffer;
pub mod command;
pub mod commands;
pub mod dir_tree;
pub mod dispatcher;
pub mod edit;
pub mod error;
pub mod history;
pub mod id;
pub mod line_store;
pub mod log_sink;
pub mod memento;
pub mod storage;
pub mod workspace;
