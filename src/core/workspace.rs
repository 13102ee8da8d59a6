//! Workspace: the set of open buffers and which one is active.
//!
//! Buffers are owned here and handed out by [`BufferId`]. Opening order is
//! remembered so listings are stable and closing the active buffer can fall
//! back to the most recently opened one. File I/O goes through the
//! [`LocalStorage`] passed in by the caller.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::core::buffer::Buffer;
use crate::core::edit::{EditOp, EditOutcome};
use crate::core::error::WorkspaceError;
use crate::core::history::MAX_UNDO_DEPTH;
use crate::core::id::BufferId;
use crate::core::log_sink::FileLogSink;
use crate::core::memento::{FileMemento, WorkspaceMemento};
use crate::core::storage::LocalStorage;

/// First line that switches the log sidecar on when a file is opened.
pub const LOG_MARKER: &str = "# log";

/// One row of [`Workspace::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEntry {
    pub id: BufferId,
    pub name: String,
    pub modified: bool,
    pub active: bool,
}

#[derive(Debug)]
pub struct Workspace {
    buffers: HashMap<BufferId, Buffer>,
    /// Ids in opening order
    order: Vec<BufferId>,
    active: Option<BufferId>,
    next_buffer_id: usize,
    undo_limit: usize,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_undo_limit(MAX_UNDO_DEPTH)
    }

    /// Workspace whose buffers keep at most `undo_limit` undo steps.
    pub fn with_undo_limit(undo_limit: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            order: Vec::new(),
            active: None,
            next_buffer_id: 0,
            undo_limit,
        }
    }

    // ==================== Lookup ====================

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Id of the open buffer for `path`
    pub fn find(&self, path: &Path) -> Option<BufferId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.buffers.get(id).is_some_and(|b| b.path() == path))
    }

    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(&id)
    }

    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.get_mut(&id)
    }

    pub fn active_id(&self) -> Option<BufferId> {
        self.active
    }

    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.get(self.active_id()?)
    }

    pub fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        let id = self.active_id()?;
        self.get_mut(id)
    }

    /// Buffers in opening order
    pub fn iter(&self) -> impl Iterator<Item = (BufferId, &Buffer)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.buffers.get(id).map(|b| (*id, b)))
    }

    /// Resolve an optional path argument: the named buffer, or the active one.
    pub fn target(&self, path: Option<&Path>) -> Result<BufferId, WorkspaceError> {
        match path {
            Some(path) => self
                .find(path)
                .ok_or_else(|| WorkspaceError::NotOpen(path.to_path_buf())),
            None => self.active.ok_or(WorkspaceError::NoActiveBuffer),
        }
    }

    pub fn target_mut(&mut self, path: Option<&Path>) -> Result<&mut Buffer, WorkspaceError> {
        let id = self.target(path)?;
        self.buffers
            .get_mut(&id)
            .ok_or(WorkspaceError::NoActiveBuffer)
    }

    /// Listing of every open buffer with its flags.
    pub fn list(&self) -> Vec<BufferEntry> {
        self.iter()
            .map(|(id, buffer)| BufferEntry {
                id,
                name: buffer.display_name(),
                modified: buffer.is_modified(),
                active: self.active == Some(id),
            })
            .collect()
    }

    // ==================== Lifecycle ====================

    /// Open `path`, or just activate it if it is already open.
    ///
    /// A file that does not exist yet opens as an empty, modified buffer.
    pub fn load(&mut self, storage: &LocalStorage, path: &Path) -> Result<BufferId, WorkspaceError> {
        if let Some(id) = self.find(path) {
            self.active = Some(id);
            return Ok(id);
        }

        let content = storage.read_file(path)?;
        let exists = content.is_some();
        let mut buffer = self.new_buffer(path, content.as_deref().unwrap_or_default());
        buffer.set_modified(!exists);
        if buffer.line(1).is_ok_and(|first| first == LOG_MARKER) {
            buffer.set_log_enabled(true);
        }

        info!(path = %path.display(), exists, lines = buffer.line_count(), "loaded file");
        Ok(self.insert(buffer))
    }

    /// Create an unsaved buffer for `path`. With `with_log` it starts with the
    /// log marker and logging on.
    pub fn init(&mut self, path: &Path, with_log: bool) -> Result<BufferId, WorkspaceError> {
        if self.find(path).is_some() {
            return Err(WorkspaceError::AlreadyOpen(path.to_path_buf()));
        }
        let content = if with_log { LOG_MARKER } else { "" };
        let mut buffer = self.new_buffer(path, content);
        buffer.set_modified(true);
        buffer.set_log_enabled(with_log);

        info!(path = %path.display(), with_log, "created buffer");
        Ok(self.insert(buffer))
    }

    /// Make the buffer for `path` the active one.
    pub fn edit(&mut self, path: &Path) -> Result<BufferId, WorkspaceError> {
        let id = self
            .find(path)
            .ok_or_else(|| WorkspaceError::NotOpen(path.to_path_buf()))?;
        self.active = Some(id);
        Ok(id)
    }

    /// Close the named (or active) buffer. A modified buffer stays open unless `force`.
    pub fn close(&mut self, path: Option<&Path>, force: bool) -> Result<Buffer, WorkspaceError> {
        let id = self.target(path)?;
        let modified = self.buffers.get(&id).is_some_and(Buffer::is_modified);
        if modified && !force {
            let name = self
                .buffers
                .get(&id)
                .map(|b| b.path().to_path_buf())
                .unwrap_or_default();
            return Err(WorkspaceError::UnsavedChanges(name));
        }

        let buffer = self
            .buffers
            .remove(&id)
            .ok_or(WorkspaceError::NoActiveBuffer)?;
        self.order.retain(|open| *open != id);
        if self.active == Some(id) {
            self.active = self.order.last().copied();
        }

        info!(path = %buffer.path().display(), forced = modified, "closed buffer");
        Ok(buffer)
    }

    // ==================== Saving ====================

    /// Write one buffer to its file and clear its modified flag.
    pub fn save(&mut self, storage: &LocalStorage, id: BufferId) -> Result<(), WorkspaceError> {
        let buffer = self
            .buffers
            .get_mut(&id)
            .ok_or(WorkspaceError::NoActiveBuffer)?;
        if !buffer.has_path() {
            return Err(WorkspaceError::NoPath);
        }
        storage.write_file(buffer.path(), &buffer.serialize_content())?;
        buffer.set_modified(false);

        info!(path = %buffer.path().display(), "saved file");
        Ok(())
    }

    /// Save every open buffer. One failure does not stop the others.
    pub fn save_all(
        &mut self,
        storage: &LocalStorage,
    ) -> Vec<(BufferId, Result<(), WorkspaceError>)> {
        let ids = self.order.clone();
        ids.into_iter()
            .map(|id| (id, self.save(storage, id)))
            .collect()
    }

    // ==================== Editing the active buffer ====================

    pub fn apply_edit(&mut self, op: EditOp) -> Result<EditOutcome, WorkspaceError> {
        let buffer = self
            .active_buffer_mut()
            .ok_or(WorkspaceError::NoActiveBuffer)?;
        Ok(buffer.apply_edit(op)?)
    }

    pub fn undo(&mut self) -> Result<EditOutcome, WorkspaceError> {
        let buffer = self
            .active_buffer_mut()
            .ok_or(WorkspaceError::NoActiveBuffer)?;
        Ok(buffer.undo()?)
    }

    pub fn redo(&mut self) -> Result<EditOutcome, WorkspaceError> {
        let buffer = self
            .active_buffer_mut()
            .ok_or(WorkspaceError::NoActiveBuffer)?;
        Ok(buffer.redo()?)
    }

    // ==================== Session ====================

    /// Snapshot of every open buffer, without history.
    pub fn create_memento(&self) -> WorkspaceMemento {
        WorkspaceMemento {
            active: self.active_buffer().map(|b| b.path().to_path_buf()),
            files: self
                .iter()
                .map(|(_, buffer)| FileMemento {
                    path: buffer.path().to_path_buf(),
                    content: buffer.serialize_content(),
                    modified: buffer.is_modified(),
                    log_enabled: buffer.is_log_enabled(),
                })
                .collect(),
        }
    }

    /// Replace every open buffer with the ones described by `memento`.
    pub fn restore(&mut self, memento: &WorkspaceMemento) {
        self.buffers.clear();
        self.order.clear();
        self.active = None;

        for file in &memento.files {
            if self.find(&file.path).is_some() {
                continue;
            }
            let mut buffer = self.new_buffer(&file.path, &file.content);
            buffer.set_modified(file.modified);
            buffer.set_log_enabled(file.log_enabled);
            self.insert(buffer);
        }

        self.active = memento
            .active
            .as_deref()
            .and_then(|path| self.find(path))
            .or_else(|| self.order.last().copied());

        info!(buffers = self.len(), "restored workspace");
    }

    fn new_buffer(&self, path: &Path, content: &str) -> Buffer {
        let mut buffer = Buffer::load_from(path, content).with_undo_limit(self.undo_limit);
        if buffer.has_path() {
            buffer.set_log_sink(Box::new(FileLogSink::for_file(path)));
        }
        buffer
    }

    /// Take ownership of `buffer` and make it active.
    fn insert(&mut self, buffer: Buffer) -> BufferId {
        let id = self.alloc_buffer_id();
        self.buffers.insert(id, buffer);
        self.order.push(id);
        self.active = Some(id);
        id
    }

    fn alloc_buffer_id(&mut self) -> BufferId {
        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id += 1;
        id
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
