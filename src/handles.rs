//! Deferred-classification cache for open file handles.
//!
//! A file opened with write intent is not announced immediately: its
//! record waits here until the first successful write proves the file
//! is interesting, or a close discards it. Handle values are reused by
//! the OS after close, so every close must clear the slot or a later
//! unrelated open of the same numeric value would inherit a stale path.
//!
//! Interceptions run on whatever native thread invoked the original
//! API; all operations take `&self` and are serialized by the inner
//! mutex, which gives at-most-one-winner semantics when a write and a
//! close race on the same handle.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::CaptureError;
use crate::kernel::Handle;
use crate::wstr::WideString;

/// Record for a file pending a written/discarded decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleRecord {
    /// Attribute flags captured from the create/open call.
    pub attributes: u32,
    /// Normalized absolute path, owned by the record.
    pub path: WideString,
}

#[derive(Debug, Default)]
pub struct HandleCache {
    files: Mutex<HashMap<Handle, HandleRecord>>,
}

impl HandleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the record for `handle`. An `OutOfMemory`
    /// failure loses at most one future notification; the caller logs
    /// it and keeps processing the intercepted call.
    pub fn put(&self, handle: Handle, attributes: u32, path: WideString) -> Result<(), CaptureError> {
        let mut files = self.files.lock().unwrap();
        files.try_reserve(1).map_err(|_| CaptureError::OutOfMemory)?;
        files.insert(handle, HandleRecord { attributes, path });
        Ok(())
    }

    /// Consume the record at first successful write. Untracked handles
    /// (pre-existing files, directories, ignored paths) return `None`.
    pub fn take_on_write(&self, handle: Handle) -> Option<HandleRecord> {
        self.files.lock().unwrap().remove(&handle)
    }

    /// Discard any record for `handle` without emitting anything.
    /// Must run on every close, written or not.
    pub fn remove(&self, handle: Handle) {
        self.files.lock().unwrap().remove(&handle);
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
