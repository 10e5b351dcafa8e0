//! Interception call-site contract.
//!
//! Hook wrappers (external, one thin shim per intercepted API) obtain
//! the intercepted call's arguments and outcome, then drive the capture
//! pipeline through a shared `CaptureContext`: update the handle cache
//! on open/create, emit notifications on write/delete/move, and always
//! log the structured record. The context is an explicit instance owned
//! by the interception subsystem, created at process attach and passed
//! by reference to every call site.
//!
//! No cache or notification side effect ever happens for a failed
//! underlying call; the structured record is logged either way, with
//! the call's own outcome as its first entry.

use log::Level;

use crate::capture_log;
use crate::encode::{FormatSpec, RecordEntry, encode_record};
use crate::handles::HandleCache;
use crate::kernel::{Handle, ObjectAttributes};
use crate::notify::Notifier;
use crate::paths;
use crate::wstr::WideString;

/// Path resolution collaborator, backed by the OS on a real deployment.
pub trait PathResolver: Send + Sync {
    /// Fully-qualified path for an open handle, when one is available.
    fn path_from_handle(&self, handle: Handle) -> Option<WideString>;

    /// Absolute form of `path`, when resolvable (current directory,
    /// handle-relative lookups and the like).
    fn absolute_path(&self, path: &[u16]) -> Option<WideString>;
}

/// Pure predicates over a kernel descriptor deciding what never gets
/// cached: directories and paths on the ignore list.
pub trait PathPolicy: Send + Sync {
    fn is_directory(&self, obj: &ObjectAttributes) -> bool;
    fn is_ignored(&self, obj: &ObjectAttributes) -> bool;
}

/// Destination of structured log records, one record per intercepted
/// call.
pub trait RecordSink: Send + Sync {
    fn write(&self, record: &[u8]);
}

/// Shared state of the interception subsystem.
pub struct CaptureContext {
    cache: HandleCache,
    notifier: Notifier,
    resolver: Box<dyn PathResolver>,
    policy: Box<dyn PathPolicy>,
    sink: Box<dyn RecordSink>,
}

impl CaptureContext {
    pub fn new(
        notifier: Notifier,
        resolver: Box<dyn PathResolver>,
        policy: Box<dyn PathPolicy>,
        sink: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            cache: HandleCache::new(),
            notifier,
            resolver,
            policy,
            sink,
        }
    }

    pub fn cache(&self) -> &HandleCache {
        &self.cache
    }

    /// Encode and deliver one structured record. Every call site calls
    /// this exactly once, whether or not an event fired; the first
    /// entry is the call's own outcome/status, supplied by the site.
    pub fn log_call(&self, spec: &FormatSpec, entries: &[RecordEntry<'_>]) {
        self.sink.write(&encode_record(spec, entries));
    }

    /// Successful create/open with write intent starts tracking the
    /// handle. Directories, ignored paths, read-only opens and failed
    /// calls are never tracked.
    pub fn file_opened(
        &self,
        success: bool,
        write_access: bool,
        handle: Handle,
        obj: &ObjectAttributes,
    ) {
        if !success || !write_access {
            return;
        }
        if self.policy.is_directory(obj) || self.policy.is_ignored(obj) {
            return;
        }
        let name = obj.name_units();
        let path = self
            .resolver
            .absolute_path(name)
            .unwrap_or_else(|| WideString::from_units(name));
        if let Err(e) = self.cache.put(handle, obj.attributes, path) {
            // A lost entry only suppresses a later FILE_NEW.
            capture_log!(Level::Warn, "hooks", "handle cache put failed: {}", e);
        }
    }

    /// First successful write through a tracked handle resolves the
    /// deferred decision: the record is consumed and, when the path
    /// shape is recognized, exactly one creation event fires.
    pub fn file_written(&self, success: bool, handle: Handle) {
        if !success {
            return;
        }
        if let Some(record) = self.cache.take_on_write(handle)
            && let Some(path) = paths::normalize(record.path.units())
        {
            self.notifier.file_created(path.units());
        }
    }

    /// Close discards any pending record, written or not.
    pub fn file_closed(&self, handle: Handle) {
        self.cache.remove(handle);
    }

    /// Pre-call deletion notice keyed off the kernel descriptor name,
    /// for APIs intercepted before the delete happens.
    pub fn file_delete_pending(&self, obj: &ObjectAttributes) {
        self.notifier.file_deleted(obj.name_units());
    }

    /// Deletion notice for delete-on-close dispositions set through an
    /// open handle: the handle is resolved to a path first. An
    /// unresolvable handle emits nothing.
    pub fn file_delete_handle(&self, handle: Handle) {
        if let Some(path) = self.resolver.path_from_handle(handle) {
            match self.resolver.absolute_path(path.units()) {
                Some(abs) => self.notifier.file_deleted(abs.units()),
                None => self.notifier.file_deleted(path.units()),
            }
        }
    }

    /// Deletion notice from an explicit path, resolved to its absolute
    /// form when possible.
    pub fn file_delete_path(&self, path: &[u16]) {
        match self.resolver.absolute_path(path) {
            Some(abs) => self.notifier.file_deleted(abs.units()),
            None => self.notifier.file_deleted(path),
        }
    }

    /// Move notice, fired only after the underlying move reported
    /// success.
    pub fn file_moved(&self, success: bool, old: &[u16], new: &[u16]) {
        if !success {
            return;
        }
        let old_abs = self
            .resolver
            .absolute_path(old)
            .unwrap_or_else(|| WideString::from_units(old));
        let new_abs = self
            .resolver
            .absolute_path(new)
            .unwrap_or_else(|| WideString::from_units(new));
        self.notifier.file_moved(old_abs.units(), new_abs.units());
    }
}
