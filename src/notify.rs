//! Side-channel notification emitter.
//!
//! Composes the fixed-grammar messages announcing security-relevant
//! filesystem events and hands them to a best-effort transport:
//!
//! * `FILE_NEW:<absolute-path>`
//! * `FILE_DEL:<absolute-path>`
//! * `FILE_MOVE:<old-path>::<new-path>`
//!
//! Messages are flat strings with no escaping; wide paths are
//! transcoded per code unit to UTF-8. Delivery is fire-and-forget with
//! no acknowledgement, and emission never blocks a monitored thread.

use crossbeam::channel::{Receiver, Sender, TrySendError, bounded};

use crate::wstr;

/// Side-channel delivery. Implementations must not block under normal
/// load; a dropped message is acceptable, a stalled monitored thread is
/// not.
pub trait Transport: Send + Sync {
    fn send(&self, msg: &[u8]);
}

/// Stock in-process transport over a bounded channel. The delivery
/// collaborator drains the receiver; a full channel drops the message.
pub struct ChannelTransport {
    tx: Sender<Vec<u8>>,
}

impl ChannelTransport {
    pub fn bounded(capacity: usize) -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, msg: &[u8]) {
        match self.tx.try_send(msg.to_vec()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                log::warn!("side channel full, notification dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("side channel closed, notification dropped");
            }
        }
    }
}

/// Composes and dispatches notification messages.
pub struct Notifier {
    transport: Box<dyn Transport>,
}

impl Notifier {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn file_created(&self, path: &[u16]) {
        self.emit(b"FILE_NEW:", path, None);
    }

    pub fn file_deleted(&self, path: &[u16]) {
        self.emit(b"FILE_DEL:", path, None);
    }

    pub fn file_moved(&self, old: &[u16], new: &[u16]) {
        self.emit(b"FILE_MOVE:", old, Some(new));
    }

    fn emit(&self, prefix: &[u8], path: &[u16], second: Option<&[u16]>) {
        let mut msg = Vec::with_capacity(prefix.len() + path.len() + 2);
        msg.extend_from_slice(prefix);
        wstr::transcode(path, &mut msg);
        if let Some(second) = second {
            msg.extend_from_slice(b"::");
            wstr::transcode(second, &mut msg);
        }
        self.transport.send(&msg);
    }
}
