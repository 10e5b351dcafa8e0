// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both the hook
// wrappers of the host agent and integration tests.

pub mod config;
pub mod encode;
pub mod error;
pub mod handles;
pub mod hooks;
pub mod kernel;
pub mod logging;
pub mod macros;
pub mod notify;
pub mod paths;
pub mod wstr;

pub use error::CaptureError;
pub use hooks::CaptureContext;
