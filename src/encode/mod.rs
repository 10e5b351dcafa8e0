//! Structured log record encoding.
//!
//! One record is produced per intercepted call: a `{` `}` aggregate of
//! `"key": value` pairs driven by a compact format specification. The
//! value encoder streams escaped text into a growing byte buffer; the
//! record encoder pairs each described value with its key label.

pub mod record;
pub mod value;

pub use record::{ArgValue, FormatSpec, RecordEntry, Tag, encode_record};
