//! Kernel descriptor types seen at the interception boundary.
//!
//! Hook wrappers marshal the raw ABI structures into these owned
//! equivalents before handing them to the capture pipeline. Absent
//! pointers in the intercepted call become `None` here and render as
//! empty strings, never a fault.

use crate::wstr::WideString;

/// Opaque identifier for an open OS resource. Handle values are reused
/// by the OS after close, so they are only unique among currently-open
/// handles.
pub type Handle = u64;

/// Counted wide-string descriptor (name plus backing buffer in the
/// kernel ABI).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnicodeStr(WideString);

impl UnicodeStr {
    pub fn from_units(units: &[u16]) -> Self {
        Self(WideString::from_units(units))
    }

    pub fn units(&self) -> &[u16] {
        self.0.units()
    }
}

impl From<&str> for UnicodeStr {
    fn from(s: &str) -> Self {
        Self(WideString::from(s))
    }
}

/// Name-plus-lookup-context bundle used by create/open style APIs.
#[derive(Debug, Clone, Default)]
pub struct ObjectAttributes {
    pub object_name: Option<UnicodeStr>,
    pub root_directory: Option<Handle>,
    pub attributes: u32,
}

impl ObjectAttributes {
    pub fn named(name: &str) -> Self {
        Self {
            object_name: Some(UnicodeStr::from(name)),
            ..Self::default()
        }
    }

    /// Embedded name, or empty when absent.
    pub fn name_units(&self) -> &[u16] {
        self.object_name.as_ref().map(UnicodeStr::units).unwrap_or(&[])
    }
}
