//! Owned UTF-16 code-unit strings.
//!
//! Paths and object names cross the interception boundary as wide
//! (UTF-16) buffers, which do not have to be valid Unicode. `WideString`
//! owns such a buffer; `transcode` is the shared per-unit UTF-8
//! transcoder used by both the value encoder and the side-channel
//! notifier.
//!
//! Code units are transcoded independently: a unit in the surrogate
//! range becomes its raw 3-byte form instead of being joined with its
//! partner. That matches the wire format consumed downstream, so any
//! change here changes log output for existing consumers.

use std::fmt;

/// Owned wide-character string (a bag of UTF-16 code units).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_units(units: &[u16]) -> Self {
        Self(units.to_vec())
    }

    pub fn units(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<Vec<u16>> for WideString {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf16_lossy(&self.0))
    }
}

/// UTF-8 form of one UTF-16 code unit: up to three bytes plus the count.
/// Surrogate-range units are encoded as-is (no pair joining).
pub fn utf8_unit(unit: u16) -> ([u8; 3], usize) {
    let c = u32::from(unit);
    if c < 0x80 {
        ([c as u8, 0, 0], 1)
    } else if c < 0x800 {
        ([0xc0 | (c >> 6) as u8, 0x80 | (c & 0x3f) as u8, 0], 2)
    } else {
        (
            [
                0xe0 | (c >> 12) as u8,
                0x80 | ((c >> 6) & 0x3f) as u8,
                0x80 | (c & 0x3f) as u8,
            ],
            3,
        )
    }
}

/// Append the per-unit UTF-8 transcoding of `units` to `out`.
pub fn transcode(units: &[u16], out: &mut Vec<u8>) {
    for &unit in units {
        let (buf, len) = utf8_unit(unit);
        out.extend_from_slice(&buf[..len]);
    }
}
