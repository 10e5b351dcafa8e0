//! Escaped rendering of single values.
//!
//! All writers append to a caller-owned `Vec<u8>`; nothing is buffered
//! beyond that. The escaping rule is byte-level: printable ASCII passes
//! through, everything else becomes `\xhh` with lowercase hex digits.
//! Quotes and backslashes inside strings get one extra leading
//! backslash before the byte rule applies.

use crate::kernel::{ObjectAttributes, UnicodeStr};
use crate::wstr::utf8_unit;

/// Append `b`, escaping anything outside printable ASCII as `\xhh`.
pub fn put_byte(out: &mut Vec<u8>, b: u8) {
    if (0x20..0x7f).contains(&b) {
        out.push(b);
    } else {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        out.extend_from_slice(&[b'\\', b'x', HEX[usize::from(b >> 4)], HEX[usize::from(b & 0xf)]]);
    }
}

pub fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        put_byte(out, b);
    }
}

/// Quoted narrow string. `"` and `\` are escaped with a leading `\`.
pub fn put_string(out: &mut Vec<u8>, s: &[u8]) {
    out.push(b'"');
    for &b in s {
        if b == b'"' || b == b'\\' {
            out.push(b'\\');
        }
        put_byte(out, b);
    }
    out.push(b'"');
}

/// Quoted wide string: each UTF-16 unit is transcoded to UTF-8 inline,
/// then every resulting byte goes through the byte rule. Units are
/// handled independently (no surrogate-pair joining).
pub fn put_wstring(out: &mut Vec<u8>, s: &[u16]) {
    out.push(b'"');
    for &unit in s {
        if unit == u16::from(b'"') || unit == u16::from(b'\\') {
            out.push(b'\\');
        }
        let (buf, len) = utf8_unit(unit);
        put_bytes(out, &buf[..len]);
    }
    out.push(b'"');
}

/// Signed decimal, no quoting (digits and `-` are printable).
pub fn put_int(out: &mut Vec<u8>, v: i64) {
    out.extend_from_slice(v.to_string().as_bytes());
}

/// Kernel string descriptor: absent renders as the empty string.
pub fn put_unicode(out: &mut Vec<u8>, s: Option<&UnicodeStr>) {
    put_wstring(out, s.map(UnicodeStr::units).unwrap_or(&[]));
}

/// Kernel object-attributes descriptor: embedded name, or empty when
/// the descriptor or its name is absent.
pub fn put_obj_attr(out: &mut Vec<u8>, obj: Option<&ObjectAttributes>) {
    put_wstring(out, obj.map(ObjectAttributes::name_units).unwrap_or(&[]));
}

pub fn put_str_array(out: &mut Vec<u8>, items: &[&[u8]]) {
    out.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(b", ");
        }
        put_string(out, item);
    }
    out.push(b']');
}

pub fn put_wstr_array(out: &mut Vec<u8>, items: &[&[u16]]) {
    out.push(b'[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(b", ");
        }
        put_wstring(out, item);
    }
    out.push(b']');
}
