//! # Record Encoder Tests
//!
//! Unit-level checks of the escaping rules plus record-level checks of
//! the format-specification contract:
//!
//! - printable ASCII passes through unescaped, wrapped in quotes
//! - `"` and `\` gain exactly one leading backslash
//! - everything else renders as lowercase `\xhh`
//! - decoding an encoded string by its own grammar recovers the input
//! - repeat-count tags consume exactly that many (key, value) pairs

use capture::encode::{ArgValue, FormatSpec, RecordEntry, encode_record, value};
use capture::kernel::{ObjectAttributes, UnicodeStr};

fn encode(fmt: &str, entries: &[RecordEntry<'_>]) -> String {
    let spec = FormatSpec::parse(fmt).unwrap();
    // Escaped output is pure ASCII by construction.
    String::from_utf8(encode_record(&spec, entries)).unwrap()
}

fn string_value(s: &[u8]) -> String {
    let mut out = Vec::new();
    value::put_string(&mut out, s);
    String::from_utf8(out).unwrap()
}

/// Inverse of the string encoding: quotes stripped, `\\`/`\"` unescaped,
/// `\xhh` turned back into the raw byte.
fn decode_string(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    assert_eq!(bytes.first(), Some(&b'"'));
    assert_eq!(bytes.last(), Some(&b'"'));
    let mut out = Vec::new();
    let mut i = 1;
    while i < bytes.len() - 1 {
        if bytes[i] == b'\\' && bytes[i + 1] == b'x' {
            out.push(u8::from_str_radix(&s[i + 2..i + 4], 16).unwrap());
            i += 4;
        } else if bytes[i] == b'\\' {
            out.push(bytes[i + 1]);
            i += 2;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

#[test]
fn printable_ascii_is_identity_in_quotes() {
    assert_eq!(string_value(b"hello world 123"), "\"hello world 123\"");
}

#[test]
fn quote_and_backslash_get_one_backslash() {
    assert_eq!(string_value(b"a\"b\\c"), "\"a\\\"b\\\\c\"");
}

#[test]
fn nonprintable_bytes_render_as_lowercase_hex() {
    assert_eq!(string_value(&[0x01, 0x1f, 0x7f, 0xff]), "\"\\x01\\x1f\\x7f\\xff\"");
}

#[test]
fn every_byte_value_round_trips() {
    let input: Vec<u8> = (0u8..=255).collect();
    assert_eq!(decode_string(&string_value(&input)), input);
}

#[test]
fn null_strings_render_empty() {
    let out = encode(
        "su",
        &[
            RecordEntry::new("narrow", ArgValue::Str(None)),
            RecordEntry::new("wide", ArgValue::WStr(None)),
        ],
    );
    assert_eq!(out, "{\"narrow\": \"\", \"wide\": \"\"}");
}

#[test]
fn wide_units_transcode_to_escaped_utf8() {
    // U+00E9 -> c3 a9, each byte escaped.
    let units: Vec<u16> = "é".encode_utf16().collect();
    let out = encode("u", &[RecordEntry::new("name", ArgValue::WStr(Some(&units)))]);
    assert_eq!(out, "{\"name\": \"\\xc3\\xa9\"}");
}

#[test]
fn lone_surrogate_encodes_raw_three_bytes() {
    let units = [0xd800u16];
    let out = encode("u", &[RecordEntry::new("name", ArgValue::WStr(Some(&units)))]);
    assert_eq!(out, "{\"name\": \"\\xed\\xa0\\x80\"}");
}

#[test]
fn wide_quote_and_backslash_escape_before_transcode() {
    let units: Vec<u16> = "C:\\a\"b".encode_utf16().collect();
    let out = encode("u", &[RecordEntry::new("p", ArgValue::WStr(Some(&units)))]);
    assert_eq!(out, "{\"p\": \"C:\\\\a\\\"b\"}");
}

#[test]
fn integers_render_signed_decimal() {
    let out = encode(
        "ilL",
        &[
            RecordEntry::new("i", ArgValue::Int(-42)),
            RecordEntry::new("l", ArgValue::Size(7)),
            RecordEntry::new("L", ArgValue::SizeRef(Some(-9))),
        ],
    );
    assert_eq!(out, "{\"i\": -42, \"l\": 7, \"L\": -9}");
}

#[test]
fn null_pointer_to_value_renders_zero() {
    let out = encode("P", &[RecordEntry::new("out", ArgValue::SizeRef(None))]);
    assert_eq!(out, "{\"out\": 0}");
}

#[test]
fn kernel_descriptors_take_the_wide_path() {
    let name = UnicodeStr::from("\\??\\C:\\f");
    let obj = ObjectAttributes::named("\\??\\C:\\g");
    let out = encode(
        "oO",
        &[
            RecordEntry::new("str", ArgValue::KernelStr(Some(&name))),
            RecordEntry::new("obj", ArgValue::ObjAttr(Some(&obj))),
        ],
    );
    assert_eq!(out, "{\"str\": \"\\\\??\\\\C:\\\\f\", \"obj\": \"\\\\??\\\\C:\\\\g\"}");
}

#[test]
fn absent_descriptors_render_empty() {
    let nameless = ObjectAttributes::default();
    let out = encode(
        "oOO",
        &[
            RecordEntry::new("str", ArgValue::KernelStr(None)),
            RecordEntry::new("obj", ArgValue::ObjAttr(None)),
            RecordEntry::new("anon", ArgValue::ObjAttr(Some(&nameless))),
        ],
    );
    assert_eq!(out, "{\"str\": \"\", \"obj\": \"\", \"anon\": \"\"}");
}

#[test]
fn string_arrays_render_bracketed() {
    let items: [&[u8]; 3] = [b"one", b"two", b"three"];
    let out = encode("a", &[RecordEntry::new("argv", ArgValue::StrArray(&items))]);
    assert_eq!(out, "{\"argv\": [\"one\", \"two\", \"three\"]}");
}

#[test]
fn wide_string_arrays_render_bracketed() {
    let a: Vec<u16> = "x".encode_utf16().collect();
    let b: Vec<u16> = "y".encode_utf16().collect();
    let items: [&[u16]; 2] = [&a, &b];
    let out = encode("A", &[RecordEntry::new("argv", ArgValue::WStrArray(&items))]);
    assert_eq!(out, "{\"argv\": [\"x\", \"y\"]}");
}

#[test]
fn counted_buffers_honor_their_length() {
    let buf = [0x41u8, 0x00, 0x42];
    let out = encode(
        "bB",
        &[
            RecordEntry::new("buf", ArgValue::Buf(&buf)),
            RecordEntry::new("ind", ArgValue::IndirectBuf(None)),
        ],
    );
    assert_eq!(out, "{\"buf\": \"A\\x00B\", \"ind\": \"\"}");
}

#[test]
fn repeat_count_consumes_exactly_three_pairs() {
    let spec = FormatSpec::parse("3s").unwrap();
    assert_eq!(spec.len(), 3);
    let out = encode(
        "3s",
        &[
            RecordEntry::new("a", ArgValue::Str(Some(b"1"))),
            RecordEntry::new("b", ArgValue::Str(Some(b"2"))),
            RecordEntry::new("c", ArgValue::Str(Some(b"3"))),
        ],
    );
    assert_eq!(out, "{\"a\": \"1\", \"b\": \"2\", \"c\": \"3\"}");
}

#[test]
fn empty_record_is_a_bare_aggregate() {
    assert_eq!(encode("", &[]), "{}");
}
