//! Format-specification-driven record assembly.
//!
//! Each call site builds an explicit ordered sequence of tagged value
//! descriptors (`ArgValue`) and pairs it one-to-one with a parsed
//! format specification. The specification keeps the compact tag
//! alphabet and the leading-digit repeat compression (`"3s"` means
//! three consecutive narrow-string entries, each with its own key).
//!
//! A call site whose entries disagree with its format specification is
//! a programming defect, not a runtime condition: the mismatch trips a
//! `debug_assert!` in debug builds and is ignored in release, where
//! encoding is driven by the value discriminant alone.

use super::value;
use crate::error::CaptureError;
use crate::kernel::{ObjectAttributes, UnicodeStr};

/// One entry kind of the format alphabet.
///
/// `S`/`b`, `l`/`p` and `L`/`P` carry identical semantics and collapse
/// to shared variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `s` — nul-terminated narrow string; null renders as `""`.
    Str,
    /// `S`, `b` — counted narrow buffer.
    CountedBuf,
    /// `u` — nul-terminated wide string; null renders as `""`.
    WStr,
    /// `U` — counted wide buffer.
    CountedWBuf,
    /// `B` — counted narrow buffer with the length behind a pointer.
    IndirectBuf,
    /// `i` — signed 32-bit integer.
    Int,
    /// `l`, `p` — pointer-sized integer.
    Size,
    /// `L`, `P` — pointer to a pointer-sized integer; null renders `0`.
    SizeRef,
    /// `o` — kernel string descriptor.
    KernelStr,
    /// `O` — kernel object-attributes descriptor.
    ObjAttr,
    /// `a` — narrow string array (count + elements).
    StrArray,
    /// `A` — wide string array (count + elements).
    WStrArray,
}

/// Parsed format specification: one tag per (key, value) pull, with
/// digit repeats already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    tags: Vec<Tag>,
}

impl FormatSpec {
    pub fn parse(fmt: &str) -> Result<Self, CaptureError> {
        let mut tags = Vec::with_capacity(fmt.len());
        let mut repeat = 1usize;
        for c in fmt.chars() {
            if ('2'..='9').contains(&c) {
                repeat = c as usize - '0' as usize;
                continue;
            }
            let tag = match c {
                's' => Tag::Str,
                'S' | 'b' => Tag::CountedBuf,
                'u' => Tag::WStr,
                'U' => Tag::CountedWBuf,
                'B' => Tag::IndirectBuf,
                'i' => Tag::Int,
                'l' | 'p' => Tag::Size,
                'L' | 'P' => Tag::SizeRef,
                'o' => Tag::KernelStr,
                'O' => Tag::ObjAttr,
                'a' => Tag::StrArray,
                'A' => Tag::WStrArray,
                _ => return Err(CaptureError::BadFormat(format!("unknown tag {c:?} in {fmt:?}"))),
            };
            for _ in 0..repeat {
                tags.push(tag);
            }
            repeat = 1;
        }
        Ok(Self { tags })
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// One logged value, discriminated by kind. Borrowed slices stand in
/// for the raw pointers of the intercepted ABI; `None` is a null
/// pointer.
#[derive(Debug, Clone, Copy)]
pub enum ArgValue<'a> {
    Str(Option<&'a [u8]>),
    Buf(&'a [u8]),
    WStr(Option<&'a [u16]>),
    WBuf(&'a [u16]),
    IndirectBuf(Option<&'a [u8]>),
    Int(i32),
    Size(isize),
    SizeRef(Option<isize>),
    KernelStr(Option<&'a UnicodeStr>),
    ObjAttr(Option<&'a ObjectAttributes>),
    StrArray(&'a [&'a [u8]]),
    WStrArray(&'a [&'a [u16]]),
}

impl ArgValue<'_> {
    fn tag(&self) -> Tag {
        match self {
            ArgValue::Str(_) => Tag::Str,
            ArgValue::Buf(_) => Tag::CountedBuf,
            ArgValue::WStr(_) => Tag::WStr,
            ArgValue::WBuf(_) => Tag::CountedWBuf,
            ArgValue::IndirectBuf(_) => Tag::IndirectBuf,
            ArgValue::Int(_) => Tag::Int,
            ArgValue::Size(_) => Tag::Size,
            ArgValue::SizeRef(_) => Tag::SizeRef,
            ArgValue::KernelStr(_) => Tag::KernelStr,
            ArgValue::ObjAttr(_) => Tag::ObjAttr,
            ArgValue::StrArray(_) => Tag::StrArray,
            ArgValue::WStrArray(_) => Tag::WStrArray,
        }
    }
}

/// One key/value pair of a record, in call-argument order.
#[derive(Debug, Clone, Copy)]
pub struct RecordEntry<'a> {
    pub key: &'a str,
    pub value: ArgValue<'a>,
}

impl<'a> RecordEntry<'a> {
    pub fn new(key: &'a str, value: ArgValue<'a>) -> Self {
        Self { key, value }
    }
}

/// Assemble one `{` `}` aggregate: `"key": value` pairs separated by
/// `", "`, no separator before the first or after the last, no entry
/// omitted or reordered.
pub fn encode_record(spec: &FormatSpec, entries: &[RecordEntry<'_>]) -> Vec<u8> {
    debug_assert_eq!(
        spec.len(),
        entries.len(),
        "format specification and entry count disagree"
    );
    let mut out = Vec::with_capacity(16 + entries.len() * 24);
    out.push(b'{');
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(b", ");
        }
        if let Some(tag) = spec.tags().get(i) {
            debug_assert_eq!(*tag, entry.value.tag(), "entry {:?} does not match its tag", entry.key);
        }
        value::put_string(&mut out, entry.key.as_bytes());
        out.extend_from_slice(b": ");
        put_value(&mut out, &entry.value);
    }
    out.push(b'}');
    out
}

fn put_value(out: &mut Vec<u8>, v: &ArgValue<'_>) {
    match *v {
        ArgValue::Str(s) => value::put_string(out, s.unwrap_or(b"")),
        ArgValue::Buf(b) => value::put_string(out, b),
        ArgValue::WStr(s) => value::put_wstring(out, s.unwrap_or(&[])),
        ArgValue::WBuf(b) => value::put_wstring(out, b),
        ArgValue::IndirectBuf(b) => value::put_string(out, b.unwrap_or(b"")),
        ArgValue::Int(i) => value::put_int(out, i64::from(i)),
        ArgValue::Size(s) => value::put_int(out, s as i64),
        ArgValue::SizeRef(s) => value::put_int(out, s.unwrap_or(0) as i64),
        ArgValue::KernelStr(u) => value::put_unicode(out, u),
        ArgValue::ObjAttr(o) => value::put_obj_attr(out, o),
        ArgValue::StrArray(items) => value::put_str_array(out, items),
        ArgValue::WStrArray(items) => value::put_wstr_array(out, items),
    }
}
