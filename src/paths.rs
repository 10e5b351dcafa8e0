//! NT path shape classifier.
//!
//! Produces the normalized absolute path used in notifications from any
//! of the three shapes seen in kernel create/open calls. This is a pure
//! prefix classifier over wide strings; handle-relative lookups happen
//! in the external `PathResolver` collaborator before a path gets here.

use crate::wstr::WideString;

const NT_OBJECT_PREFIX: &str = "\\??\\";
const HARDDISK_VOLUME1: &str = "\\Device\\HarddiskVolume1";

/// Classify `path` into a drive-letter-rooted absolute path:
///
/// * `\??\C:\a\b` — strip the four-unit NT object prefix;
/// * `C:abc.txt` — drive letter plus `:`, passed through unchanged;
/// * `\Device\HarddiskVolume1\x` — device prefix replaced with `C:`;
/// * anything else — `None`, and no notification fires for it.
pub fn normalize(path: &[u16]) -> Option<WideString> {
    if path.len() > NT_OBJECT_PREFIX.len() && starts_with(path, NT_OBJECT_PREFIX) {
        return Some(WideString::from_units(&path[NT_OBJECT_PREFIX.len()..]));
    }
    if let [first, second, ..] = path
        && u32::from(*first) < 0x80
        && (*first as u8).is_ascii_alphabetic()
        && *second == u16::from(b':')
    {
        return Some(WideString::from_units(path));
    }
    if starts_with_ignore_ascii_case(path, HARDDISK_VOLUME1) {
        let mut units: Vec<u16> = "C:".encode_utf16().collect();
        units.extend_from_slice(&path[HARDDISK_VOLUME1.len()..]);
        return Some(WideString::from(units));
    }
    None
}

fn starts_with(units: &[u16], prefix: &str) -> bool {
    units.len() >= prefix.len()
        && prefix.bytes().zip(units).all(|(p, &u)| u == u16::from(p))
}

fn starts_with_ignore_ascii_case(units: &[u16], prefix: &str) -> bool {
    units.len() >= prefix.len()
        && prefix
            .bytes()
            .zip(units)
            .all(|(p, &u)| u32::from(u) < 0x80 && (u as u8).eq_ignore_ascii_case(&p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn strips_nt_object_prefix() {
        assert_eq!(normalize(&w("\\??\\C:\\a\\b")), Some(WideString::from("C:\\a\\b")));
    }

    #[test]
    fn drive_relative_passes_through() {
        assert_eq!(normalize(&w("C:abc.txt")), Some(WideString::from("C:abc.txt")));
    }

    #[test]
    fn harddisk_volume_becomes_drive() {
        assert_eq!(
            normalize(&w("\\Device\\HarddiskVolume1\\x")),
            Some(WideString::from("C:\\x"))
        );
        // Prefix comparison is ASCII case-insensitive.
        assert_eq!(
            normalize(&w("\\device\\harddiskvolume1\\y")),
            Some(WideString::from("C:\\y"))
        );
    }

    #[test]
    fn unrecognized_shapes_yield_nothing() {
        assert_eq!(normalize(&w("\\\\server\\share\\f.txt")), None);
        assert_eq!(normalize(&w("\\Device\\Mup\\x")), None);
        assert_eq!(normalize(&w("relative.txt")), None);
        assert_eq!(normalize(&w("")), None);
        // The bare prefix alone is not a path.
        assert_eq!(normalize(&w("\\??\\")), None);
    }
}
