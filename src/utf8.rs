//! UTF-8 codec primitives (§4.1).
//!
//! Grounded on the teacher's `reader.rs::utf8_char_width_and_initial_value`
//! / `read_char_utf8` for decode (same leading-octet width table, same
//! surrogate/overlong rejection) and on `emitter.rs`'s
//! `ch.encode_utf8(&mut buf)` use for encode. `memchr` is new: the teacher
//! never needed a fast delimiter scan since it decodes scalars eagerly
//! character-by-character; the lazy atom iterator does, so `find_byte` is
//! added here using the `memchr` crate the way `bug-ops-fast-yaml` does.

/// Result of decoding one code point from the front of a byte slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded scalar value, or `None` if the leading byte did not
    /// start a valid sequence ("no character").
    pub value: Option<char>,
    /// Number of bytes consumed. Zero iff `value` is `None`.
    pub width: usize,
}

const NO_CHAR: Decoded = Decoded {
    value: None,
    width: 0,
};

fn lead_width_and_initial(lead: u8) -> (usize, u32) {
    if lead & 0x80 == 0 {
        (1, (lead & 0x7f) as u32)
    } else if lead & 0xE0 == 0xC0 {
        (2, (lead & 0x1f) as u32)
    } else if lead & 0xF0 == 0xE0 {
        (3, (lead & 0x0f) as u32)
    } else if lead & 0xF8 == 0xF0 {
        (4, (lead & 0x07) as u32)
    } else {
        (0, 0)
    }
}

fn is_valid_scalar(value: u32, width: usize) -> bool {
    if matches!(value, 0xD800..=0xDFFF) || value >= 0x0011_0000 {
        return false;
    }
    match width {
        1 => true,
        2 => value >= 0x80,
        3 => value >= 0x800,
        4 => value >= 0x10000,
        _ => false,
    }
}

/// Decode one code point from the front of `bytes`.
///
/// Returns `{value: None, width: 0}` ("no character") on a bad leading byte,
/// a truncated sequence, an invalid trailing byte, a surrogate, an
/// overlong encoding, or a value `>= U+110000`.
pub fn decode(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return NO_CHAR;
    };
    let (width, mut value) = lead_width_and_initial(lead);
    if width == 0 || bytes.len() < width {
        return NO_CHAR;
    }
    for &trailing in &bytes[1..width] {
        if trailing & 0xC0 != 0x80 {
            return NO_CHAR;
        }
        value = (value << 6) | (trailing & 0x3f) as u32;
    }
    if !is_valid_scalar(value, width) {
        return NO_CHAR;
    }
    match char::from_u32(value) {
        Some(ch) => Decoded {
            value: Some(ch),
            width,
        },
        None => NO_CHAR,
    }
}

/// Decode the *last* code point of `bytes` without a full forward scan.
///
/// Walks backward over UTF-8 continuation bytes (`10xxxxxx`) to find the
/// start of the final sequence, then decodes forward from there.
pub fn decode_rev(bytes: &[u8]) -> Decoded {
    if bytes.is_empty() {
        return NO_CHAR;
    }
    let mut start = bytes.len() - 1;
    let mut steps = 0;
    while steps < 3 && bytes[start] & 0xC0 == 0x80 {
        if start == 0 {
            return NO_CHAR;
        }
        start -= 1;
        steps += 1;
    }
    decode(&bytes[start..])
}

/// Encode `value` as UTF-8 into `out`, returning the written slice.
///
/// Thin wrapper over [`char::encode_utf8`]; kept as a free function so
/// callers needing the "any valid scalar, 1-4 bytes" framing from §4.1 don't
/// need to know about `char` at the call site.
pub fn encode(value: char, out: &mut [u8; 4]) -> &str {
    value.encode_utf8(out)
}

/// Find the next occurrence of `needle` in `haystack`.
///
/// Delegates to `memchr` for a single ASCII byte (the common case: `'`,
/// `\`, `%`), and falls back to a manual scan for anything else (multi-byte
/// UTF-8 needles never occur in the delimiters this crate searches for, but
/// the fallback keeps the function honest for arbitrary bytes).
pub fn find_byte(haystack: &[u8], needle: u8) -> Option<usize> {
    memchr::memchr(needle, haystack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decodes_ascii() {
        let d = decode(b"hello");
        assert_eq!(d, Decoded { value: Some('h'), width: 1 });
    }

    #[test]
    fn rejects_surrogate() {
        // U+D800 encoded as if it were valid 3-byte UTF-8: ED A0 80
        let d = decode(&[0xED, 0xA0, 0x80]);
        assert_eq!(d, NO_CHAR);
    }

    #[test]
    fn rejects_truncated() {
        let d = decode(&[0xE2, 0x9C]); // check-mark lead, missing trailing byte
        assert_eq!(d, NO_CHAR);
    }

    #[test]
    fn rejects_overlong() {
        // 2-byte encoding of NUL: C0 80 (should be 1 byte)
        let d = decode(&[0xC0, 0x80]);
        assert_eq!(d, NO_CHAR);
    }

    #[test]
    fn decode_rev_finds_last_multibyte_char() {
        let s = "a✓"; // 'a' then U+2713 CHECK MARK (3 bytes)
        let d = decode_rev(s.as_bytes());
        assert_eq!(d.value, Some('\u{2713}'));
        assert_eq!(d.width, 3);
    }

    proptest! {
        #[test]
        fn round_trip_any_scalar(v in 0u32..=0x10FFFFu32) {
            if let Some(ch) = char::from_u32(v) {
                if !matches!(v, 0xD800..=0xDFFF) {
                    let mut buf = [0u8; 4];
                    let encoded = encode(ch, &mut buf);
                    let decoded = decode(encoded.as_bytes());
                    prop_assert_eq!(decoded.value, Some(ch));
                    prop_assert_eq!(decoded.width, encoded.len());
                }
            }
        }
    }
}
