//! The atom formatter (§4.4): turns one line's *effective slice* (computed
//! by [`crate::atom::iterator::AtomIter`] per §4.3) into a sequence of
//! output [`Chunk`]s, according to style.
//!
//! Grounded on the teacher's `scanner.rs::yaml_parser_scan_double_quoted_scalar`
//! escape `match` (decode direction, here driven lazily one chunk at a time
//! instead of pushed eagerly into a growable buffer) and
//! `yaml_parser_scan_uri_escapes`'s percent-decoder loop.

use crate::atom::chunk::Chunk;
use crate::atom::escape::{decode_named, encode_named, hex_width, needs_manual_escape, render_numeric_escape};
use crate::error::AtomError;
use crate::mark::Mark;
use crate::style::{AtomStyle, Chomping};
use crate::utf8;

/// Pull producer of [`Chunk`]s for one line's slice, under one style.
///
/// Re-created by the iterator for each line (it borrows that line's slice
/// and is otherwise stateless across lines).
pub(crate) struct LineFormatter<'a> {
    style: AtomStyle,
    rest: &'a str,
    mark: Mark,
}

impl<'a> LineFormatter<'a> {
    pub(crate) fn new(style: AtomStyle, slice: &'a str, mark: Mark) -> Self {
        LineFormatter { style, rest: slice, mark }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    /// Produce the next chunk, or `None` once the line's slice is exhausted.
    pub(crate) fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        if self.rest.is_empty() {
            return Ok(None);
        }
        match self.style {
            AtomStyle::Literal | AtomStyle::Folded | AtomStyle::Plain | AtomStyle::Comment => {
                let out = self.rest;
                self.rest = "";
                Ok(Some(Chunk::slice(out)))
            }
            AtomStyle::SingleQuoted => self.next_single_quoted(),
            AtomStyle::DoubleQuoted => self.next_double_quoted(),
            AtomStyle::Uri => self.next_uri(),
            AtomStyle::DoubleQuotedManual => self.next_double_quoted_manual(),
        }
    }

    fn next_single_quoted(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        match utf8::find_byte(self.rest.as_bytes(), b'\'') {
            None => {
                let out = self.rest;
                self.rest = "";
                Ok(Some(Chunk::slice(out)))
            }
            Some(0) => {
                // A `'` in scanned content is only ever half of an embedded
                // `''` (a lone quote would have ended the scalar span).
                if !self.rest[1..].starts_with('\'') {
                    return Err(AtomError::MalformedEscape { at: self.mark });
                }
                self.rest = &self.rest[2..];
                Ok(Some(Chunk::inline_char('\'')))
            }
            Some(idx) => {
                let (head, tail) = self.rest.split_at(idx);
                self.rest = tail;
                Ok(Some(Chunk::slice(head)))
            }
        }
    }

    fn next_double_quoted(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        match utf8::find_byte(self.rest.as_bytes(), b'\\') {
            None => {
                let out = self.rest;
                self.rest = "";
                Ok(Some(Chunk::slice(out)))
            }
            Some(idx) if idx > 0 => {
                let (head, tail) = self.rest.split_at(idx);
                self.rest = tail;
                Ok(Some(Chunk::slice(head)))
            }
            Some(_) => {
                let after_backslash = &self.rest[1..];
                let esc = after_backslash
                    .chars()
                    .next()
                    .ok_or(AtomError::MalformedEscape { at: self.mark })?;
                if let Some(width) = hex_width(esc) {
                    let hex_start = 1 + esc.len_utf8();
                    let hex = self
                        .rest
                        .get(hex_start..hex_start + width)
                        .ok_or(AtomError::MalformedEscape { at: self.mark })?;
                    if !hex.bytes().all(|b| (b as char).is_ascii_hexdigit()) {
                        return Err(AtomError::MalformedEscape { at: self.mark });
                    }
                    let value = u32::from_str_radix(hex, 16)
                        .map_err(|_| AtomError::MalformedEscape { at: self.mark })?;
                    let ch = char::from_u32(value)
                        .ok_or(AtomError::MalformedEscape { at: self.mark })?;
                    self.rest = &self.rest[hex_start + width..];
                    Ok(Some(Chunk::inline_char(ch)))
                } else {
                    let ch = decode_named(esc).ok_or(AtomError::MalformedEscape { at: self.mark })?;
                    self.rest = &self.rest[1 + esc.len_utf8()..];
                    Ok(Some(Chunk::inline_char(ch)))
                }
            }
        }
    }

    fn next_uri(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        if self.rest.as_bytes()[0] != b'%' {
            let idx = utf8::find_byte(self.rest.as_bytes(), b'%').unwrap_or(self.rest.len());
            let (head, tail) = self.rest.split_at(idx);
            self.rest = tail;
            return Ok(Some(Chunk::slice(head)));
        }
        let mut buf = [0u8; 4];
        let mut n = 0usize;
        let mut cursor = self.rest;
        while n < 4 && cursor.as_bytes().first() == Some(&b'%') {
            let byte = parse_percent_byte(cursor).ok_or(AtomError::MalformedEscape { at: self.mark })?;
            buf[n] = byte;
            n += 1;
            cursor = &cursor[3..];
        }
        let decoded = utf8::decode(&buf[..n]);
        match decoded.value {
            Some(ch) if decoded.width > 0 => {
                self.rest = &self.rest[decoded.width * 3..];
                Ok(Some(Chunk::inline_char(ch)))
            }
            _ => Err(AtomError::MalformedEscape { at: self.mark }),
        }
    }

    fn next_double_quoted_manual(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        let mut indices = self.rest.char_indices();
        match indices.find(|&(_, ch)| needs_manual_escape(ch)) {
            None => {
                let out = self.rest;
                self.rest = "";
                Ok(Some(Chunk::slice(out)))
            }
            Some((0, ch)) => {
                self.rest = &self.rest[ch.len_utf8()..];
                if let Some(letter) = encode_named(ch) {
                    let mut buf = [0u8; 2];
                    buf[0] = b'\\';
                    buf[1] = letter;
                    Ok(Some(Chunk::inline(core::str::from_utf8(&buf).expect("ascii"))))
                } else {
                    let mut buf = [0u8; 10];
                    let text = render_numeric_escape(ch as u32, &mut buf);
                    Ok(Some(Chunk::inline(text)))
                }
            }
            Some((idx, _)) => {
                let (head, tail) = self.rest.split_at(idx);
                self.rest = tail;
                Ok(Some(Chunk::slice(head)))
            }
        }
    }
}

fn parse_percent_byte(s: &str) -> Option<u8> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'%' {
        return None;
    }
    let hi = (bytes[1] as char).to_digit(16)?;
    let lo = (bytes[2] as char).to_digit(16)?;
    Some(((hi << 4) | lo) as u8)
}

/// Accumulates blank-line breaks between content lines of a literal/folded
/// atom, so chomping can be applied once the last content line is known
/// (§4.4: "the counter is flushed only before the next non-blank content
/// line").
#[derive(Default)]
pub(crate) struct ChompTracker {
    pending: u32,
}

impl ChompTracker {
    pub(crate) fn record_blank_break(&mut self) {
        self.pending += 1;
    }

    /// Final trailing-break count once the atom is exhausted, per `chomping`.
    pub(crate) fn finish(&mut self, chomping: Chomping) -> u32 {
        let n = core::mem::take(&mut self.pending);
        match chomping {
            Chomping::Strip => 0,
            Chomping::Clip => n.min(1),
            Chomping::Keep => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark() -> Mark {
        Mark::new(0, 0, 0)
    }

    #[test]
    fn single_quoted_unescapes_doubled_quote() {
        let mut f = LineFormatter::new(AtomStyle::SingleQuoted, "it''s", mark());
        let mut out = String::new();
        while let Some(c) = f.next_chunk().unwrap() {
            out.push_str(c.as_str());
        }
        assert_eq!(out, "it's");
    }

    #[test]
    fn double_quoted_named_and_numeric_escapes() {
        let mut f = LineFormatter::new(AtomStyle::DoubleQuoted, r"a\nb\x41", mark());
        let mut out = String::new();
        while let Some(c) = f.next_chunk().unwrap() {
            out.push_str(c.as_str());
        }
        assert_eq!(out, "a\nbA");
    }

    #[test]
    fn double_quoted_malformed_escape_errors() {
        let mut f = LineFormatter::new(AtomStyle::DoubleQuoted, r"\q", mark());
        assert!(f.next_chunk().is_err());
    }

    #[test]
    fn uri_decodes_multibyte_percent_escapes() {
        let mut f = LineFormatter::new(AtomStyle::Uri, "%E2%9C%93", mark());
        let mut out = String::new();
        while let Some(c) = f.next_chunk().unwrap() {
            out.push_str(c.as_str());
        }
        assert_eq!(out, "\u{2713}");
    }

    #[test]
    fn double_quoted_manual_reescapes_control_chars() {
        let mut f = LineFormatter::new(AtomStyle::DoubleQuotedManual, "a\tb", mark());
        let mut out = String::new();
        while let Some(c) = f.next_chunk().unwrap() {
            out.push_str(c.as_str());
        }
        assert_eq!(out, r"a\tb");
    }

    #[test]
    fn chomp_tracker_clip_keeps_one() {
        let mut t = ChompTracker::default();
        t.record_blank_break();
        t.record_blank_break();
        assert_eq!(t.finish(Chomping::Clip), 1);
    }

    #[test]
    fn chomp_tracker_keep_keeps_all() {
        let mut t = ChompTracker::default();
        t.record_blank_break();
        t.record_blank_break();
        assert_eq!(t.finish(Chomping::Keep), 2);
    }

    #[test]
    fn chomp_tracker_strip_drops_all() {
        let mut t = ChompTracker::default();
        t.record_blank_break();
        assert_eq!(t.finish(Chomping::Strip), 0);
    }
}
