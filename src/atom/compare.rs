//! The atom comparator, analyzer, and materializer (§4.5).
//!
//! Grounded on the teacher's own small scalar utilities in `scanner.rs`
//! (the numeric-literal recognizer inlined before tag resolution) and on
//! `reader.rs`'s buffered-read/pushback style for the byte-level helpers —
//! generalized here to run atop the lazy [`crate::atom::AtomIter`] instead
//! of a single shared input buffer cursor.

use crate::atom::{Atom, AtomIter};
use crate::error::AtomError;

/// A failure materializing or comparing an atom: either a decode error, or
/// the destination buffer was too small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeError {
    Decode(AtomError),
    BufferTooSmall,
}

impl From<AtomError> for MaterializeError {
    fn from(e: AtomError) -> Self {
        MaterializeError::Decode(e)
    }
}

/// Compare an atom's logical content against raw `bytes`.
///
/// Direct-output atoms reduce to a `memcmp` + length tiebreak (§4.5); all
/// others drive an iterator, comparing decoded bytes one chunk at a time.
pub fn compare_bytes(atom: &Atom<'_>, bytes: &[u8]) -> Result<core::cmp::Ordering, AtomError> {
    if atom.direct_output() {
        let raw = atom.raw().as_bytes();
        return Ok(raw.cmp(bytes));
    }
    let mut it = atom.iter();
    let mut rest = bytes;
    loop {
        match it.next_chunk()? {
            None => {
                return Ok(if rest.is_empty() {
                    core::cmp::Ordering::Equal
                } else {
                    core::cmp::Ordering::Less
                });
            }
            Some(chunk) => {
                let c = chunk.as_str().as_bytes();
                if c.len() <= rest.len() {
                    let (head, tail) = rest.split_at(c.len());
                    match c.cmp(head) {
                        core::cmp::Ordering::Equal => rest = tail,
                        other => return Ok(other),
                    }
                } else {
                    return Ok(if c.starts_with(rest) {
                        core::cmp::Ordering::Greater
                    } else {
                        c[..rest.len()].cmp(rest)
                    });
                }
            }
        }
    }
}

/// Compare two atoms' logical content.
pub fn compare_atoms(a: &Atom<'_>, b: &Atom<'_>) -> Result<core::cmp::Ordering, AtomError> {
    if a.direct_output() && b.direct_output() {
        return Ok(a.raw().cmp(b.raw()));
    }
    let mut ia = a.iter();
    let mut ib = b.iter();
    let mut pending_a: &str = "";
    let mut pending_b: &str = "";
    loop {
        if pending_a.is_empty() {
            match ia.next_chunk()? {
                Some(c) => pending_a = c.as_str(),
                None => pending_a = "",
            }
        }
        if pending_b.is_empty() {
            match ib.next_chunk()? {
                Some(c) => pending_b = c.as_str(),
                None => pending_b = "",
            }
        }
        match (pending_a.is_empty(), pending_b.is_empty()) {
            (true, true) => return Ok(core::cmp::Ordering::Equal),
            (true, false) => return Ok(core::cmp::Ordering::Less),
            (false, true) => return Ok(core::cmp::Ordering::Greater),
            (false, false) => {
                let n = pending_a.len().min(pending_b.len());
                let (ha, ta) = pending_a.split_at(n);
                let (hb, tb) = pending_b.split_at(n);
                match ha.as_bytes().cmp(hb.as_bytes()) {
                    core::cmp::Ordering::Equal => {
                        pending_a = ta;
                        pending_b = tb;
                    }
                    other => return Ok(other),
                }
            }
        }
    }
}

/// Does `atom`'s logical content look like a YAML-core numeric literal?
///
/// Optional sign, decimal digits, optional `.`-fraction, optional
/// `e`/`E` exponent with its own sign and digits — and only if the whole
/// content is consumed.
pub fn is_number(atom: &Atom<'_>) -> Result<bool, AtomError> {
    let mut buf = String::new();
    materialize_to_string(atom, &mut buf)?;
    Ok(parse_number(&buf))
}

fn parse_number(s: &str) -> bool {
    let mut chars = s.chars().peekable();
    if matches!(chars.peek(), Some('+') | Some('-')) {
        chars.next();
    }
    let mut saw_digit = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        chars.next();
        saw_digit = true;
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            saw_digit = true;
        }
    }
    if !saw_digit {
        return false;
    }
    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut saw_exp_digit = false;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            saw_exp_digit = true;
        }
        if !saw_exp_digit {
            return false;
        }
    }
    chars.next().is_none()
}

/// Iterate and sum chunk lengths, as [`Atom::storage_hint`] caches.
pub fn format_length(atom: &Atom<'_>) -> Result<usize, AtomError> {
    if let Some(len) = atom.storage_hint() {
        return Ok(len);
    }
    let mut it = atom.iter();
    let mut total = 0usize;
    while let Some(chunk) = it.next_chunk()? {
        total += chunk.len();
    }
    atom.cache_storage_hint(total);
    Ok(total)
}

/// Iterate and copy chunks into `buf`, returning the number of bytes
/// written or `BufferTooSmall` if `buf` is not big enough.
pub fn format_into(atom: &Atom<'_>, buf: &mut [u8]) -> Result<usize, MaterializeError> {
    let mut it = atom.iter();
    let mut written = 0usize;
    while let Some(chunk) = it.next_chunk()? {
        let bytes = chunk.as_str().as_bytes();
        let end = written + bytes.len();
        if end > buf.len() {
            return Err(MaterializeError::BufferTooSmall);
        }
        buf[written..end].copy_from_slice(bytes);
        written = end;
    }
    Ok(written)
}

fn materialize_to_string(atom: &Atom<'_>, out: &mut String) -> Result<(), AtomError> {
    let mut it = atom.iter();
    while let Some(chunk) = it.next_chunk()? {
        out.push_str(chunk.as_str());
    }
    Ok(())
}

/// Byte-at-a-time reader built on top of an [`AtomIter`], with a
/// one-character pushback slot (§4.5: `read`/`getc`/`peekc`/`ungetc`).
pub struct AtomReader<'a> {
    it: AtomIter<'a>,
    pending: &'a str,
    ungot: Option<char>,
}

impl<'a> AtomReader<'a> {
    pub fn new(atom: &'a Atom<'a>) -> Self {
        AtomReader {
            it: atom.iter(),
            pending: "",
            ungot: None,
        }
    }

    /// The next code point, or `None` at end of atom.
    pub fn getc(&mut self) -> Result<Option<char>, AtomError> {
        if let Some(ch) = self.ungot.take() {
            return Ok(Some(ch));
        }
        loop {
            if let Some(ch) = self.pending.chars().next() {
                self.pending = &self.pending[ch.len_utf8()..];
                return Ok(Some(ch));
            }
            match self.it.next_chunk()? {
                Some(chunk) => self.pending = chunk.as_str(),
                None => return Ok(None),
            }
        }
    }

    /// Peek the next code point without consuming it.
    pub fn peekc(&mut self) -> Result<Option<char>, AtomError> {
        let ch = self.getc()?;
        if let Some(c) = ch {
            self.ungetc(c);
        }
        Ok(ch)
    }

    /// Push one code point back; at most one pending pushback is supported.
    pub fn ungetc(&mut self, ch: char) {
        self.ungot = Some(ch);
    }

    /// Read up to `count` code points into `out`, returning how many were
    /// read (fewer than `count` at end of atom).
    pub fn read(&mut self, out: &mut String, count: usize) -> Result<usize, AtomError> {
        let mut n = 0;
        while n < count {
            match self.getc()? {
                Some(ch) => {
                    out.push(ch);
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::Mark;
    use crate::style::{AtomStyle, Chomping};

    fn atom<'a>(source: &'a str, style: AtomStyle) -> Atom<'a> {
        Atom::new(source, style, Chomping::Clip, 0, Mark::default(), Mark::default(), false)
    }

    #[test]
    fn is_number_accepts_signed_float_with_exponent() {
        let a = atom("-12.5e+3", AtomStyle::Plain);
        assert!(is_number(&a).unwrap());
    }

    #[test]
    fn is_number_rejects_trailing_garbage() {
        let a = atom("12abc", AtomStyle::Plain);
        assert!(!is_number(&a).unwrap());
    }

    #[test]
    fn format_length_matches_materialized_bytes() {
        let a = atom("hello\n  world\n", AtomStyle::Plain);
        let len = format_length(&a).unwrap();
        let mut buf = [0u8; 32];
        let written = format_into(&a, &mut buf).unwrap();
        assert_eq!(len, written);
        assert_eq!(&buf[..written], b"hello world");
    }

    #[test]
    fn compare_bytes_matches_direct_output_atom() {
        let a = atom("hello", AtomStyle::Plain);
        assert_eq!(compare_bytes(&a, b"hello").unwrap(), core::cmp::Ordering::Equal);
        assert_eq!(compare_bytes(&a, b"hellp").unwrap(), core::cmp::Ordering::Less);
    }

    #[test]
    fn reader_supports_ungetc() {
        let a = atom("ab", AtomStyle::Plain);
        let mut r = AtomReader::new(&a);
        let c1 = r.getc().unwrap().unwrap();
        assert_eq!(c1, 'a');
        r.ungetc(c1);
        assert_eq!(r.getc().unwrap(), Some('a'));
        assert_eq!(r.getc().unwrap(), Some('b'));
        assert_eq!(r.getc().unwrap(), None);
    }
}
