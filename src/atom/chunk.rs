//! Chunks: the `(ptr, len)` view the atom iterator hands to consumers.

/// Inline buffer big enough for one UTF-8 character or any escape
/// replacement the formatter produces (widest case: `\U` + 8 hex digits
/// re-encoded, but no single replacement actually needs more than a 4-byte
/// UTF-8 character; ten bytes leaves headroom matching the spec's "big
/// enough for one UTF-8 character and for any escape replacement").
const INLINE_CAP: usize = 10;

#[derive(Copy, Clone)]
struct InlineBuf {
    bytes: [u8; INLINE_CAP],
    len: u8,
}

impl InlineBuf {
    fn as_str(&self) -> &str {
        // Safety-free: all producers only ever push valid UTF-8 (chars or
        // ASCII escape text), and we never slice mid-character.
        core::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

/// A contiguous run of logical bytes, either borrowed from the original
/// input buffer or copied into a small inline buffer.
#[derive(Copy, Clone)]
pub enum Chunk<'a> {
    /// A zero-copy slice of the original input.
    Slice(&'a str),
    /// A small inline copy (used for escape replacements and synthesized
    /// separators/newlines).
    Inline(InlineBuf),
}

impl<'a> Chunk<'a> {
    /// Wrap a borrowed slice.
    pub fn slice(s: &'a str) -> Self {
        Chunk::Slice(s)
    }

    /// Copy `s` into an inline chunk.
    ///
    /// Panics if `s` is longer than the inline capacity; every call site in
    /// this crate only ever passes a single character or a short fixed
    /// string (`" "`, `"\n"`, an escape replacement), so this can't happen
    /// in practice.
    pub fn inline(s: &str) -> Self {
        assert!(s.len() <= INLINE_CAP, "inline chunk overflow");
        let mut bytes = [0u8; INLINE_CAP];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Chunk::Inline(InlineBuf {
            bytes,
            len: s.len() as u8,
        })
    }

    /// Copy a single character into an inline chunk.
    pub fn inline_char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self::inline(ch.encode_utf8(&mut buf))
    }

    /// View this chunk's bytes as a string slice.
    pub fn as_str(&self) -> &str {
        match self {
            Chunk::Slice(s) => s,
            Chunk::Inline(buf) => buf.as_str(),
        }
    }

    /// Number of bytes in this chunk.
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Is this chunk empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> core::fmt::Debug for Chunk<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Chunk({:?})", self.as_str())
    }
}
