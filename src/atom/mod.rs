//! The atom subsystem (§2–§4.5): an immutable descriptor of a scalar's raw
//! span ([`Atom`]), decoded lazily by [`AtomIter`] into [`chunk::Chunk`]s.
//!
//! Grounded on the teacher's token/scalar-scanning code (`scanner.rs`,
//! `reader.rs`) generalized from "decode eagerly into an owned `String`" to
//! "decode lazily, one chunk at a time, style-by-style" per the
//! specification this crate implements.

pub mod chunk;
pub mod compare;
mod escape;
mod format;
pub mod iterator;
pub(crate) mod line;

pub use chunk::Chunk;
pub use iterator::AtomIter;

use crate::chars::{is_blank, is_break};
use crate::mark::Mark;
use crate::style::{AtomStyle, Chomping};
use core::cell::Cell;

/// Presence/positional bits precomputed once over an atom's raw span (§3).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AtomFlags {
    /// Only whitespace and/or line breaks (or empty).
    pub empty: bool,
    /// Contains at least one line-break character.
    pub has_line_break: bool,
    /// Contains at least one space or tab.
    pub has_whitespace: bool,
    /// First code point is a space or tab.
    pub starts_with_whitespace: bool,
    /// Last code point is a space or tab.
    pub ends_with_whitespace: bool,
    /// First code point is a line break.
    pub starts_with_line_break: bool,
    /// Last code point is a line break.
    pub ends_with_line_break: bool,
    /// Ends with two or more consecutive line breaks.
    pub trailing_line_break: bool,
    /// The span has zero bytes.
    pub size_zero: bool,
}

fn compute_flags(source: &str) -> AtomFlags {
    let mut chars = source.chars();
    let first = source.chars().next();
    let last = source.chars().next_back();
    let mut rev = source.chars().rev();
    let last1 = rev.next();
    let last2 = rev.next();

    AtomFlags {
        empty: source.chars().all(|c| is_blank(c) || is_break(c)),
        has_line_break: chars.any(is_break),
        has_whitespace: source.chars().any(is_blank),
        starts_with_whitespace: first.is_some_and(is_blank),
        ends_with_whitespace: last.is_some_and(is_blank),
        starts_with_line_break: first.is_some_and(is_break),
        ends_with_line_break: last.is_some_and(is_break),
        trailing_line_break: last1.is_some_and(is_break) && last2.is_some_and(is_break),
        size_zero: source.is_empty(),
    }
}

/// An immutable view over a contiguous raw span of scalar source, plus the
/// precomputed hints described in §3.
///
/// Owned by whatever produced it (a token, in the full pipeline this crate
/// is one layer of); lifetime tied to the input buffer it points into.
#[derive(Clone)]
pub struct Atom<'a> {
    source: &'a str,
    style: AtomStyle,
    chomp: Chomping,
    increment: i32,
    start_mark: Mark,
    end_mark: Mark,
    direct_output: bool,
    dangling_end_quote: bool,
    flags: AtomFlags,
    storage_hint: Cell<Option<usize>>,
}

impl<'a> Atom<'a> {
    /// Build an atom over `source`, the exact raw span described by
    /// `start_mark`..`end_mark`.
    ///
    /// `direct_output` is a scanner-computed hint (true iff the raw bytes
    /// equal the logical bytes); callers outside a real scanner should use
    /// one of the `from_*` convenience constructors instead, which compute
    /// a conservative default.
    pub fn new(
        source: &'a str,
        style: AtomStyle,
        chomp: Chomping,
        increment: i32,
        start_mark: Mark,
        end_mark: Mark,
        direct_output: bool,
    ) -> Self {
        Atom {
            source,
            style,
            chomp,
            increment,
            start_mark,
            end_mark,
            direct_output,
            dangling_end_quote: false,
            flags: compute_flags(source),
            storage_hint: Cell::new(None),
        }
    }

    /// Record that the scanner observed a dangling end-quote column for
    /// this atom (quoted-style separator rule, §4.3).
    pub fn with_dangling_end_quote(mut self, dangling: bool) -> Self {
        self.dangling_end_quote = dangling;
        self
    }

    /// A plain scalar atom, with a heuristic `direct_output`.
    pub fn from_plain(source: &'a str) -> Self {
        let direct = !source.chars().any(is_break)
            && !source.chars().next().is_some_and(is_blank)
            && !source.chars().next_back().is_some_and(is_blank);
        Self::new(source, AtomStyle::Plain, Chomping::Clip, 0, Mark::default(), Mark::default(), direct)
    }

    /// A single-quoted scalar atom (raw span excludes the surrounding
    /// quotes), with a heuristic `direct_output`.
    pub fn from_single_quoted(source: &'a str) -> Self {
        let direct = !source.contains("''") && !source.chars().any(is_break);
        Self::new(source, AtomStyle::SingleQuoted, Chomping::Clip, 0, Mark::default(), Mark::default(), direct)
    }

    /// A double-quoted scalar atom (raw span excludes the surrounding
    /// quotes), with a heuristic `direct_output`.
    pub fn from_double_quoted(source: &'a str) -> Self {
        let direct = !source.contains('\\') && !source.chars().any(is_break);
        Self::new(source, AtomStyle::DoubleQuoted, Chomping::Clip, 0, Mark::default(), Mark::default(), direct)
    }

    /// A literal (`|`) block scalar atom. Never direct-output: per-line
    /// indentation stripping almost always changes the raw bytes.
    pub fn from_literal(source: &'a str, chomp: Chomping, increment: i32) -> Self {
        Self::new(source, AtomStyle::Literal, chomp, increment, Mark::default(), Mark::default(), false)
    }

    /// A folded (`>`) block scalar atom. See [`Atom::from_literal`].
    pub fn from_folded(source: &'a str, chomp: Chomping, increment: i32) -> Self {
        Self::new(source, AtomStyle::Folded, chomp, increment, Mark::default(), Mark::default(), false)
    }

    /// A tag suffix or `%TAG` prefix, percent-escaped per RFC 3986.
    pub fn from_uri(source: &'a str) -> Self {
        let direct = !source.contains('%');
        Self::new(source, AtomStyle::Uri, Chomping::Clip, 0, Mark::default(), Mark::default(), direct)
    }

    /// Double-quoted content the caller has already escaped; only
    /// non-printable/bidi/`"`/`\` characters get (re-)escaped on output.
    pub fn from_double_quoted_manual(source: &'a str) -> Self {
        let direct = !source.chars().any(escape::needs_manual_escape);
        Self::new(
            source,
            AtomStyle::DoubleQuotedManual,
            Chomping::Clip,
            0,
            Mark::default(),
            Mark::default(),
            direct,
        )
    }

    /// A `#`-comment body.
    pub fn from_comment(source: &'a str) -> Self {
        let direct = !source.chars().any(is_break);
        Self::new(source, AtomStyle::Comment, Chomping::Clip, 0, Mark::default(), Mark::default(), direct)
    }

    /// The raw, undecoded span.
    pub fn raw(&self) -> &'a str {
        self.source
    }

    pub fn style(&self) -> AtomStyle {
        self.style
    }

    pub fn chomp(&self) -> Chomping {
        self.chomp
    }

    pub fn increment(&self) -> i32 {
        self.increment
    }

    pub fn start_mark(&self) -> Mark {
        self.start_mark
    }

    pub fn end_mark(&self) -> Mark {
        self.end_mark
    }

    /// True iff the raw bytes equal the logical bytes and may be emitted
    /// verbatim.
    pub fn direct_output(&self) -> bool {
        self.direct_output
    }

    pub fn dangling_end_quote(&self) -> bool {
        self.dangling_end_quote
    }

    pub fn flags(&self) -> AtomFlags {
        self.flags
    }

    pub fn is_empty(&self) -> bool {
        self.flags.empty
    }

    pub fn has_line_break(&self) -> bool {
        self.flags.has_line_break
    }

    pub fn has_whitespace(&self) -> bool {
        self.flags.has_whitespace
    }

    pub fn is_size_zero(&self) -> bool {
        self.flags.size_zero
    }

    /// The cached logical length, if [`crate::atom::compare::format_length`]
    /// has already computed it (Invariant 2).
    pub fn storage_hint(&self) -> Option<usize> {
        self.storage_hint.get()
    }

    pub(crate) fn cache_storage_hint(&self, len: usize) {
        self.storage_hint.set(Some(len));
    }

    /// A fresh decoding cursor over this atom.
    pub fn iter(&self) -> AtomIter<'a> {
        AtomIter::new(self.source, self.style, self.chomp, self.increment, self.start_mark, self.dangling_end_quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_atom_direct_output_when_trimmed_and_single_line() {
        let a = Atom::from_plain("hello");
        assert!(a.direct_output());
        let a = Atom::from_plain("hello\nworld");
        assert!(!a.direct_output());
    }

    #[test]
    fn flags_detect_trailing_double_break() {
        let a = Atom::from_literal("line\n\n", Chomping::Keep, 0);
        assert!(a.flags().trailing_line_break);
        assert!(a.flags().has_line_break);
    }

    #[test]
    fn flags_empty_for_whitespace_only_span() {
        let a = Atom::from_plain("   ");
        assert!(a.flags().empty);
    }

    proptest! {
        // Property 1 (decode-length consistency): format_length always
        // equals the bytes materialized by iterating to completion.
        #[test]
        fn decode_length_consistency(s in "[a-zA-Z0-9 ]{0,40}") {
            let a = Atom::from_plain(&s);
            let len = crate::atom::compare::format_length(&a).unwrap();
            let mut it = a.iter();
            let mut total = 0;
            while let Some(c) = it.next_chunk().unwrap() {
                total += c.len();
            }
            prop_assert_eq!(len, total);
            prop_assert_eq!(a.storage_hint(), Some(len));
        }
    }
}
