//! The atom iterator (§4.3): a lazy decoding cursor over one [`crate::atom::Atom`].
//!
//! Maintains a double-buffered pair of line descriptors (`current` +
//! `lookahead`, per the Design Notes: "two named fields plus a swap
//! operation" instead of the source's bit-indexed two-slot array), pulls
//! chunks from a per-line [`LineFormatter`], and precomputes whether a
//! newline or a fold/space separator is owed after each line's content.

use crate::atom::chunk::Chunk;
use crate::atom::format::{ChompTracker, LineFormatter};
use crate::atom::line::{analyze_line, LineDescriptor};
use crate::error::AtomError;
use crate::mark::Mark;
use crate::style::{AtomStyle, Chomping};

fn is_block(style: AtomStyle) -> bool {
    matches!(style, AtomStyle::Literal | AtomStyle::Folded)
}

fn effective_slice(style: AtomStyle, d: &LineDescriptor) -> (usize, usize) {
    match style {
        AtomStyle::SingleQuoted | AtomStyle::DoubleQuoted => {
            let s = if d.first { d.line_start } else { d.nws_start };
            let e = if d.last { d.line_end } else { d.nws_end };
            if d.empty && d.first && d.last {
                (e, e)
            } else {
                (s, e)
            }
        }
        AtomStyle::Literal | AtomStyle::Folded => {
            let s = d.chomp_start;
            let e = d.line_end;
            if d.empty && d.first && d.last {
                (e, e)
            } else {
                (s, e)
            }
        }
        AtomStyle::Plain | AtomStyle::Uri | AtomStyle::DoubleQuotedManual | AtomStyle::Comment => {
            (d.nws_start, d.nws_end)
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Phase {
    Content,
    Breaks,
    Separator,
    Advance,
    Done,
}

/// Lazy decoding cursor over an atom's raw span. See §4.3.
pub struct AtomIter<'a> {
    source: &'a str,
    style: AtomStyle,
    chomping: Chomping,
    increment: i32,
    mark: Mark,
    dangling_end_quote: bool,

    current: LineDescriptor,
    lookahead: Option<(LineDescriptor, usize)>,
    formatter: Option<LineFormatter<'a>>,
    chomp: ChompTracker,
    phase: Phase,
    breaks_remaining: u32,

    /// Is the whole atom nothing but whitespace/line breaks?
    pub state_empty: bool,
    /// Does the atom span exactly one line?
    pub single_line: bool,
    /// Has the iterator latched a terminal error or reached the end?
    pub done: bool,
    latched_error: Option<AtomError>,
}

impl<'a> AtomIter<'a> {
    /// Build an iterator over `source` (the atom's raw span), under `style`.
    ///
    /// `increment` is the block-style indentation requirement (ignored for
    /// non-block styles); `dangling_end_quote` mirrors the scanner-supplied
    /// bit of the same name used by the quoted-style separator rule in
    /// §4.3. `mark` is attributed to any [`AtomError`] this iterator raises.
    pub fn new(
        source: &'a str,
        style: AtomStyle,
        chomping: Chomping,
        increment: i32,
        mark: Mark,
        dangling_end_quote: bool,
    ) -> Self {
        let (current, next_start) = analyze_line(source, 0, style, increment, true);
        let lookahead = if current.final_line {
            None
        } else {
            let (look, look_next) = analyze_line(source, next_start, style, increment, false);
            Some((look, look_next))
        };
        let state_empty = current.empty && current.final_line;
        let single_line = current.final_line;
        AtomIter {
            source,
            style,
            chomping,
            increment,
            mark,
            dangling_end_quote,
            current,
            lookahead,
            formatter: None,
            chomp: ChompTracker::default(),
            phase: Phase::Content,
            breaks_remaining: 0,
            state_empty,
            single_line,
            done: false,
            latched_error: None,
        }
    }

    /// Pull the next output chunk, or `None` once the atom is exhausted.
    ///
    /// Once an error is returned, every subsequent call returns the same
    /// error (§7: "the error is latched on the iterator").
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>, AtomError> {
        if let Some(err) = self.latched_error {
            return Err(err);
        }
        loop {
            match self.phase {
                Phase::Done => return Ok(None),
                Phase::Content => {
                    if self.formatter.is_none() {
                        let (s, e) = effective_slice(self.style, &self.current);
                        self.formatter = Some(LineFormatter::new(self.style, &self.source[s..e], self.mark));
                    }
                    match self.formatter.as_mut().unwrap().next_chunk() {
                        Ok(Some(chunk)) => return Ok(Some(chunk)),
                        Ok(None) => {
                            self.formatter = None;
                            self.decide_post_content_phase();
                        }
                        Err(err) => {
                            tracing::debug!(?err, "latching atom decode error");
                            self.latched_error = Some(err);
                            self.phase = Phase::Done;
                            self.done = true;
                            return Err(err);
                        }
                    }
                }
                Phase::Breaks => {
                    if self.breaks_remaining == 0 {
                        self.phase = Phase::Advance;
                    } else {
                        self.breaks_remaining -= 1;
                        return Ok(Some(Chunk::inline_char('\n')));
                    }
                }
                Phase::Separator => {
                    self.phase = Phase::Advance;
                    return Ok(Some(Chunk::inline_char(' ')));
                }
                Phase::Advance => {
                    self.advance();
                }
            }
        }
    }

    fn emit_break(&mut self) {
        self.breaks_remaining = 1;
        self.phase = Phase::Breaks;
    }

    fn decide_post_content_phase(&mut self) {
        let next_desc = self.lookahead.as_ref().map(|(d, _)| *d);

        if is_block(self.style) {
            if !self.current.last {
                if self.style == AtomStyle::Folded {
                    let next_indented = next_desc.map_or(false, |d| d.indented);
                    if self.current.empty
                        || self.current.indented
                        || self.current.trailing_breaks_ws
                        || next_indented
                    {
                        self.emit_break();
                        return;
                    }
                    let next_flat = next_desc.map_or(false, |d| !d.empty && !d.indented);
                    if next_flat {
                        self.phase = Phase::Separator;
                        return;
                    }
                    self.emit_break();
                    return;
                }
                self.emit_break();
                return;
            }
            if self.current.line_break_terminated {
                self.chomp.record_blank_break();
            }
            self.phase = Phase::Advance;
            return;
        }

        match self.style {
            AtomStyle::Comment => {
                if !self.current.final_line {
                    self.emit_break();
                } else {
                    self.phase = Phase::Advance;
                }
            }
            AtomStyle::SingleQuoted | AtomStyle::DoubleQuoted => {
                let next_non_empty = next_desc.map_or(false, |d| !d.empty);
                let final_next_empty = next_desc.map_or(false, |d| d.final_line && d.empty);
                let needs_newline =
                    (self.current.empty && !self.current.last) || (self.state_empty && !self.current.first);
                if needs_newline {
                    self.emit_break();
                    return;
                }
                let trailing_backslash =
                    self.style == AtomStyle::DoubleQuoted && self.source[..self.current.line_end].ends_with('\\');
                let needs_separator = !trailing_backslash
                    && (next_non_empty || (self.current.last && self.dangling_end_quote) || final_next_empty);
                self.phase = if needs_separator { Phase::Separator } else { Phase::Advance };
            }
            _ => {
                let needs_newline = self.current.empty && !self.current.last;
                if needs_newline {
                    self.emit_break();
                    return;
                }
                let next_non_empty = next_desc.map_or(false, |d| !d.empty);
                self.phase = if next_non_empty { Phase::Separator } else { Phase::Advance };
            }
        }
    }

    fn advance(&mut self) {
        match self.lookahead.take() {
            None => {
                let n = if is_block(self.style) {
                    self.chomp.finish(self.chomping)
                } else {
                    0
                };
                if n > 0 {
                    self.breaks_remaining = n;
                    self.phase = Phase::Breaks;
                } else {
                    self.phase = Phase::Done;
                    self.done = true;
                }
            }
            Some((look, look_next_start)) => {
                self.current = look;
                self.lookahead = if self.current.final_line {
                    None
                } else {
                    let (la, la_next) = analyze_line(self.source, look_next_start, self.style, self.increment, false);
                    Some((la, la_next))
                };
                self.phase = Phase::Content;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark() -> Mark {
        Mark::new(0, 0, 0)
    }

    fn collect(mut it: AtomIter) -> String {
        let mut out = String::new();
        while let Some(chunk) = it.next_chunk().unwrap() {
            out.push_str(chunk.as_str());
        }
        out
    }

    #[test]
    fn plain_scalar_folds_and_trims() {
        let it = AtomIter::new("hello\n  world\n", AtomStyle::Plain, Chomping::Clip, 0, mark(), false);
        assert_eq!(collect(it), "hello world");
    }

    #[test]
    fn literal_keep_preserves_trailing_breaks() {
        let it = AtomIter::new("line1\nline2\n\n", AtomStyle::Literal, Chomping::Keep, 2, mark(), false);
        assert_eq!(collect(it), "line1\nline2\n\n");
    }

    #[test]
    fn literal_strip_drops_trailing_breaks() {
        let it = AtomIter::new("line1\nline2\n\n", AtomStyle::Literal, Chomping::Strip, 2, mark(), false);
        assert_eq!(collect(it), "line1\nline2");
    }

    #[test]
    fn literal_clip_keeps_one_trailing_break() {
        let it = AtomIter::new("line1\nline2\n\n\n", AtomStyle::Literal, Chomping::Clip, 2, mark(), false);
        assert_eq!(collect(it), "line1\nline2\n");
    }

    #[test]
    fn folded_collapses_single_break_to_space() {
        let it = AtomIter::new("a\nb\nc\n", AtomStyle::Folded, Chomping::Strip, 0, mark(), false);
        assert_eq!(collect(it), "a b c");
    }

    #[test]
    fn double_quoted_decodes_while_iterating() {
        let it = AtomIter::new(r#"a\"b\n"#, AtomStyle::DoubleQuoted, Chomping::Clip, 0, mark(), false);
        assert_eq!(collect(it), "a\"b\n");
    }
}
