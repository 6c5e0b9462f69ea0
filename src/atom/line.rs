//! The atom line analyzer (§4.2).
//!
//! Walks one logical line of an atom's raw span, classifying code points as
//! line-break, whitespace, or "other", and filling a [`LineDescriptor`].
//!
//! **Normalization assumption**: like the rest of this crate, the analyzer
//! assumes the scanner has already folded `\r\n`/`\r` down to `\n` in the
//! atom's raw bytes (this is what real-world YAML scanners, including the
//! teacher's `reader.rs`, do at the input-decoding stage) — so a line break
//! is always exactly one `\n`-family code point wide here, never a
//! multi-byte break sequence.

use crate::chars::{is_blank, is_break};
use crate::style::AtomStyle;

const DEFAULT_TAB_SIZE: u32 = 8;

/// One logical line within an atom, as located by [`analyze_line`].
///
/// Transient: an [`crate::atom::AtomIter`] keeps exactly two of these alive
/// (current + lookahead) at any time, per the Design Notes' double buffer.
#[derive(Copy, Clone, Debug, Default)]
pub struct LineDescriptor {
    /// Byte offset (relative to the atom's source) where this line starts.
    pub line_start: usize,
    /// Byte offset where this line ends (before the break, or at atom end).
    pub line_end: usize,
    /// Byte offset of the first non-whitespace code point.
    pub nws_start: usize,
    /// Byte offset just past the last non-whitespace code point.
    pub nws_end: usize,
    /// Byte offset of the first column at or past the atom's required
    /// indentation (`increment`). Only meaningful for block styles.
    pub chomp_start: usize,
    /// Leading whitespace width, in columns.
    pub start_ws: u32,
    /// Trailing whitespace width, in columns.
    pub end_ws: u32,
    /// Is this the first line of the atom?
    pub first: bool,
    /// Is this the last non-blank line (only whitespace/breaks remain after)?
    pub last: bool,
    /// Did the scan reach the atom's end while producing this descriptor?
    pub final_line: bool,
    /// Does this line contain only whitespace (no non-whitespace content)?
    pub empty: bool,
    /// Does this line have trailing whitespace before its break?
    pub trailing_whitespace: bool,
    /// After this line's break, does the remaining atom contain any further
    /// break at all?
    pub trailing_breaks: bool,
    /// Among the blank lines between this line and the next content line,
    /// is any one indented past the chomp column?
    pub trailing_breaks_ws: bool,
    /// Does the chomp point land on whitespace?
    pub indented: bool,
    /// Did this line end via an actual break character (vs. the atom end)?
    pub line_break_terminated: bool,
    /// Set by the iterator (not the analyzer): emit a newline after this
    /// line's content.
    pub needs_newline: bool,
    /// Set by the iterator (not the analyzer): emit a fold/space separator
    /// after this line's content.
    pub needs_separator: bool,
}

impl LineDescriptor {
    /// The slice containing only this line's non-whitespace interior.
    pub fn trimmed<'a>(&self, source: &'a str) -> &'a str {
        &source[self.nws_start..self.nws_end]
    }
}

fn advance_col(col: u32, ch: char, tab_size: u32) -> u32 {
    if ch == '\t' {
        (col / tab_size + 1) * tab_size
    } else {
        col + 1
    }
}

/// Scan forward from `start` to the next line break (or atom end),
/// producing a [`LineDescriptor`] and the byte offset where the *next*
/// line begins (past the break, or `source.len()` at atom end).
pub fn analyze_line(
    source: &str,
    start: usize,
    style: AtomStyle,
    increment: i32,
    first: bool,
) -> (LineDescriptor, usize) {
    analyze_line_with_tab(source, start, style, increment, first, DEFAULT_TAB_SIZE)
}

/// As [`analyze_line`], with an explicit tab size (default 8).
pub fn analyze_line_with_tab(
    source: &str,
    start: usize,
    style: AtomStyle,
    increment: i32,
    first: bool,
    tab_size: u32,
) -> (LineDescriptor, usize) {
    let is_block = matches!(style, AtomStyle::Literal | AtomStyle::Folded);

    let mut desc = LineDescriptor {
        line_start: start,
        nws_start: start,
        nws_end: start,
        chomp_start: start,
        first,
        ..Default::default()
    };

    let mut col: u32 = 0;
    let mut chomp_found = !is_block || increment <= 0;
    if chomp_found {
        desc.chomp_start = start;
    }
    let mut next_line_start = source.len();
    let mut line_break_terminated = false;

    for (offset, ch) in source[start..].char_indices() {
        let byte_index = start + offset;
        if is_break(ch) {
            desc.line_end = byte_index;
            next_line_start = byte_index + ch.len_utf8();
            line_break_terminated = true;
            break;
        }
        if !chomp_found {
            if col as i32 >= increment {
                chomp_found = true;
                desc.chomp_start = byte_index;
                desc.indented = is_blank(ch);
            } else if !is_blank(ch) {
                // Content starts before the full indentation requirement is
                // reached (a short line); chomp starts right here.
                chomp_found = true;
                desc.chomp_start = byte_index;
                desc.indented = false;
            }
        }
        col = advance_col(col, ch, tab_size);
    }

    if !line_break_terminated {
        desc.line_end = source.len();
        next_line_start = source.len();
    }
    desc.line_break_terminated = line_break_terminated;
    desc.final_line = !line_break_terminated;
    if !chomp_found {
        desc.chomp_start = desc.line_end;
    }

    // Recompute nws_start/nws_end/start_ws/end_ws precisely in one pass now
    // that we know the line bounds (simpler and less error-prone than
    // threading partial state through the loop above).
    let mut first_nws: Option<usize> = None;
    let mut last_nws_end = desc.line_start;
    let mut start_ws_cols = 0u32;
    let mut end_ws_cols = 0u32;
    let mut col2 = 0u32;
    let mut trailing_run = 0u32;
    let mut seen_content = false;
    for (offset, ch) in source[desc.line_start..desc.line_end].char_indices() {
        let byte_index = desc.line_start + offset;
        if is_blank(ch) {
            if !seen_content {
                start_ws_cols += 1;
            }
            trailing_run += 1;
        } else {
            if first_nws.is_none() {
                first_nws = Some(byte_index);
            }
            last_nws_end = byte_index + ch.len_utf8();
            seen_content = true;
            trailing_run = 0;
        }
        col2 = advance_col(col2, ch, tab_size);
    }
    end_ws_cols = trailing_run;
    desc.start_ws = start_ws_cols;
    desc.end_ws = end_ws_cols;
    match first_nws {
        Some(s) => {
            desc.nws_start = s;
            desc.nws_end = last_nws_end;
            desc.empty = false;
        }
        None => {
            desc.nws_start = desc.line_start;
            desc.nws_end = desc.line_start;
            desc.empty = true;
        }
    }
    desc.trailing_whitespace = desc.end_ws > 0 && !desc.empty;

    // Look past this line's break for further breaks / indented blank
    // lines, and whether only whitespace remains (this being the `last`
    // content-bearing line).
    if line_break_terminated {
        let (trailing_breaks, trailing_breaks_ws, rest_is_blank) =
            scan_trailing(source, next_line_start, increment, tab_size, is_block);
        desc.trailing_breaks = trailing_breaks;
        desc.trailing_breaks_ws = trailing_breaks_ws;
        desc.last = rest_is_blank;
    } else {
        desc.last = true;
    }

    (desc, next_line_start)
}

/// Scan everything after `after_break` (the byte just past this line's
/// break) for: whether any further break exists at all, whether any of the
/// immediately-following *blank* lines is indented past the chomp column,
/// and whether the remainder of the atom is blank (whitespace/breaks only).
fn scan_trailing(
    source: &str,
    after_break: usize,
    increment: i32,
    tab_size: u32,
    is_block: bool,
) -> (bool, bool, bool) {
    let rest = &source[after_break..];
    let trailing_breaks = rest.chars().any(is_break);
    let rest_is_blank = rest.chars().all(|c| is_blank(c) || is_break(c));

    let mut trailing_breaks_ws = false;
    if is_block && increment > 0 {
        let mut col = 0u32;
        let mut line_has_content = false;
        for ch in rest.chars() {
            if is_break(ch) {
                col = 0;
                line_has_content = false;
                continue;
            }
            if line_has_content {
                continue;
            }
            if !is_blank(ch) {
                // first content line after the breaks; stop looking.
                break;
            }
            if col as i32 >= increment {
                trailing_breaks_ws = true;
            }
            col = advance_col(col, ch, tab_size);
            if !is_blank(ch) {
                line_has_content = true;
            }
        }
    }

    (trailing_breaks, trailing_breaks_ws, rest_is_blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::AtomStyle;

    #[test]
    fn single_line_plain() {
        let (d, next) = analyze_line("hello", 0, AtomStyle::Plain, 0, true);
        assert_eq!(d.nws_start, 0);
        assert_eq!(d.nws_end, 5);
        assert!(d.final_line);
        assert!(d.last);
        assert_eq!(next, 5);
    }

    #[test]
    fn two_lines_plain() {
        let src = "hello\nworld";
        let (d1, next) = analyze_line(src, 0, AtomStyle::Plain, 0, true);
        assert_eq!(d1.line_end, 5);
        assert!(!d1.final_line);
        assert!(d1.line_break_terminated);
        assert_eq!(next, 6);
        let (d2, _) = analyze_line(src, next, AtomStyle::Plain, 0, false);
        assert_eq!(d2.nws_start, 6);
        assert_eq!(d2.nws_end, 11);
        assert!(d2.final_line);
    }

    #[test]
    fn trailing_breaks_detected() {
        let src = "a\n\nb";
        let (d1, _) = analyze_line(src, 0, AtomStyle::Plain, 0, true);
        assert!(d1.trailing_breaks);
        assert!(!d1.last);
    }

    #[test]
    fn chomp_start_on_indented_block_line() {
        // increment = 2: "  x" -> chomp_start at byte 2 ('x'); not indented.
        let (d, _) = analyze_line("  x", 0, AtomStyle::Literal, 2, true);
        assert_eq!(d.chomp_start, 2);
        assert!(!d.indented);
        // "   x" (3 spaces) -> chomp at byte 2, which is still a space.
        let (d, _) = analyze_line("   x", 0, AtomStyle::Literal, 2, true);
        assert_eq!(d.chomp_start, 2);
        assert!(d.indented);
    }
}
