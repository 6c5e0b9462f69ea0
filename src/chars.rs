//! Character classification shared by the line analyzer, formatter, and
//! emitter scalar writers.
//!
//! Grounded on the teacher's `macros.rs` predicate functions (`is_space`,
//! `is_break`, `is_printable`, ...), kept as plain `fn`s rather than macros
//! since we operate on `char`, not raw byte buffers with an implicit cursor.

/// Is `ch` a YAML line-break character? (`\n`, `\r`, NEL, LS, PS)
pub(crate) fn is_break(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// `is_break`, but also true at end-of-input (`ch` absent).
pub(crate) fn is_breakz(ch: Option<char>) -> bool {
    ch.map_or(true, is_break)
}

/// Is `ch` an ASCII space?
pub(crate) fn is_space(ch: char) -> bool {
    ch == ' '
}

/// Is `ch` a tab?
pub(crate) fn is_tab(ch: char) -> bool {
    ch == '\t'
}

/// Space or tab.
pub(crate) fn is_blank(ch: char) -> bool {
    is_space(ch) || is_tab(ch)
}

/// Space, tab, line break, or end-of-input.
pub(crate) fn is_blankz(ch: Option<char>) -> bool {
    ch.map_or(true, |ch| is_blank(ch) || is_break(ch))
}

/// YAML "alphanumerical" (used for anchors, tag handles): ASCII alnum plus
/// `-`/`_`.
pub(crate) fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Printable per YAML 1.2's `c-printable` production (used to decide
/// whether a scalar needs escaping at all).
pub(crate) fn is_printable(ch: char) -> bool {
    match ch {
        '\u{feff}' | '\u{fffe}' | '\u{ffff}' => false,
        '\x09' | '\x0a' | '\x0d' | '\x20'..='\x7e' => true,
        '\u{0085}' | '\u{00a0}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' => true,
        '\u{10000}'..='\u{10ffff}' => true,
        _ => false,
    }
}

/// The three bidi-control / NBSP-ish characters YAML gives dedicated named
/// escapes: NEL, NBSP, LS, PS.
pub(crate) fn is_bom(ch: char) -> bool {
    ch == '\u{feff}'
}
