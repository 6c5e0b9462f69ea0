//! Style and chomping enumerations shared by the atom and emitter subsystems.

/// The style an atom's raw span was scanned under.
///
/// The five YAML 1.2 scalar styles plus the two internal variants needed by
/// tag/comment scanning (`Uri`, `Comment`) and by callers that pre-escaped a
/// double-quoted scalar themselves (`DoubleQuotedManual`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[non_exhaustive]
pub enum AtomStyle {
    /// Unquoted scalar content (`key: value`).
    Plain,
    /// `'...'`-quoted scalar content.
    SingleQuoted,
    /// `"..."`-quoted scalar content, decoded via YAML 1.2 escapes.
    DoubleQuoted,
    /// `|`-block scalar content.
    Literal,
    /// `>`-block scalar content.
    Folded,
    /// A tag suffix or `%TAG` prefix, percent-escaped per RFC 3986.
    Uri,
    /// Double-quoted content the caller has already escaped; only
    /// non-printable/bidi/`"`/`\` characters get (re-)escaped on output.
    DoubleQuotedManual,
    /// A `#`-comment body.
    Comment,
}

/// Trailing-line-break policy for block scalars (`|`, `>`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[non_exhaustive]
pub enum Chomping {
    /// `-`: drop all trailing line breaks.
    Strip,
    /// (default) keep at most one trailing line break.
    #[default]
    Clip,
    /// `+`: keep all trailing line breaks.
    Keep,
}

/// Scalar styles recognized by the emitter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum ScalarStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The plain scalar style.
    Plain,
    /// The single-quoted scalar style.
    SingleQuoted,
    /// The double-quoted scalar style.
    DoubleQuoted,
    /// The literal scalar style.
    Literal,
    /// The folded scalar style.
    Folded,
}

/// Sequence styles recognized by the emitter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum SequenceStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The block sequence style (`- item`).
    Block,
    /// The flow sequence style (`[a, b]`).
    Flow,
}

/// Mapping styles recognized by the emitter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum MappingStyle {
    /// Let the emitter choose the style.
    #[default]
    Any,
    /// The block mapping style (`key: value`).
    Block,
    /// The flow mapping style (`{k: v}`).
    Flow,
}

/// Preferred line-break sequence used by the emitter.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub enum Break {
    /// Use LF (`\n`), the default.
    #[default]
    Ln,
    /// Use CR (`\r`).
    Cr,
    /// Use CRLF (`\r\n`).
    CrLn,
}

impl Break {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Break::Ln => "\n",
            Break::Cr => "\r",
            Break::CrLn => "\r\n",
        }
    }
}
