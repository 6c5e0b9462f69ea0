//! Error types for the atom and emitter subsystems.
//!
//! Every fallible boundary returns one of these instead of panicking or
//! raising an exception, per §7 of the design: errors are reported to the
//! caller and leave the object safely destructible.

use crate::mark::Mark;

/// An error surfaced while decoding an atom's logical content.
///
/// Once an [`crate::atom::AtomIter`] latches one of these, every subsequent
/// call returns the same error (§7: "the error is latched on the iterator").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum AtomError {
    /// A `\` or `%` escape sequence did not form a valid escape.
    #[error("malformed escape sequence at {at}")]
    MalformedEscape {
        /// Where in the source span the bad escape starts.
        at: Mark,
    },
    /// A chunk buffer needed to grow past what the allocator could provide.
    #[error("out of memory while decoding atom")]
    OutOfMemory,
}

/// An error from the emitter's output callback.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WriterError {
    /// The callback returned fewer bytes written than it was given, or
    /// failed outright.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A previous write already failed; the emitter drops all further bytes
    /// (§7: "the emitter sets an `output_error` bit ... drops all
    /// subsequent bytes").
    #[error("a previous write already failed")]
    AlreadyFailed,
}

/// An error from the emitter, either a state-machine misuse or a propagated
/// write failure.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EmitterError {
    /// The emitter was asked to do something invalid for its current state
    /// (e.g. two DOCUMENT-START events with no DOCUMENT-END between them).
    #[error("{0}")]
    Problem(&'static str),
    /// The output callback failed; no further bytes will be written.
    #[error(transparent)]
    Writer(#[from] WriterError),
}
