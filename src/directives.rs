//! `%YAML` and `%TAG` directive data, attached to documents and to the
//! `DOCUMENT-START` event.
//!
//! Grounded on the teacher's `lib.rs::VersionDirective`/`TagDirective`.

/// A `%YAML major.minor` directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct VersionDirective {
    pub major: i32,
    pub minor: i32,
}

impl VersionDirective {
    pub fn new(major: i32, minor: i32) -> Self {
        VersionDirective { major, minor }
    }
}

/// A `%TAG handle prefix` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

impl TagDirective {
    pub fn new(handle: impl Into<String>, prefix: impl Into<String>) -> Self {
        TagDirective {
            handle: handle.into(),
            prefix: prefix.into(),
        }
    }
}
