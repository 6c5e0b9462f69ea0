//! Streaming events consumed by [`crate::emitter::stream`] (§4.11, §6:
//! "the parser supplies events (for streaming) or nodes (for tree
//! walking)").
//!
//! Grounded on the teacher's `event.rs`; the `encoding` field of its
//! `StreamStart` variant is dropped, since stream encoding is outside this
//! crate's scope (§1: I/O adapters are an external collaborator).

use crate::directives::{TagDirective, VersionDirective};
use crate::mark::Mark;
use crate::style::{MappingStyle, ScalarStyle, SequenceStyle};

/// One event in a stream, with its source span.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Event {
    pub data: EventData,
    pub start_mark: Mark,
    pub end_mark: Mark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    StreamStart,
    StreamEnd,
    DocumentStart {
        version_directive: Option<VersionDirective>,
        tag_directives: Vec<TagDirective>,
        implicit: bool,
    },
    DocumentEnd {
        implicit: bool,
    },
    Alias {
        anchor: String,
    },
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        value: String,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarStyle,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        style: SequenceStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        style: MappingStyle,
    },
    MappingEnd,
}

impl Event {
    fn new(data: EventData) -> Self {
        Event { data, start_mark: Mark::default(), end_mark: Mark::default() }
    }

    pub fn stream_start() -> Self {
        Self::new(EventData::StreamStart)
    }

    pub fn stream_end() -> Self {
        Self::new(EventData::StreamEnd)
    }

    pub fn document_start(
        version_directive: Option<VersionDirective>,
        tag_directives: &[TagDirective],
        implicit: bool,
    ) -> Self {
        Self::new(EventData::DocumentStart {
            version_directive,
            tag_directives: tag_directives.to_vec(),
            implicit,
        })
    }

    pub fn document_end(implicit: bool) -> Self {
        Self::new(EventData::DocumentEnd { implicit })
    }

    pub fn alias(anchor: &str) -> Self {
        Self::new(EventData::Alias { anchor: anchor.to_string() })
    }

    pub fn scalar(
        anchor: Option<&str>,
        tag: Option<&str>,
        value: &str,
        plain_implicit: bool,
        quoted_implicit: bool,
        style: ScalarStyle,
    ) -> Self {
        Self::new(EventData::Scalar {
            anchor: anchor.map(String::from),
            tag: tag.map(String::from),
            value: value.to_string(),
            plain_implicit,
            quoted_implicit,
            style,
        })
    }

    pub fn sequence_start(anchor: Option<&str>, tag: Option<&str>, implicit: bool, style: SequenceStyle) -> Self {
        Self::new(EventData::SequenceStart {
            anchor: anchor.map(String::from),
            tag: tag.map(String::from),
            implicit,
            style,
        })
    }

    pub fn sequence_end() -> Self {
        Self::new(EventData::SequenceEnd)
    }

    pub fn mapping_start(anchor: Option<&str>, tag: Option<&str>, implicit: bool, style: MappingStyle) -> Self {
        Self::new(EventData::MappingStart {
            anchor: anchor.map(String::from),
            tag: tag.map(String::from),
            implicit,
            style,
        })
    }

    pub fn mapping_end() -> Self {
        Self::new(EventData::MappingEnd)
    }

    /// Does this event open a container/document that must eventually be
    /// matched by a corresponding `*End`? Used by the state machine's
    /// lookahead depth counter (§4.11).
    pub(crate) fn opens_container(&self) -> bool {
        matches!(
            self.data,
            EventData::DocumentStart { .. } | EventData::SequenceStart { .. } | EventData::MappingStart { .. }
        )
    }

    pub(crate) fn closes_container(&self) -> bool {
        matches!(
            self.data,
            EventData::DocumentEnd { .. } | EventData::SequenceEnd | EventData::MappingEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_constructor_copies_its_strings() {
        let ev = Event::scalar(Some("a1"), None, "value", true, true, ScalarStyle::Plain);
        match ev.data {
            EventData::Scalar { anchor, value, .. } => {
                assert_eq!(anchor.as_deref(), Some("a1"));
                assert_eq!(value, "value");
            }
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn container_events_classify_as_open_or_close() {
        let start = Event::mapping_start(None, None, true, MappingStyle::Block);
        let end = Event::mapping_end();
        assert!(start.opens_container());
        assert!(end.closes_container());
        assert!(!start.closes_container());
    }
}
