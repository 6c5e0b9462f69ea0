//! Flow/block sequence and mapping item writers (§4.9), plus the
//! simple-key/empty-container checks that drive style selection.
//!
//! Grounded on the teacher's `yaml_emitter_emit_flow_sequence_item`/
//! `_flow_mapping_key`/`_flow_mapping_value`/`_block_sequence_item`/
//! `_block_mapping_key`/`_block_mapping_value` and
//! `_check_simple_key`/`_check_empty_sequence`/`_check_empty_mapping`.
//!
//! `EmitterConfig::sort_keys` is **(ADDED)** (the teacher always emits
//! mapping pairs in arrival order), but it is implemented in
//! [`super::tree`], not here: the streaming path only ever buffers a
//! handful of events ahead of the one being dispatched (§4.11's bounded
//! lookahead), so by the time a mapping's first key reaches this module it
//! has already been popped and analyzed — there is no complete, still-queued
//! pair list left to reorder. The tree walker holds every pair up front and
//! can sort them before emitting the first event.

use super::stream::EventAnalysis;
use super::{Emitter, EmitterState};
use crate::error::EmitterError;
use crate::event::{Event, EventData};

impl Emitter<'_> {
    pub(crate) fn check_empty_sequence(&self, event: &Event) -> bool {
        if self.events.is_empty() {
            return false;
        }
        let start = matches!(event.data, EventData::SequenceStart { .. });
        let end = matches!(self.events[0].data, EventData::SequenceEnd);
        start && end
    }

    pub(crate) fn check_empty_mapping(&self, event: &Event) -> bool {
        if self.events.is_empty() {
            return false;
        }
        let start = matches!(event.data, EventData::MappingStart { .. });
        let end = matches!(self.events[0].data, EventData::MappingEnd);
        start && end
    }

    /// Can `event` be written as a mapping key without a `?` explicit-key
    /// indicator? A simple key must be a non-multiline scalar (or an empty
    /// container/alias) no longer than 128 bytes of anchor+tag+value.
    pub(crate) fn check_simple_key(&self, event: &Event, analysis: &EventAnalysis<'_>) -> bool {
        let mut length =
            analysis.anchor.as_ref().map_or(0, |a| a.anchor.len()) + analysis.tag.as_ref().map_or(0, |t| t.handle.len() + t.suffix.len());

        match &event.data {
            EventData::Alias { .. } => {
                length = analysis.anchor.as_ref().map_or(0, |a| a.anchor.len());
            }
            EventData::Scalar { .. } => {
                let Some(scalar) = &analysis.scalar else {
                    return false;
                };
                if scalar.multiline {
                    return false;
                }
                length += scalar.value.len();
            }
            EventData::SequenceStart { .. } => {
                if !self.check_empty_sequence(event) {
                    return false;
                }
            }
            EventData::MappingStart { .. } => {
                if !self.check_empty_mapping(event) {
                    return false;
                }
            }
            _ => return false,
        }

        length <= 128
    }

    pub(crate) fn emit_flow_sequence_item(
        &mut self,
        event: &Event,
        first: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if first {
            self.write_indicator("[", true, true, false)?;
            self.increase_indent(true, false);
            self.flow_level += 1;
        }
        if let EventData::SequenceEnd = &event.data {
            self.flow_level -= 1;
            self.restore_indent();
            self.write_indicator("]", false, false, false)?;
            self.state = self.pop_state();
            return Ok(());
        }
        if !first {
            self.write_indicator(",", false, false, false)?;
        }
        if self.column > self.best_width() {
            self.write_indent()?;
        }
        self.push_state(EmitterState::FlowSequenceItem);
        self.emit_node(event, false, true, false, false, analysis)
    }

    pub(crate) fn emit_flow_mapping_key(
        &mut self,
        event: &Event,
        first: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if first {
            self.write_indicator("{", true, true, false)?;
            self.increase_indent(true, false);
            self.flow_level += 1;
        }
        if let EventData::MappingEnd = &event.data {
            self.flow_level -= 1;
            self.restore_indent();
            self.write_indicator("}", false, false, false)?;
            self.state = self.pop_state();
            return Ok(());
        }
        if !first {
            self.write_indicator(",", false, false, false)?;
        }
        if self.column > self.best_width() {
            self.write_indent()?;
        }
        if self.check_simple_key(event, analysis) {
            self.push_state(EmitterState::FlowMappingSimpleValue);
            self.emit_node(event, false, false, true, true, analysis)
        } else {
            self.write_indicator("?", true, false, false)?;
            self.push_state(EmitterState::FlowMappingValue);
            self.emit_node(event, false, false, true, false, analysis)
        }
    }

    pub(crate) fn emit_flow_mapping_value(
        &mut self,
        event: &Event,
        simple: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if simple {
            self.write_indicator(":", false, false, false)?;
        } else {
            if self.column > self.best_width() {
                self.write_indent()?;
            }
            self.write_indicator(":", true, false, false)?;
        }
        self.push_state(EmitterState::FlowMappingKey);
        self.emit_node(event, false, false, true, false, analysis)
    }

    pub(crate) fn emit_block_sequence_item(
        &mut self,
        event: &Event,
        first: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if first {
            self.increase_indent(false, self.mapping_context && !self.indention);
        }
        if let EventData::SequenceEnd = &event.data {
            self.restore_indent();
            self.state = self.pop_state();
            return Ok(());
        }
        self.write_indent()?;
        self.write_indicator("-", true, false, true)?;
        self.push_state(EmitterState::BlockSequenceItem);
        self.emit_node(event, false, true, false, false, analysis)
    }

    pub(crate) fn emit_block_mapping_key(
        &mut self,
        event: &Event,
        first: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if first {
            self.increase_indent(false, false);
        }
        if let EventData::MappingEnd = &event.data {
            self.restore_indent();
            self.state = self.pop_state();
            return Ok(());
        }
        self.write_indent()?;
        if self.check_simple_key(event, analysis) {
            self.push_state(EmitterState::BlockMappingSimpleValue);
            self.emit_node(event, false, false, true, true, analysis)
        } else {
            self.write_indicator("?", true, false, true)?;
            self.push_state(EmitterState::BlockMappingValue);
            self.emit_node(event, false, false, true, false, analysis)
        }
    }

    pub(crate) fn emit_block_mapping_value(
        &mut self,
        event: &Event,
        simple: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        if simple {
            self.write_indicator(":", false, false, false)?;
        } else {
            self.write_indent()?;
            self.write_indicator(":", true, false, true)?;
        }
        self.push_state(EmitterState::BlockMappingKey);
        self.emit_node(event, false, false, true, false, analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::analysis::ScalarAnalysis;
    use crate::emitter::EmitterConfig;

    fn new_emitter(buf: &mut Vec<u8>) -> Emitter<'_> {
        Emitter::new(buf, EmitterConfig::default())
    }

    #[test]
    fn long_scalar_is_not_a_simple_key() {
        let e = new_emitter(&mut Vec::new());
        let long_value = "x".repeat(200);
        let analysis = EventAnalysis {
            anchor: None,
            tag: None,
            scalar: Some(ScalarAnalysis {
                value: &long_value,
                multiline: false,
                flow_plain_allowed: true,
                block_plain_allowed: true,
                single_quoted_allowed: true,
                block_allowed: true,
            }),
            style: Default::default(),
        };
        let ev = Event::scalar(None, None, &long_value, true, true, Default::default());
        assert!(!e.check_simple_key(&ev, &analysis));
    }

    #[test]
    fn multiline_scalar_is_not_a_simple_key() {
        let e = new_emitter(&mut Vec::new());
        let analysis = EventAnalysis {
            anchor: None,
            tag: None,
            scalar: Some(ScalarAnalysis {
                value: "a\nb",
                multiline: true,
                flow_plain_allowed: false,
                block_plain_allowed: false,
                single_quoted_allowed: true,
                block_allowed: true,
            }),
            style: Default::default(),
        };
        let ev = Event::scalar(None, None, "a\nb", true, true, Default::default());
        assert!(!e.check_simple_key(&ev, &analysis));
    }

    #[test]
    fn empty_queue_is_never_an_empty_sequence() {
        let e = new_emitter(&mut Vec::new());
        let ev = Event::sequence_start(None, None, true, Default::default());
        assert!(!e.check_empty_sequence(&ev));
    }
}
