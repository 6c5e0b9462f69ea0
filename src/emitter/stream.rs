//! The streaming event-driven path (§4.11): a FIFO of incoming events with
//! bounded lookahead, dispatched through the [`EmitterState`] machine.
//!
//! Grounded on the teacher's `yaml_emitter_emit`/`_needs_mode_events`/
//! `_state_machine`/`_emit_stream_start`/`_emit_node`/`_emit_alias`/
//! `_emit_scalar`/`_emit_sequence_start`/`_emit_mapping_start`/
//! `_process_anchor`/`_process_tag`/`_process_scalar`/`_analyze_event`/
//! `_write_anchor`.

use super::analysis::{analyze_anchor, analyze_scalar, analyze_tag, AnchorAnalysis, ScalarAnalysis, TagAnalysis};
use super::style_select::select_scalar_style;
use super::{Emitter, EmitterState};
use crate::error::EmitterError;
use crate::event::{Event, EventData};
use crate::style::{MappingStyle, ScalarStyle, SequenceStyle};

/// The per-event anchor/tag/scalar analysis, plus the style finally chosen
/// for a scalar (the teacher stores this inside `ScalarAnalysis` itself;
/// here style selection is a pure function, so the chosen style is kept
/// alongside instead of folded into `analysis.rs`'s structs).
pub(crate) struct EventAnalysis<'a> {
    pub anchor: Option<AnchorAnalysis<'a>>,
    pub tag: Option<TagAnalysis<'a>>,
    pub scalar: Option<ScalarAnalysis<'a>>,
    pub style: ScalarStyle,
}

impl Emitter<'_> {
    /// Queue `event` and drive the state machine over every event that is
    /// now fully bufferable (§4.11: a container's start/first-N-children
    /// must all have arrived before it can be analyzed and emitted).
    pub fn emit(&mut self, event: Event) -> Result<(), EmitterError> {
        self.check_output_error()?;
        self.events.push_back(event);
        while let Some(event) = self.needs_mode_events() {
            let tag_directives = std::mem::take(&mut self.tag_directives);
            let mut analysis = self.analyze_event(&event, &tag_directives)?;
            let result = self.state_machine(&event, &mut analysis);
            if self.tag_directives.is_empty() {
                self.tag_directives = tag_directives;
            }
            if let Err(err) = &result {
                if !self.state_error_logged {
                    tracing::warn!(%err, "latching emitter state-misuse error");
                    self.state_error_logged = true;
                }
            }
            result?;
        }
        Ok(())
    }

    /// Pop the next event off the queue, but only once enough lookahead has
    /// arrived: a container-opening event needs its full nested subtree (or
    /// the tail of the stream) queued up first, so empty-container and
    /// simple-key checks can see past it.
    fn needs_mode_events(&mut self) -> Option<Event> {
        let first = self.events.front()?;
        let accumulate = match &first.data {
            EventData::DocumentStart { .. } => 1,
            EventData::SequenceStart { .. } => 2,
            EventData::MappingStart { .. } => 3,
            _ => return self.events.pop_front(),
        };
        if self.events.len() > accumulate {
            return self.events.pop_front();
        }
        let mut level = 0i32;
        for event in &self.events {
            if event.opens_container() || matches!(event.data, EventData::StreamStart) {
                level += 1;
            } else if event.closes_container() || matches!(event.data, EventData::StreamEnd) {
                level -= 1;
            }
            if level == 0 {
                return self.events.pop_front();
            }
        }
        None
    }

    fn state_machine(&mut self, event: &Event, analysis: &mut EventAnalysis<'_>) -> Result<(), EmitterError> {
        match self.state {
            EmitterState::StreamStart => self.emit_stream_start(event),
            EmitterState::FirstDocumentStart => self.emit_document_start(event, true),
            EmitterState::DocumentStart => self.emit_document_start(event, false),
            EmitterState::DocumentContent => self.emit_document_content(event, analysis),
            EmitterState::DocumentEnd => self.emit_document_end(event),
            EmitterState::FlowSequenceFirstItem => self.emit_flow_sequence_item(event, true, analysis),
            EmitterState::FlowSequenceItem => self.emit_flow_sequence_item(event, false, analysis),
            EmitterState::FlowMappingFirstKey => self.emit_flow_mapping_key(event, true, analysis),
            EmitterState::FlowMappingKey => self.emit_flow_mapping_key(event, false, analysis),
            EmitterState::FlowMappingSimpleValue => self.emit_flow_mapping_value(event, true, analysis),
            EmitterState::FlowMappingValue => self.emit_flow_mapping_value(event, false, analysis),
            EmitterState::BlockSequenceFirstItem => self.emit_block_sequence_item(event, true, analysis),
            EmitterState::BlockSequenceItem => self.emit_block_sequence_item(event, false, analysis),
            EmitterState::BlockMappingFirstKey => self.emit_block_mapping_key(event, true, analysis),
            EmitterState::BlockMappingKey => self.emit_block_mapping_key(event, false, analysis),
            EmitterState::BlockMappingSimpleValue => self.emit_block_mapping_value(event, true, analysis),
            EmitterState::BlockMappingValue => self.emit_block_mapping_value(event, false, analysis),
            EmitterState::End => Err(EmitterError::Problem("expected nothing after STREAM-END")),
        }
    }

    fn emit_stream_start(&mut self, event: &Event) -> Result<(), EmitterError> {
        let EventData::StreamStart = &event.data else {
            return Err(EmitterError::Problem("expected STREAM-START"));
        };
        self.open_ended = 0;
        self.indent = -1;
        self.line = 0;
        self.column = 0;
        self.whitespace = true;
        self.indention = true;
        self.state = EmitterState::FirstDocumentStart;
        Ok(())
    }

    fn emit_document_content(&mut self, event: &Event, analysis: &mut EventAnalysis<'_>) -> Result<(), EmitterError> {
        self.push_state(EmitterState::DocumentEnd);
        self.emit_node(event, true, false, false, false, analysis)
    }

    fn emit_node(
        &mut self,
        event: &Event,
        root: bool,
        sequence: bool,
        mapping: bool,
        simple_key: bool,
        analysis: &mut EventAnalysis<'_>,
    ) -> Result<(), EmitterError> {
        self.root_context = root;
        self.sequence_context = sequence;
        self.mapping_context = mapping;
        self.simple_key_context = simple_key;

        match &event.data {
            EventData::Alias { .. } => self.emit_alias(analysis),
            EventData::Scalar { .. } => self.emit_scalar(event, analysis),
            EventData::SequenceStart { .. } => self.emit_sequence_start(event, analysis),
            EventData::MappingStart { .. } => self.emit_mapping_start(event, analysis),
            _ => Err(EmitterError::Problem("expected SCALAR, SEQUENCE-START, MAPPING-START, or ALIAS")),
        }
    }

    fn emit_alias(&mut self, analysis: &EventAnalysis<'_>) -> Result<(), EmitterError> {
        self.process_anchor(&analysis.anchor)?;
        if self.simple_key_context {
            self.put(b' ')?;
        }
        self.state = self.pop_state();
        Ok(())
    }

    /// Pick the scalar's final style now that [`Emitter::emit_node`] has set
    /// `simple_key_context`/`flow_level` for this position, then process
    /// anchor/tag/scalar in that order (§4.7, §4.9).
    fn emit_scalar(&mut self, event: &Event, analysis: &mut EventAnalysis<'_>) -> Result<(), EmitterError> {
        let EventData::Scalar { plain_implicit, quoted_implicit, style: requested, .. } = &event.data else {
            unreachable!()
        };
        let scalar = analysis.scalar.as_ref().expect("scalar analysis missing for SCALAR event");
        let no_tag = analysis.tag.is_none();
        if no_tag && !*plain_implicit && !*quoted_implicit {
            return Err(EmitterError::Problem("neither tag nor implicit flags are specified"));
        }

        let mut chosen = select_scalar_style(*requested, self.config.mode, self.flow_level != 0, self.simple_key_context, scalar);
        if no_tag && !*plain_implicit && chosen == ScalarStyle::Plain {
            chosen = ScalarStyle::SingleQuoted;
        }
        if no_tag && !*quoted_implicit && chosen != ScalarStyle::Plain {
            analysis.tag = Some(TagAnalysis { handle: "!", suffix: "" });
        }
        analysis.style = chosen;

        self.process_anchor(&analysis.anchor)?;
        self.process_tag(&analysis.tag)?;
        self.increase_indent(true, false);
        self.process_scalar(analysis)?;
        self.restore_indent();
        self.state = self.pop_state();
        Ok(())
    }

    fn emit_sequence_start(&mut self, event: &Event, analysis: &EventAnalysis<'_>) -> Result<(), EmitterError> {
        self.process_anchor(&analysis.anchor)?;
        self.process_tag(&analysis.tag)?;
        let EventData::SequenceStart { style, .. } = &event.data else {
            unreachable!()
        };
        self.state = if self.flow_level != 0
            || self.config.mode.is_flow_only()
            || *style == SequenceStyle::Flow
            || self.check_empty_sequence(event)
        {
            EmitterState::FlowSequenceFirstItem
        } else {
            EmitterState::BlockSequenceFirstItem
        };
        Ok(())
    }

    fn emit_mapping_start(&mut self, event: &Event, analysis: &EventAnalysis<'_>) -> Result<(), EmitterError> {
        self.process_anchor(&analysis.anchor)?;
        self.process_tag(&analysis.tag)?;
        let EventData::MappingStart { style, .. } = &event.data else {
            unreachable!()
        };
        self.state = if self.flow_level != 0
            || self.config.mode.is_flow_only()
            || *style == MappingStyle::Flow
            || self.check_empty_mapping(event)
        {
            EmitterState::FlowMappingFirstKey
        } else {
            EmitterState::BlockMappingFirstKey
        };
        Ok(())
    }

    fn process_anchor(&mut self, analysis: &Option<AnchorAnalysis<'_>>) -> Result<(), EmitterError> {
        if self.config.suppresses_anchors() {
            return Ok(());
        }
        let Some(analysis) = analysis else {
            return Ok(());
        };
        self.write_indicator(if analysis.alias { "*" } else { "&" }, true, false, false)?;
        self.write_str(analysis.anchor)?;
        self.whitespace = false;
        self.indention = false;
        Ok(())
    }

    fn process_tag(&mut self, analysis: &Option<TagAnalysis<'_>>) -> Result<(), EmitterError> {
        if self.config.suppresses_tags() {
            return Ok(());
        }
        let Some(analysis) = analysis else {
            return Ok(());
        };
        if analysis.handle.is_empty() && analysis.suffix.is_empty() {
            return Ok(());
        }
        if analysis.handle.is_empty() {
            self.write_indicator("!<", true, false, false)?;
            self.write_tag_content(analysis.suffix, false)?;
            self.write_indicator(">", false, false, false)?;
        } else {
            self.write_tag_handle(analysis.handle)?;
            if !analysis.suffix.is_empty() {
                self.write_tag_content(analysis.suffix, false)?;
            }
        }
        Ok(())
    }

    fn process_scalar(&mut self, analysis: &EventAnalysis<'_>) -> Result<(), EmitterError> {
        let scalar = analysis.scalar.as_ref().expect("scalar analysis missing for SCALAR event");
        let allow_breaks = !self.simple_key_context;
        match analysis.style {
            ScalarStyle::Any => unreachable!("no scalar style chosen"),
            ScalarStyle::Plain => self.write_plain_scalar(scalar.value, allow_breaks),
            ScalarStyle::SingleQuoted => self.write_single_quoted_scalar(scalar.value, allow_breaks),
            ScalarStyle::DoubleQuoted => self.write_double_quoted_scalar(scalar.value, allow_breaks),
            ScalarStyle::Literal => self.write_literal_scalar(scalar.value),
            ScalarStyle::Folded => self.write_folded_scalar(scalar.value),
        }
    }

    /// Build the anchor/tag/scalar analysis for one event (§4.7), and for
    /// scalars also pick the concrete style that will actually be written.
    fn analyze_event<'a>(
        &self,
        event: &'a Event,
        tag_directives: &'a [crate::directives::TagDirective],
    ) -> Result<EventAnalysis<'a>, EmitterError> {
        let mut out = EventAnalysis { anchor: None, tag: None, scalar: None, style: ScalarStyle::Any };

        match &event.data {
            EventData::Alias { anchor } => {
                out.anchor = Some(analyze_anchor(anchor, true)?);
            }
            EventData::Scalar { anchor, tag, value, plain_implicit, quoted_implicit, .. } => {
                if let Some(anchor) = anchor {
                    out.anchor = Some(analyze_anchor(anchor, false)?);
                }
                if let Some(tag) = tag {
                    if !*plain_implicit && !*quoted_implicit {
                        out.tag = Some(analyze_tag(tag, tag_directives)?);
                    }
                }
                if out.tag.is_none() && !*plain_implicit && !*quoted_implicit {
                    return Err(EmitterError::Problem("neither tag nor implicit flags are specified"));
                }
                // The concrete style is picked later, in `emit_scalar`, once
                // `simple_key_context` is known for this position.
                out.scalar = Some(analyze_scalar(value, self.config.unicode));
            }
            EventData::SequenceStart { anchor, tag, implicit, .. } => {
                if let Some(anchor) = anchor {
                    out.anchor = Some(analyze_anchor(anchor, false)?);
                }
                if let Some(tag) = tag {
                    if !*implicit {
                        out.tag = Some(analyze_tag(tag, tag_directives)?);
                    }
                }
            }
            EventData::MappingStart { anchor, tag, implicit, .. } => {
                if let Some(anchor) = anchor {
                    out.anchor = Some(analyze_anchor(anchor, false)?);
                }
                if let Some(tag) = tag {
                    if !*implicit {
                        out.tag = Some(analyze_tag(tag, tag_directives)?);
                    }
                }
            }
            _ => {}
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EmitterConfig;
    use crate::style::{MappingStyle, SequenceStyle};

    fn run(events: Vec<Event>) -> String {
        let mut buf = Vec::new();
        {
            let mut e = Emitter::new(&mut buf, EmitterConfig::default());
            for ev in events {
                e.emit(ev).unwrap();
            }
            e.flush().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn emits_a_single_plain_scalar_document() {
        let out = run(vec![
            Event::stream_start(),
            Event::document_start(None, &[], true),
            Event::scalar(None, None, "hello", true, false, ScalarStyle::Any),
            Event::document_end(true),
            Event::stream_end(),
        ]);
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn emits_a_flow_sequence_of_scalars() {
        let out = run(vec![
            Event::stream_start(),
            Event::document_start(None, &[], true),
            Event::sequence_start(None, None, true, SequenceStyle::Flow),
            Event::scalar(None, None, "a", true, false, ScalarStyle::Any),
            Event::scalar(None, None, "b", true, false, ScalarStyle::Any),
            Event::sequence_end(),
            Event::document_end(true),
            Event::stream_end(),
        ]);
        assert_eq!(out, "[a, b]\n");
    }

    #[test]
    fn emits_a_block_mapping() {
        let out = run(vec![
            Event::stream_start(),
            Event::document_start(None, &[], true),
            Event::mapping_start(None, None, true, MappingStyle::Block),
            Event::scalar(None, None, "a", true, false, ScalarStyle::Any),
            Event::scalar(None, None, "1", true, false, ScalarStyle::Any),
            Event::mapping_end(),
            Event::document_end(true),
            Event::stream_end(),
        ]);
        assert_eq!(out, "a: 1\n");
    }
}
