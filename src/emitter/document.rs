//! Document start/end emission (§4.10): `%YAML`/`%TAG` directives, the
//! `---`/`...` markers, and the default `!`/`!!` tag directives every
//! document carries implicitly.
//!
//! Grounded on the teacher's `yaml_emitter_emit_document_start`/
//! `_emit_document_end`/`_analyze_version_directive`/
//! `_analyze_tag_directive`/`_write_tag_handle`/`_write_tag_content`/
//! `_append_tag_directive`. Writing a byte-order mark is dropped: this
//! writer is UTF-8-only, so the teacher's non-UTF-8-encoding BOM path has
//! no counterpart here. The three-way `Policy` governing
//! whether directives/markers are forced on, forced off, or left to the
//! document's own `implicit` flags is **(ADDED)**: the teacher only offers
//! an always-on `canonical` switch.

use super::Emitter;
use crate::chars::is_alpha;
use crate::directives::{TagDirective, VersionDirective};
use crate::error::EmitterError;
use crate::event::{Event, EventData};

const DEFAULT_TAG_DIRECTIVES: [(&str, &str); 2] = [("!", "!"), ("!!", "tag:yaml.org,2002:")];

impl Emitter<'_> {
    pub(crate) fn analyze_version_directive(&self, v: VersionDirective) -> Result<(), EmitterError> {
        if v.major != 1 || (v.minor != 1 && v.minor != 2) {
            return Err(EmitterError::Problem("incompatible %YAML directive"));
        }
        Ok(())
    }

    pub(crate) fn analyze_tag_directive(&self, tag_directive: &TagDirective) -> Result<(), EmitterError> {
        if tag_directive.handle.is_empty() {
            return Err(EmitterError::Problem("tag handle must not be empty"));
        }
        if !tag_directive.handle.starts_with('!') {
            return Err(EmitterError::Problem("tag handle must start with '!'"));
        }
        if !tag_directive.handle.ends_with('!') {
            return Err(EmitterError::Problem("tag handle must end with '!'"));
        }
        if tag_directive.handle.len() > 2 {
            let middle = &tag_directive.handle[1..tag_directive.handle.len() - 1];
            if !middle.chars().all(is_alpha) {
                return Err(EmitterError::Problem("tag handle must contain alphanumerical characters only"));
            }
        }
        if tag_directive.prefix.is_empty() {
            return Err(EmitterError::Problem("tag prefix must not be empty"));
        }
        Ok(())
    }

    fn append_tag_directive(&mut self, value: TagDirective, allow_duplicates: bool) -> Result<(), EmitterError> {
        for existing in &self.tag_directives {
            if value.handle == existing.handle {
                if allow_duplicates {
                    return Ok(());
                }
                return Err(EmitterError::Problem("duplicate %TAG directive"));
            }
        }
        self.tag_directives.push(value);
        Ok(())
    }

    pub(crate) fn write_tag_handle(&mut self, value: &str) -> Result<(), EmitterError> {
        if !self.whitespace {
            self.put(b' ')?;
        }
        self.write_str(value)?;
        self.whitespace = false;
        self.indention = false;
        Ok(())
    }

    pub(crate) fn write_tag_content(&mut self, value: &str, need_whitespace: bool) -> Result<(), EmitterError> {
        if need_whitespace && !self.whitespace {
            self.put(b' ')?;
        }
        for ch in value.chars() {
            if is_alpha(ch) {
                self.write_str_char(ch)?;
                continue;
            }
            if matches!(
                ch,
                ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ',' | '_' | '.' | '~' | '*' | '\'' | '(' | ')' | '[' | ']'
            ) {
                self.write_str_char(ch)?;
                continue;
            }
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                let upper = (byte >> 4) + if (byte >> 4) < 10 { b'0' } else { b'A' - 10 };
                let lower = (byte & 0x0f) + if (byte & 0x0f) < 10 { b'0' } else { b'A' - 10 };
                self.put(b'%')?;
                self.put(upper)?;
                self.put(lower)?;
            }
        }
        self.whitespace = false;
        self.indention = false;
        Ok(())
    }

    pub(crate) fn emit_document_start(&mut self, event: &Event, first: bool) -> Result<(), EmitterError> {
        match &event.data {
            EventData::DocumentStart { version_directive, tag_directives, implicit } => {
                let mut implicit = *implicit;
                if let Some(v) = version_directive {
                    self.analyze_version_directive(*v)?;
                }
                for td in tag_directives {
                    self.analyze_tag_directive(td)?;
                    self.append_tag_directive(td.clone(), false)?;
                }
                for (handle, prefix) in DEFAULT_TAG_DIRECTIVES {
                    self.append_tag_directive(TagDirective::new(handle, prefix), true)?;
                }

                if !first {
                    implicit = false;
                }

                let write_version = version_directive.is_some() && self.config.version_directive_policy != crate::emitter::Policy::Off;
                let write_tags = !tag_directives.is_empty() && self.config.tag_directive_policy != crate::emitter::Policy::Off;

                if self.config.suppresses_directives() {
                    implicit = true;
                } else {
                    if (write_version || write_tags) && self.open_ended != 0 {
                        self.write_indicator("...", true, false, false)?;
                        self.write_indent()?;
                    }
                    self.open_ended = 0;
                    if write_version {
                        if let Some(v) = version_directive {
                            implicit = false;
                            self.write_indicator("%YAML", true, false, false)?;
                            self.write_indicator(if v.minor == 1 { "1.1" } else { "1.2" }, true, false, false)?;
                            self.write_indent()?;
                        }
                    }
                    if write_tags {
                        implicit = false;
                        for td in tag_directives {
                            self.write_indicator("%TAG", true, false, false)?;
                            self.write_tag_handle(&td.handle)?;
                            self.write_tag_content(&td.prefix, true)?;
                            self.write_indent()?;
                        }
                    }
                }

                if self.config.document_start_policy == crate::emitter::Policy::On {
                    implicit = false;
                }
                if self.config.document_start_policy == crate::emitter::Policy::Off {
                    implicit = true;
                }

                if !implicit {
                    self.write_indent()?;
                    self.write_indicator("---", true, false, false)?;
                }
                self.state = super::EmitterState::DocumentContent;
                self.open_ended = 0;
                Ok(())
            }
            EventData::StreamEnd => {
                if self.open_ended == 2 {
                    self.write_indicator("...", true, false, false)?;
                    self.open_ended = 0;
                    self.write_indent()?;
                }
                self.flush()?;
                self.state = super::EmitterState::End;
                Ok(())
            }
            _ => Err(EmitterError::Problem("expected DOCUMENT-START or STREAM-END")),
        }
    }

    pub(crate) fn emit_document_end(&mut self, event: &Event) -> Result<(), EmitterError> {
        let EventData::DocumentEnd { implicit } = &event.data else {
            return Err(EmitterError::Problem("expected DOCUMENT-END"));
        };
        let mut implicit = *implicit;
        if self.config.document_end_policy == crate::emitter::Policy::On {
            implicit = false;
        }
        if self.config.document_end_policy == crate::emitter::Policy::Off || self.config.suppresses_directives() {
            implicit = true;
        }

        self.write_indent()?;
        if !implicit {
            self.write_indicator("...", true, false, false)?;
            self.open_ended = 0;
            self.write_indent()?;
        } else if self.open_ended == 0 {
            self.open_ended = 1;
        }
        self.flush()?;
        self.state = super::EmitterState::DocumentStart;
        self.tag_directives.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EmitterConfig;

    fn new_emitter(buf: &mut Vec<u8>) -> Emitter<'_> {
        let mut e = Emitter::new(buf, EmitterConfig::default());
        e.whitespace = true;
        e.indention = true;
        e
    }

    #[test]
    fn explicit_document_start_writes_three_dashes() {
        let mut buf = Vec::new();
        let mut e = new_emitter(&mut buf);
        let ev = Event::document_start(None, &[], false);
        e.emit_document_start(&ev, true).unwrap();
        e.flush().unwrap();
        assert_eq!(buf, b"---");
    }

    #[test]
    fn version_directive_rejects_unknown_minor() {
        let e = new_emitter(&mut Vec::new());
        assert!(e.analyze_version_directive(VersionDirective::new(1, 9)).is_err());
        assert!(e.analyze_version_directive(VersionDirective::new(1, 2)).is_ok());
    }

    #[test]
    fn tag_directive_handle_must_be_bracketed_by_bangs() {
        let e = new_emitter(&mut Vec::new());
        assert!(e.analyze_tag_directive(&TagDirective::new("e", "tag:example.com,2000:")).is_err());
        assert!(e.analyze_tag_directive(&TagDirective::new("!e!", "tag:example.com,2000:")).is_ok());
    }

    #[test]
    fn version_directive_policy_off_suppresses_the_yaml_line() {
        let mut buf = Vec::new();
        let mut e = new_emitter(&mut buf);
        e.config.version_directive_policy = crate::emitter::Policy::Off;
        let ev = Event::document_start(Some(VersionDirective::new(1, 2)), &[], true);
        e.emit_document_start(&ev, true).unwrap();
        e.flush().unwrap();
        assert!(!String::from_utf8(buf).unwrap().contains("%YAML"));
    }

    #[test]
    fn tag_directive_policy_off_suppresses_the_tag_line_but_keeps_the_handle_usable() {
        let mut buf = Vec::new();
        let mut e = new_emitter(&mut buf);
        e.config.tag_directive_policy = crate::emitter::Policy::Off;
        let tds = [TagDirective::new("!e!", "tag:example.com,2000:")];
        let ev = Event::document_start(None, &tds, true);
        e.emit_document_start(&ev, true).unwrap();
        e.flush().unwrap();
        assert!(!String::from_utf8(buf).unwrap().contains("%TAG"));
        assert!(e.tag_directives.iter().any(|td| td.handle == "!e!"));
    }
}
