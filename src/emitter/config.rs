//! Emitter configuration (§6: "Configuration surface").
//!
//! An explicit record built up field by field, the same way the teacher's
//! `yaml_emitter_set_canonical`/`_set_indent`/`_set_width`/`_set_unicode`/
//! `_set_break` build up emitter state — generalized from five scattered
//! setters into one value the caller constructs up front.

use crate::style::Break;

/// Which family of output the emitter produces.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[non_exhaustive]
pub enum EmitterMode {
    /// Block style preferred where legal, `---`/directives honored.
    #[default]
    Block,
    /// Always flow style.
    Flow,
    /// Flow style, collapsed onto a single line (no width wrapping).
    FlowOneLine,
    /// RFC 8259 JSON: flow only, no directives/tags/anchors/comments.
    Json,
    /// JSON with trailing punctuation the "TP" (trailing punctuation)
    /// convention expects after the top-level value.
    JsonTp,
    /// JSON collapsed onto a single line.
    JsonOneLine,
}

impl EmitterMode {
    pub fn is_json(self) -> bool {
        matches!(self, EmitterMode::Json | EmitterMode::JsonTp | EmitterMode::JsonOneLine)
    }

    pub fn is_flow_only(self) -> bool {
        matches!(
            self,
            EmitterMode::Flow
                | EmitterMode::FlowOneLine
                | EmitterMode::Json
                | EmitterMode::JsonTp
                | EmitterMode::JsonOneLine
        )
    }

    pub fn is_one_line(self) -> bool {
        matches!(self, EmitterMode::FlowOneLine | EmitterMode::JsonOneLine)
    }
}

/// A three-way policy for directives or document markers (§6).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[non_exhaustive]
pub enum Policy {
    /// Emit iff the document layer says it is needed.
    #[default]
    Auto,
    /// Always emit.
    On,
    /// Never emit.
    Off,
}

/// The preferred line width, or no limit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Width {
    Columns(u32),
    Unbounded,
}

impl Default for Width {
    fn default() -> Self {
        Width::Columns(80)
    }
}

/// The emitter's configuration surface (§6), built up field by field before
/// emission starts (there is no file/env loading layer; that is an external
/// collaborator per §1).
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct EmitterConfig {
    pub mode: EmitterMode,
    /// 1-9, default 2.
    pub indent_step: i32,
    pub width: Width,
    pub version_directive_policy: Policy,
    pub tag_directive_policy: Policy,
    pub document_start_policy: Policy,
    pub document_end_policy: Policy,
    /// Suppress anchors/aliases entirely.
    pub strip_labels: bool,
    /// Suppress explicit tags entirely.
    pub strip_tags: bool,
    /// Suppress `%YAML`/`%TAG` directives and `---`/`...` markers entirely.
    pub strip_documents: bool,
    /// Stable-sort mapping pairs by key text before emission.
    pub sort_keys: bool,
    /// Emit attached comments (§9 "Comment placement").
    pub output_comments: bool,
    /// Allow non-ASCII to pass through unescaped in quoted scalars.
    pub unicode: bool,
    /// The line-break sequence written for every `\n` in the output.
    pub line_break: Break,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        EmitterConfig {
            mode: EmitterMode::Block,
            indent_step: 2,
            width: Width::default(),
            version_directive_policy: Policy::Auto,
            tag_directive_policy: Policy::Auto,
            document_start_policy: Policy::Auto,
            document_end_policy: Policy::Auto,
            strip_labels: false,
            strip_tags: false,
            strip_documents: false,
            sort_keys: false,
            output_comments: false,
            unicode: true,
            line_break: Break::Ln,
        }
    }
}

impl EmitterConfig {
    pub fn with_mode(mut self, mode: EmitterMode) -> Self {
        if mode.is_json() || mode.is_flow_only() {
            self.strip_documents = self.strip_documents || mode.is_json();
        }
        self.mode = mode;
        self
    }

    pub fn with_indent_step(mut self, step: i32) -> Self {
        self.indent_step = if (2..=9).contains(&step) { step } else { 2 };
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    /// The effective best-width used by the primitives and scalar writers:
    /// JSON/one-line modes never wrap, regardless of the configured width.
    pub(crate) fn effective_width(&self) -> Option<u32> {
        if self.mode.is_one_line() || self.mode.is_json() {
            return None;
        }
        match self.width {
            Width::Columns(w) => Some(w),
            Width::Unbounded => None,
        }
    }

    pub(crate) fn suppresses_directives(&self) -> bool {
        self.strip_documents || self.mode.is_json()
    }

    pub(crate) fn suppresses_anchors(&self) -> bool {
        self.strip_labels || self.mode.is_json()
    }

    pub(crate) fn suppresses_tags(&self) -> bool {
        self.strip_tags || self.mode.is_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_suppresses_directives_by_default() {
        let cfg = EmitterConfig::default().with_mode(EmitterMode::Json);
        assert!(cfg.suppresses_directives());
        assert!(cfg.suppresses_anchors());
    }

    #[test]
    fn one_line_mode_has_no_effective_width() {
        let cfg = EmitterConfig::default().with_mode(EmitterMode::FlowOneLine);
        assert_eq!(cfg.effective_width(), None);
    }

    #[test]
    fn indent_step_out_of_range_falls_back_to_two() {
        let cfg = EmitterConfig::default().with_indent_step(20);
        assert_eq!(cfg.indent_step, 2);
    }
}
