//! The tree-walking path (§4.10-§4.11 driven from a [`Document`] instead of
//! a caller-fed event stream).
//!
//! Grounded on the teacher's `yaml_emitter_open`/`_close`/`_dump`/
//! `_dump_node`/`_dump_alias`/`_dump_scalar`/`_dump_sequence`/`_dump_mapping`.
//! The teacher resolves anchors with a two-pass reference-counting scheme
//! over `yaml_node_t` (count every reference, auto-generate an `"id001"`
//! anchor the second time a node is reached, and track a `serialized` flag
//! to decide alias-vs-full-emit). This crate's [`crate::node::Document`]
//! instead carries an explicit `anchor: Option<String>` per node and a
//! dedicated [`crate::node::NodeData::Alias`] variant the caller constructs
//! directly, so that machinery has no counterpart here: walking just emits
//! each node's own anchor (if any) and turns an `Alias` node straight into
//! an `ALIAS` event (§9: "resolved lexically by name, not by pointer").

use super::Emitter;
use crate::error::EmitterError;
use crate::event::Event;
use crate::node::{Document, Node, NodeData, NodeId};
use crate::style::{MappingStyle, ScalarStyle, SequenceStyle};
use crate::{DEFAULT_MAPPING_TAG, DEFAULT_SCALAR_TAG, DEFAULT_SEQUENCE_TAG};

impl Emitter<'_> {
    /// Emit a whole document as one self-contained stream: `STREAM-START`,
    /// the document, `STREAM-END`.
    ///
    /// Mirrors `yaml_emitter_open`+`yaml_emitter_dump`+`yaml_emitter_close`
    /// collapsed into one call, since this crate's `Emitter` is single-use
    /// (one instance per tree walk, unlike the teacher's which can `dump`
    /// several documents between one `open`/`close` pair).
    pub fn emit_document(&mut self, document: &Document) -> Result<(), EmitterError> {
        self.emit(Event::stream_start())?;
        if let Some(root) = document.root_id() {
            self.emit(Event::document_start(
                document.version_directive,
                &document.tag_directives,
                document.start_implicit,
            ))?;
            self.dump_node(document, root)?;
            self.emit(Event::document_end(document.end_implicit))?;
        }
        self.emit(Event::stream_end())
    }

    fn dump_node(&mut self, document: &Document, id: NodeId) -> Result<(), EmitterError> {
        let node = document.get_node(id).expect("dangling node id in document tree");
        if let NodeData::Alias { anchor } = &node.data {
            return self.emit(Event::alias(anchor));
        }

        let anchor = node.anchor.as_deref();
        let tag = node.tag.as_deref();
        match &node.data {
            NodeData::Scalar { value, style } => self.dump_scalar(node, anchor, tag, value, *style),
            NodeData::Sequence { items, style } => self.dump_sequence(document, anchor, tag, items, *style),
            NodeData::Mapping { pairs, style } => self.dump_mapping(document, anchor, tag, pairs, *style),
            NodeData::Alias { .. } => unreachable!("handled above"),
        }
    }

    fn dump_scalar(
        &mut self,
        _node: &Node,
        anchor: Option<&str>,
        tag: Option<&str>,
        value: &str,
        style: ScalarStyle,
    ) -> Result<(), EmitterError> {
        let implicit = tag.is_none() || tag == Some(DEFAULT_SCALAR_TAG);
        self.emit(Event::scalar(anchor, tag, value, implicit, implicit, style))
    }

    fn dump_sequence(
        &mut self,
        document: &Document,
        anchor: Option<&str>,
        tag: Option<&str>,
        items: &[NodeId],
        style: SequenceStyle,
    ) -> Result<(), EmitterError> {
        let implicit = tag.is_none() || tag == Some(DEFAULT_SEQUENCE_TAG);
        self.emit(Event::sequence_start(anchor, tag, implicit, style))?;
        for &item in items {
            self.dump_node(document, item)?;
        }
        self.emit(Event::sequence_end())
    }

    fn dump_mapping(
        &mut self,
        document: &Document,
        anchor: Option<&str>,
        tag: Option<&str>,
        pairs: &[crate::node::NodePair],
        style: MappingStyle,
    ) -> Result<(), EmitterError> {
        let implicit = tag.is_none() || tag == Some(DEFAULT_MAPPING_TAG);
        self.emit(Event::mapping_start(anchor, tag, implicit, style))?;

        if self.config.sort_keys {
            let mut sorted = pairs.to_vec();
            sorted.sort_by(|a, b| sort_key_text(document, a.key).cmp(sort_key_text(document, b.key)));
            for pair in &sorted {
                self.dump_node(document, pair.key)?;
                self.dump_node(document, pair.value)?;
            }
        } else {
            for pair in pairs {
                self.dump_node(document, pair.key)?;
                self.dump_node(document, pair.value)?;
            }
        }

        self.emit(Event::mapping_end())
    }
}

/// The text a mapping key sorts by: a scalar key's value, an alias's anchor
/// name, or (for sequence/mapping keys) nothing — those sort first and keep
/// their relative order, since a complex key has no natural string form.
fn sort_key_text(document: &Document, key: NodeId) -> &str {
    match document.get_node(key).map(|n| &n.data) {
        Some(NodeData::Scalar { value, .. }) => value,
        Some(NodeData::Alias { anchor }) => anchor,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EmitterConfig;

    #[test]
    fn walks_a_plain_scalar_document() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        doc.add_scalar(None, "hello", ScalarStyle::Plain);
        let mut buf = Vec::new();
        let mut e = Emitter::new(&mut buf, EmitterConfig::default());
        e.emit_document(&doc).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "hello\n");
    }

    #[test]
    fn walks_a_mapping_with_an_anchored_alias() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        let shared = doc.add_scalar(None, "x", ScalarStyle::Plain);
        doc.get_node_mut(shared).unwrap().anchor = Some("a1".to_string());
        let k1 = doc.add_scalar(None, "first", ScalarStyle::Plain);
        let k2 = doc.add_scalar(None, "second", ScalarStyle::Plain);
        let alias = doc.add_alias("a1");
        let map = doc.add_mapping(None, MappingStyle::Block);
        doc.append_mapping_pair(map, k1, shared);
        doc.append_mapping_pair(map, k2, alias);

        let mut buf = Vec::new();
        let mut e = Emitter::new(&mut buf, EmitterConfig::default());
        e.emit_document(&doc).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "first: &a1 x\nsecond: *a1\n");
    }

    #[test]
    fn sort_keys_reorders_a_block_mapping_lexicographically() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        let map = doc.add_mapping(None, MappingStyle::Block);
        for (k, v) in [("zeta", "1"), ("alpha", "2"), ("mu", "3")] {
            let key = doc.add_scalar(None, k, ScalarStyle::Plain);
            let value = doc.add_scalar(None, v, ScalarStyle::Plain);
            doc.append_mapping_pair(map, key, value);
        }
        let mut buf = Vec::new();
        let mut e = Emitter::new(&mut buf, EmitterConfig::default());
        e.config.sort_keys = true;
        e.emit_document(&doc).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "alpha: 2\nmu: 3\nzeta: 1\n");
    }

    #[test]
    fn empty_document_emits_only_stream_markers() {
        let doc = Document::new(None, Vec::new(), true, true);
        let mut buf = Vec::new();
        let mut e = Emitter::new(&mut buf, EmitterConfig::default());
        e.emit_document(&doc).unwrap();
        assert_eq!(buf, b"");
    }
}
