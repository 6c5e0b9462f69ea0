//! The minimal document/node tree the tree-walking emitter consumes (§6:
//! "the parser supplies nodes ... for tree walking").
//!
//! The scanner, parser, and full document/node model are out of scope
//! (§1); this is the thin, index-arena surface the emitter needs to be
//! exercised and tested without one, grounded on the teacher's own
//! `document.rs` (handle-indexed `Vec<Node>`, 1-based ids, 0 meaning "no
//! node").

use crate::directives::{TagDirective, VersionDirective};
use crate::mark::Mark;
use crate::style::{MappingStyle, ScalarStyle, SequenceStyle};

/// A 1-based index into [`Document::nodes`]; `0` denotes "no node" (mirrors
/// the teacher's convention, kept instead of `Option<NonZeroU32>` so
/// construction code reads the same as the teacher's).
pub type NodeId = i32;

/// Which of a node's three independently-attached comment slots (§9).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CommentSlot {
    Top,
    Right,
    Bottom,
}

impl CommentSlot {
    fn index(self) -> usize {
        match self {
            CommentSlot::Top => 0,
            CommentSlot::Right => 1,
            CommentSlot::Bottom => 2,
        }
    }
}

/// A document: a flat node arena plus its directives and marker policy.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Document {
    pub nodes: Vec<Node>,
    pub version_directive: Option<VersionDirective>,
    pub tag_directives: Vec<TagDirective>,
    pub start_implicit: bool,
    pub end_implicit: bool,
    pub start_mark: Mark,
    pub end_mark: Mark,
}

/// One node in the tree.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Node {
    pub data: NodeData,
    pub tag: Option<String>,
    pub anchor: Option<String>,
    comments: [Option<String>; 3],
    pub start_mark: Mark,
    pub end_mark: Mark,
}

/// What kind of node this is, and its children.
///
/// There is no cycle-breaking machinery here: an `Alias` just names the
/// anchor it refers to (§9 "the node tree is a DAG only via anchor/alias
/// references which are resolved lexically by name, not by pointer").
#[derive(Clone, Debug)]
pub enum NodeData {
    Scalar { value: String, style: ScalarStyle },
    Sequence { items: Vec<NodeId>, style: SequenceStyle },
    Mapping { pairs: Vec<NodePair>, style: MappingStyle },
    Alias { anchor: String },
}

/// A key/value pair inside a mapping node.
#[derive(Copy, Clone, Debug)]
pub struct NodePair {
    pub key: NodeId,
    pub value: NodeId,
}

impl Node {
    fn new(data: NodeData, tag: Option<&str>, mark: Mark) -> Self {
        Node {
            data,
            tag: tag.map(String::from),
            anchor: None,
            comments: [None, None, None],
            start_mark: mark,
            end_mark: mark,
        }
    }

    pub fn comment(&self, slot: CommentSlot) -> Option<&str> {
        self.comments[slot.index()].as_deref()
    }

    pub fn set_comment(&mut self, slot: CommentSlot, text: impl Into<String>) {
        self.comments[slot.index()] = Some(text.into());
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.data, NodeData::Scalar { .. })
    }
}

impl Document {
    pub fn new(
        version_directive: Option<VersionDirective>,
        tag_directives: Vec<TagDirective>,
        start_implicit: bool,
        end_implicit: bool,
    ) -> Self {
        Document {
            nodes: Vec::new(),
            version_directive,
            tag_directives,
            start_implicit,
            end_implicit,
            start_mark: Mark::default(),
            end_mark: Mark::default(),
        }
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize - 1)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id as usize - 1)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// The id of the first node added, i.e. the tree's root (§6: "the
    /// first node in the arena is the document's root").
    pub fn root_id(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(1)
        }
    }

    pub fn add_scalar(&mut self, tag: Option<&str>, value: impl Into<String>, style: ScalarStyle) -> NodeId {
        let node = Node::new(
            NodeData::Scalar { value: value.into(), style },
            tag,
            Mark::default(),
        );
        self.nodes.push(node);
        self.nodes.len() as NodeId
    }

    pub fn add_sequence(&mut self, tag: Option<&str>, style: SequenceStyle) -> NodeId {
        let node = Node::new(NodeData::Sequence { items: Vec::new(), style }, tag, Mark::default());
        self.nodes.push(node);
        self.nodes.len() as NodeId
    }

    pub fn add_mapping(&mut self, tag: Option<&str>, style: MappingStyle) -> NodeId {
        let node = Node::new(NodeData::Mapping { pairs: Vec::new(), style }, tag, Mark::default());
        self.nodes.push(node);
        self.nodes.len() as NodeId
    }

    /// An alias node referring to `anchor` by name. An alias carries no tag
    /// and no anchor of its own — it is resolved against whichever node in
    /// this document already set `anchor` via [`Node::anchor`].
    pub fn add_alias(&mut self, anchor: impl Into<String>) -> NodeId {
        let node = Node::new(NodeData::Alias { anchor: anchor.into() }, None, Mark::default());
        self.nodes.push(node);
        self.nodes.len() as NodeId
    }

    pub fn append_sequence_item(&mut self, sequence: NodeId, item: NodeId) {
        if let Some(Node { data: NodeData::Sequence { items, .. }, .. }) = self.get_node_mut(sequence) {
            items.push(item);
        }
    }

    pub fn append_mapping_pair(&mut self, mapping: NodeId, key: NodeId, value: NodeId) {
        if let Some(Node { data: NodeData::Mapping { pairs, .. }, .. }) = self.get_node_mut(mapping) {
            pairs.push(NodePair { key, value });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_small_mapping_tree() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        let k = doc.add_scalar(None, "k", ScalarStyle::Plain);
        let v = doc.add_scalar(None, "true", ScalarStyle::Plain);
        let map = doc.add_mapping(None, MappingStyle::Flow);
        doc.append_mapping_pair(map, k, v);
        match &doc.get_node(map).unwrap().data {
            NodeData::Mapping { pairs, .. } => assert_eq!(pairs.len(), 1),
            _ => panic!("expected mapping"),
        }
    }

    #[test]
    fn alias_node_carries_only_an_anchor_name() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        let a = doc.add_alias("x");
        match &doc.get_node(a).unwrap().data {
            NodeData::Alias { anchor } => assert_eq!(anchor, "x"),
            _ => panic!("expected alias"),
        }
        assert!(doc.get_node(a).unwrap().tag.is_none());
    }

    #[test]
    fn comment_slots_are_independent() {
        let mut doc = Document::new(None, Vec::new(), true, true);
        let s = doc.add_scalar(None, "v", ScalarStyle::Plain);
        let node = doc.get_node_mut(s).unwrap();
        node.set_comment(CommentSlot::Top, "above");
        node.set_comment(CommentSlot::Right, "trailing");
        assert_eq!(node.comment(CommentSlot::Top), Some("above"));
        assert_eq!(node.comment(CommentSlot::Right), Some("trailing"));
        assert_eq!(node.comment(CommentSlot::Bottom), None);
    }
}
