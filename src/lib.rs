//! A lazy YAML 1.2 scalar-atom decoder paired with a block/flow/JSON
//! emitter.
//!
//! [`atom`] turns a scalar's raw scanned span into a pull-based chunk
//! iterator ([`atom::AtomIter`]) instead of eagerly materializing an owned
//! `String`; [`emitter`] is a stateful writer that formats either a
//! [`node::Document`] tree or a caller-driven [`event::Event`] stream as
//! YAML or JSON text. Scanning and parsing — turning raw input bytes into
//! atoms, events, and nodes in the first place — are out of scope; this
//! crate starts one layer downstream of that.
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::fn_params_excessive_bools,
    clippy::manual_range_contains,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::struct_excessive_bools,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::unnecessary_wraps,
    clippy::match_wildcard_for_single_variants
)]
#![deny(unsafe_code)]

pub mod atom;
pub(crate) mod chars;
pub mod directives;
pub mod emitter;
pub mod error;
pub mod event;
pub mod mark;
pub mod node;
pub mod style;
pub mod utf8;

pub use crate::atom::{Atom, AtomIter, Chunk};
pub use crate::directives::{TagDirective, VersionDirective};
pub use crate::emitter::{Emitter, EmitterConfig, EmitterMode, Policy, Width};
pub use crate::error::{AtomError, EmitterError, WriterError};
pub use crate::event::{Event, EventData};
pub use crate::mark::{InputId, Mark};
pub use crate::node::{CommentSlot, Document, Node, NodeData, NodeId, NodePair};
pub use crate::style::{AtomStyle, Break, Chomping, MappingStyle, ScalarStyle, SequenceStyle};
pub use crate::utf8::Decoded;

/// The tag `!!str`, the implicit tag every untagged scalar resolves to.
pub const STR_TAG: &str = "tag:yaml.org,2002:str";
/// The tag `!!seq`, the implicit tag every untagged sequence resolves to.
pub const SEQ_TAG: &str = "tag:yaml.org,2002:seq";
/// The tag `!!map`, the implicit tag every untagged mapping resolves to.
pub const MAP_TAG: &str = "tag:yaml.org,2002:map";

/// The default scalar tag is `!!str`.
pub const DEFAULT_SCALAR_TAG: &str = STR_TAG;
/// The default sequence tag is `!!seq`.
pub const DEFAULT_SEQUENCE_TAG: &str = SEQ_TAG;
/// The default mapping tag is `!!map`.
pub const DEFAULT_MAPPING_TAG: &str = MAP_TAG;
