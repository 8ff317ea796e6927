//! linknote-core
//!
//! The value model, arena, link-tree syntax tree, and scalar codecs shared by
//! the encode/decode engine in `linknote-codec`. This crate has no notion of
//! object identity analysis or traversal order - it only defines what a
//! `Value` is and how a scalar payload round-trips through text.

pub mod error;
pub mod graph;
pub mod linktree;
pub mod scalars;
pub mod value;

pub use error::CodecError;
pub use graph::{Graph, NodeId};
pub use linktree::{LinkTree, ParseError};
pub use value::Value;
