//! linknote-codec
//!
//! Identity- and cycle-preserving encode/decode engine for link notation.
//! `encode` walks a `Value` graph once to find nodes needing a persistent
//! identifier, then a second time to produce text; `decode` parses text back
//! into a link tree and rebuilds the graph, resolving forward references and
//! cycles via a resolution table kept ahead of recursion.

mod analyzer;
mod decoder;
mod encoder;
mod options;

pub use linknote_core::{CodecError, Graph, Value};
pub use options::DecodeOptions;

use decoder::Decoder;
use encoder::Encoder;
use linknote_core::linktree;

/// Encode `value` (and everything reachable from it through `graph`) to its
/// link-notation text form.
///
/// Total for any finite value graph built through the public `Graph`/`Value`
/// API; the `Result` is kept for forward compatibility with a future
/// arbitrary-precision integer backend (see `CodecError::IntegerOverflow`).
pub fn encode(value: &Value, graph: &Graph) -> Result<String, CodecError> {
    let tree = Encoder::encode_root(graph, value)?;
    Ok(linktree::print(&tree))
}

/// Decode `text` into a fresh `Graph` plus the value it represents, using
/// tolerant (non-strict) dangling-reference recovery.
///
/// Returns `(Graph::new(), Value::Null)` for empty input.
pub fn decode(text: &str) -> Result<(Graph, Value), CodecError> {
    decode_with(text, DecodeOptions::default())
}

/// Like [`decode`], but with explicit control over dangling-reference
/// handling via [`DecodeOptions`].
pub fn decode_with(text: &str, options: DecodeOptions) -> Result<(Graph, Value), CodecError> {
    let document = linktree::parse_document(text)?;
    Decoder::decode_document(&document, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linknote_core::NodeId;

    fn seq_id(v: &Value) -> NodeId {
        match v {
            Value::Seq(id) => *id,
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn scalar_round_trip() {
        let g = Graph::new();
        for v in [
            Value::Null,
            Value::Bool(true),
            Value::Bool(false),
            Value::Int(-7),
            Value::Float(3.5),
            Value::Str("hi".to_string()),
        ] {
            let text = encode(&v, &g).unwrap();
            let (_, decoded) = decode(&text).unwrap();
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn self_referential_list_round_trips_identity() {
        let mut g = Graph::new();
        let id = g.alloc_empty_seq();
        g.push_seq_child(id, Value::Int(1));
        g.push_seq_child(id, Value::Seq(id));
        let root = Value::Seq(id);

        let text = encode(&root, &g).unwrap();
        let (decoded_graph, decoded_root) = decode(&text).unwrap();
        let decoded_id = seq_id(&decoded_root);
        let children = decoded_graph.seq_children(decoded_id);
        assert_eq!(children[0], Value::Int(1));
        assert_eq!(children[1], Value::Seq(decoded_id));
    }

    #[test]
    fn shared_no_cycle_preserves_identity_across_all_positions() {
        let mut g = Graph::new();
        let shared = g.new_map(vec![(
            Value::Str("k".to_string()),
            Value::Str("v".to_string()),
        )]);
        let root = g.new_seq(vec![shared.clone(), shared.clone(), shared]);

        let text = encode(&root, &g).unwrap();
        let (decoded_graph, decoded_root) = decode(&text).unwrap();
        let decoded_id = seq_id(&decoded_root);
        let children = decoded_graph.seq_children(decoded_id);
        assert_eq!(children[0], children[1]);
        assert_eq!(children[1], children[2]);
    }

    #[test]
    fn empty_input_decodes_to_null() {
        let (g, v) = decode("").unwrap();
        assert_eq!(v, Value::Null);
        assert!(g.is_empty());
    }
}
