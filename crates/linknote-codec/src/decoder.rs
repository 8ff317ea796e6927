//! Decoder (C4): LinkTree -> Value graph
//!
//! Two phases: an `all_links` directory indexes every top-level named link
//! so forward references resolve, and a `table` caches what has already been
//! decoded. The ordering invariant that makes cycles work: an aggregate's
//! entry goes into `table` before any of its children are decoded.

use std::collections::HashMap;

use linknote_core::{CodecError, Graph, LinkTree, Value};

use crate::options::DecodeOptions;

pub struct Decoder<'a> {
    graph: Graph,
    table: HashMap<String, Value>,
    all_links: HashMap<String, &'a LinkTree>,
    options: DecodeOptions,
}

/// Detects the lone-wrapper shape some producers (including this crate's own
/// printer, for a single identified top-level node) emit: a no-id node with
/// exactly one child, that child itself carrying an `obj_*` id.
fn unwrap_candidate(link: &LinkTree) -> Option<&LinkTree> {
    let LinkTree::LinkNode { id: None, children } = link else {
        return None;
    };
    if children.len() != 1 {
        return None;
    }
    let LinkTree::LinkNode {
        id: Some(inner_id), ..
    } = &children[0]
    else {
        return None;
    };
    if inner_id.starts_with("obj_") {
        Some(&children[0])
    } else {
        None
    }
}

impl<'a> Decoder<'a> {
    /// Decode a whole document (the top-level sibling links produced by
    /// `linknote_core::linktree::parse_document`) into a fresh graph plus
    /// the decoded root value.
    pub fn decode_document(
        links: &'a [LinkTree],
        options: DecodeOptions,
    ) -> Result<(Graph, Value), CodecError> {
        if links.is_empty() {
            return Ok((Graph::new(), Value::Null));
        }

        let effective: Vec<&'a LinkTree> = if links.len() == 1 {
            match unwrap_candidate(&links[0]) {
                Some(inner) => vec![inner],
                None => vec![&links[0]],
            }
        } else {
            links.iter().collect()
        };

        let mut all_links: HashMap<String, &'a LinkTree> = HashMap::new();
        for link in &effective {
            if let LinkTree::LinkNode { id: Some(id), .. } = link {
                all_links.insert(id.clone(), link);
            }
        }

        let mut decoder = Decoder {
            graph: Graph::new(),
            table: HashMap::new(),
            all_links,
            options,
        };
        let root = decoder.decode_node(effective[0])?;
        Ok((decoder.graph, root))
    }

    fn decode_node(&mut self, node: &'a LinkTree) -> Result<Value, CodecError> {
        match node {
            LinkTree::LinkRef(id) => self.resolve_ref(id),
            LinkTree::LinkNode { id, children } => {
                if children.is_empty() {
                    return match id {
                        Some(id) => self.resolve_ref(id),
                        None => Ok(Value::Null),
                    };
                }
                let tag = ident(&children[0])?;
                match tag {
                    "None" => Ok(Value::Null),
                    "bool" => Ok(Value::Bool(linknote_core::scalars::decode_bool(
                        scalar_payload(children)?,
                    )?)),
                    "int" => Ok(Value::Int(linknote_core::scalars::decode_int(
                        scalar_payload(children)?,
                    )?)),
                    "float" => Ok(Value::Float(linknote_core::scalars::decode_float(
                        scalar_payload(children)?,
                    )?)),
                    "str" => Ok(Value::Str(linknote_core::scalars::decode_str(
                        scalar_payload(children)?,
                    )?)),
                    "list" => self.decode_list(id.clone(), &children[1..]),
                    "dict" => self.decode_dict(id.clone(), &children[1..]),
                    other => Err(CodecError::UnknownTypeTag(other.to_string())),
                }
            }
        }
    }

    fn resolve_ref(&mut self, id: &str) -> Result<Value, CodecError> {
        if let Some(v) = self.table.get(id) {
            return Ok(v.clone());
        }
        if id.starts_with("obj_") {
            if let Some(link) = self.all_links.get(id).copied() {
                tracing::trace!(id, "resolving forward reference");
                return self.decode_node(link);
            }
            if self.options.strict {
                return Err(CodecError::DanglingReference(id.to_string()));
            }
            tracing::debug!(id, "dangling reference, substituting empty sequence");
            let placeholder = self.graph.alloc_empty_seq();
            let value = Value::Seq(placeholder);
            self.table.insert(id.to_string(), value.clone());
            return Ok(value);
        }
        Ok(Value::Str(id.to_string()))
    }

    fn decode_list(
        &mut self,
        id: Option<String>,
        mut rest: &'a [LinkTree],
    ) -> Result<Value, CodecError> {
        let mut id = id;
        if id.is_none() {
            if let Some(LinkTree::LinkRef(maybe_id)) = rest.first() {
                if maybe_id.starts_with("obj_") {
                    id = Some(maybe_id.clone());
                    rest = &rest[1..];
                }
            }
        }

        let node_id = self.graph.alloc_empty_seq();
        if let Some(id) = &id {
            self.table.insert(id.clone(), Value::Seq(node_id));
        }
        for child in rest {
            let v = self.decode_node(child)?;
            self.graph.push_seq_child(node_id, v);
        }
        Ok(Value::Seq(node_id))
    }

    fn decode_dict(
        &mut self,
        id: Option<String>,
        mut rest: &'a [LinkTree],
    ) -> Result<Value, CodecError> {
        let mut id = id;
        if id.is_none() {
            if let Some(LinkTree::LinkRef(maybe_id)) = rest.first() {
                if maybe_id.starts_with("obj_") {
                    id = Some(maybe_id.clone());
                    rest = &rest[1..];
                }
            }
        }

        let node_id = self.graph.alloc_empty_map();
        if let Some(id) = &id {
            self.table.insert(id.clone(), Value::Map(node_id));
        }
        for pair in rest {
            let LinkTree::LinkNode {
                children: pair_children,
                ..
            } = pair
            else {
                return Err(CodecError::MalformedPair);
            };
            if pair_children.len() != 2 {
                return Err(CodecError::MalformedPair);
            }
            let key = self.decode_node(&pair_children[0])?;
            let val = self.decode_node(&pair_children[1])?;
            self.graph.push_map_entry(node_id, key, val);
        }
        Ok(Value::Map(node_id))
    }
}

fn ident(tree: &LinkTree) -> Result<&str, CodecError> {
    match tree {
        LinkTree::LinkRef(s) => Ok(s.as_str()),
        LinkTree::LinkNode { id: Some(id), children } if children.is_empty() => Ok(id.as_str()),
        other => Err(CodecError::UnknownTypeTag(format!("{other:?}"))),
    }
}

/// The payload token of a scalar `(tag payload)` node, erroring rather than
/// panicking if a producer omits the second child.
fn scalar_payload(children: &[LinkTree]) -> Result<&str, CodecError> {
    children
        .get(1)
        .ok_or_else(|| CodecError::MalformedScalar("missing payload".to_string()))
        .and_then(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linknote_core::linktree::parse_document;

    fn decode(text: &str) -> (Graph, Value) {
        let doc = parse_document(text).unwrap();
        Decoder::decode_document(&doc, DecodeOptions::default()).unwrap()
    }

    #[test]
    fn decodes_null() {
        let (_, v) = decode("(None)");
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn decodes_scalars() {
        let (_, v) = decode("(int 42)");
        assert_eq!(v, Value::Int(42));
        let (_, v) = decode("(bool True)");
        assert_eq!(v, Value::Bool(true));
        let (_, v) = decode("(str aGVsbG8=)");
        assert_eq!(v, Value::Str("hello".to_string()));
    }

    #[test]
    fn decodes_non_shared_list() {
        let (g, v) = decode("(list (int 1) (int 2) (int 3))");
        let Value::Seq(id) = v else { panic!("expected Seq") };
        assert_eq!(
            g.seq_children(id),
            &[Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn decodes_self_referential_list() {
        let (g, v) = decode("(obj_0: list (int 1) obj_0)");
        let Value::Seq(id) = v else { panic!("expected Seq") };
        let children = g.seq_children(id);
        assert_eq!(children[0], Value::Int(1));
        assert_eq!(children[1], Value::Seq(id));
    }

    #[test]
    fn decodes_mutual_cycle() {
        let (g, v) = decode("(obj_0: list (int 1) (int 2) (obj_1: list (int 3) (int 4) obj_0))");
        let Value::Seq(a) = v else { panic!("expected Seq") };
        let a_children = g.seq_children(a);
        let Value::Seq(b) = a_children[2].clone() else {
            panic!("expected nested Seq")
        };
        let b_children = g.seq_children(b);
        assert_eq!(b_children[2], Value::Seq(a));
    }

    #[test]
    fn tolerant_mode_substitutes_empty_seq_for_dangling_ref() {
        let (g, v) = decode("(list obj_99)");
        let Value::Seq(id) = v else { panic!("expected Seq") };
        let children = g.seq_children(id);
        let Value::Seq(dangling) = children[0].clone() else {
            panic!("expected placeholder Seq")
        };
        assert!(g.seq_children(dangling).is_empty());
    }

    #[test]
    fn strict_mode_rejects_dangling_ref() {
        let doc = parse_document("(list obj_99)").unwrap();
        let err = Decoder::decode_document(&doc, DecodeOptions::strict()).unwrap_err();
        assert!(matches!(err, CodecError::DanglingReference(_)));
    }

    #[test]
    fn unwraps_single_identified_top_level_wrapper() {
        let (g, v) = decode("((obj_0: list (int 1) obj_0))");
        let Value::Seq(id) = v else { panic!("expected Seq") };
        assert_eq!(g.seq_children(id)[0], Value::Int(1));
    }

    #[test]
    fn resolves_forward_reference_across_sibling_top_level_links() {
        let doc = parse_document("(obj_0: list obj_1) (obj_1: list (int 5))").unwrap();
        let (g, v) = Decoder::decode_document(&doc, DecodeOptions::default()).unwrap();
        let Value::Seq(a) = v else { panic!("expected Seq") };
        let a_children = g.seq_children(a);
        assert_eq!(a_children.len(), 1);
        let Value::Seq(b) = a_children[0].clone() else {
            panic!("expected Seq")
        };
        assert_eq!(g.seq_children(b), &[Value::Int(5)]);
    }

    #[test]
    fn legacy_format_without_id_prefix_adopts_id_from_first_child() {
        let (g, v) = decode("(list obj_0 (int 1) obj_0)");
        let Value::Seq(id) = v else { panic!("expected Seq") };
        let children = g.seq_children(id);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Value::Int(1));
        assert_eq!(children[1], Value::Seq(id));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let doc = parse_document("(weird 1)").unwrap();
        let err = Decoder::decode_document(&doc, DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownTypeTag(_)));
    }

    #[test]
    fn malformed_pair_is_an_error() {
        let doc = parse_document("(dict (lonechild))").unwrap();
        let err = Decoder::decode_document(&doc, DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPair));
    }
}
