//! Encoder (C3): Value graph -> LinkTree
//!
//! Holds `needs_id` (from the analyzer), a memo of already-assigned
//! identifiers, and a monotonically increasing counter for minting new ones.
//! All three are local to one `encode()` call.

use std::collections::{HashMap, HashSet};

use linknote_core::{CodecError, Graph, LinkTree, NodeId, Value};

use crate::analyzer::Analyzer;

pub struct Encoder<'g> {
    graph: &'g Graph,
    needs_id: HashSet<NodeId>,
    memo: HashMap<NodeId, String>,
    counter: u64,
}

impl<'g> Encoder<'g> {
    pub fn new(graph: &'g Graph, needs_id: HashSet<NodeId>) -> Self {
        Self {
            graph,
            needs_id,
            memo: HashMap::new(),
            counter: 0,
        }
    }

    /// Run the analyzer and encode `root` in one step.
    pub fn encode_root(graph: &'g Graph, root: &Value) -> Result<LinkTree, CodecError> {
        let needs_id = Analyzer::new(graph).analyze(root);
        Encoder::new(graph, needs_id).encode(root)
    }

    pub fn encode(&mut self, value: &Value) -> Result<LinkTree, CodecError> {
        match value {
            Value::Null => Ok(tag_node("None", Vec::new())),
            Value::Bool(b) => Ok(tag_node(
                "bool",
                vec![LinkTree::LinkRef(linknote_core::scalars::encode_bool(*b).to_string())],
            )),
            Value::Int(n) => Ok(tag_node(
                "int",
                vec![LinkTree::LinkRef(linknote_core::scalars::encode_int(*n))],
            )),
            Value::Float(x) => Ok(tag_node(
                "float",
                vec![LinkTree::LinkRef(linknote_core::scalars::encode_float(*x))],
            )),
            Value::Str(s) => Ok(tag_node(
                "str",
                vec![LinkTree::LinkRef(linknote_core::scalars::encode_str(s))],
            )),
            Value::Seq(_) | Value::Map(_) => self.encode_aggregate(value),
        }
    }

    fn encode_aggregate(&mut self, value: &Value) -> Result<LinkTree, CodecError> {
        let id = value
            .node_id()
            .ok_or_else(|| CodecError::UnsupportedType(format!("{value:?}")))?;

        if let Some(name) = self.memo.get(&id) {
            tracing::trace!(?id, name, "emitting reference to already-visited node");
            return Ok(LinkTree::LinkRef(name.clone()));
        }

        let assigned = if self.needs_id.contains(&id) {
            let name = format!("obj_{}", self.counter);
            self.counter += 1;
            self.memo.insert(id, name.clone());
            Some(name)
        } else {
            None
        };

        let mut children = Vec::new();
        match value {
            Value::Seq(seq_id) => {
                children.push(LinkTree::LinkRef("list".to_string()));
                for child in self.graph.seq_children(*seq_id) {
                    children.push(self.encode(child)?);
                }
            }
            Value::Map(map_id) => {
                children.push(LinkTree::LinkRef("dict".to_string()));
                for (key, val) in self.graph.map_entries(*map_id) {
                    let pair = vec![self.encode(key)?, self.encode(val)?];
                    children.push(LinkTree::LinkNode {
                        id: None,
                        children: pair,
                    });
                }
            }
            _ => unreachable!("node_id() only returns Some for aggregates"),
        }

        Ok(LinkTree::LinkNode {
            id: assigned,
            children,
        })
    }
}

fn tag_node(tag: &str, mut rest: Vec<LinkTree>) -> LinkTree {
    let mut children = vec![LinkTree::LinkRef(tag.to_string())];
    children.append(&mut rest);
    LinkTree::LinkNode {
        id: None,
        children,
    }
}
