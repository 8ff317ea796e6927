//! Reference analyzer (C2): which aggregates need a persistent identifier
//!
//! A node needs an identifier exactly when it is reachable from the root
//! along two or more distinct paths, or when it participates in a cycle.
//! Single-visit scratch state (`seen`, `path`) lives on the `Analyzer`
//! struct, constructed fresh for each `encode` call - never shared across
//! calls.

use std::collections::HashSet;

use linknote_core::{Graph, NodeId, Value};

/// Walks a value graph once and reports which aggregate nodes must be
/// assigned an identifier by the encoder.
pub struct Analyzer<'g> {
    graph: &'g Graph,
    seen: HashSet<NodeId>,
    path: Vec<NodeId>,
    needs_id: HashSet<NodeId>,
}

impl<'g> Analyzer<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            seen: HashSet::new(),
            path: Vec::new(),
            needs_id: HashSet::new(),
        }
    }

    /// Run the analysis over `root` and return the set of node identities
    /// that require an encoder-minted id.
    pub fn analyze(mut self, root: &Value) -> HashSet<NodeId> {
        self.visit(root);
        self.needs_id
    }

    fn visit(&mut self, value: &Value) {
        let Some(id) = value.node_id() else {
            return;
        };

        if self.seen.contains(&id) {
            self.needs_id.insert(id);
            if let Some(pos) = self.path.iter().position(|p| *p == id) {
                tracing::trace!(?id, "cycle closure over path suffix");
                for closed in &self.path[pos..] {
                    self.needs_id.insert(*closed);
                }
            }
            return;
        }

        self.seen.insert(id);
        self.path.push(id);

        match value {
            Value::Seq(seq_id) => {
                for child in self.graph.seq_children(*seq_id) {
                    self.visit(child);
                }
            }
            Value::Map(map_id) => {
                for (key, val) in self.graph.map_entries(*map_id) {
                    self.visit(key);
                    self.visit(val);
                }
            }
            _ => unreachable!("node_id() only returns Some for aggregates"),
        }

        self.path.pop();
    }
}
