//! Lookup tables derived from a graph's node and edge lists.

use std::collections::HashMap;

use tracing::warn;

use crate::model::{Edge, Node};

/// Positions into a graph's node and edge vectors, keyed by node id.
///
/// Built once per [`Graph`](crate::Graph) and owned by it.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    nodes_by_id: HashMap<String, usize>,
    incoming_by_target: HashMap<String, Vec<usize>>,
    root: Option<usize>,
}

impl GraphIndex {
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut nodes_by_id = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            // First occurrence wins for duplicated ids.
            nodes_by_id.entry(node.id.clone()).or_insert(pos);
        }

        let mut incoming_by_target: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, edge) in edges.iter().enumerate() {
            incoming_by_target
                .entry(edge.target_id.clone())
                .or_default()
                .push(pos);
        }

        let mut marked = nodes.iter().enumerate().filter(|(_, n)| n.is_root);
        let root = match marked.next() {
            Some((pos, _)) => {
                let extra = marked.count();
                if extra > 0 {
                    warn!(extra, "more than one root node, using the first");
                }
                Some(pos)
            }
            None if nodes.is_empty() => None,
            None => Some(0),
        };

        Self {
            nodes_by_id,
            incoming_by_target,
            root,
        }
    }

    pub fn node(&self, id: &str) -> Option<usize> {
        self.nodes_by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes_by_id.contains_key(id)
    }

    /// Positions of edges whose target is `id`.
    pub fn incoming(&self, id: &str) -> &[usize] {
        self.incoming_by_target
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// True when both endpoints of `edge` are known nodes.
    pub fn resolves(&self, edge: &Edge) -> bool {
        self.contains(&edge.source_id) && self.contains(&edge.target_id)
    }

    pub fn len(&self) -> usize {
        self.nodes_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes_by_id.is_empty()
    }
}
