//! Layered left-to-right layout.
//!
//! Columns are ranks, rows are nodes sorted by name, and every column is
//! centred against the tallest one. The output depends only on the node list,
//! so equal input always yields bit-identical positions.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use crate::model::{Graph, Node};

/// Distance between rank columns.
pub const H_SPACING: f64 = 180.0;
/// Distance between rows inside a column.
pub const ROW_SPACING: f64 = 60.0;
pub const LEFT_MARGIN: f64 = 70.0;
pub const TOP_MARGIN: f64 = 40.0;
/// Room to the right of the last column for node labels.
pub const LABEL_ALLOWANCE: f64 = 220.0;
pub const BOTTOM_ALLOWANCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub positions: HashMap<String, Point>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Place every node by rank column and alphabetical row.
pub fn layout(nodes: &[Node]) -> Layout {
    let mut layers: BTreeMap<u32, Vec<&Node>> = BTreeMap::new();
    for node in nodes {
        layers.entry(node.layer()).or_default().push(node);
    }

    let max_layer_size = layers.values().map(Vec::len).max().unwrap_or(0).max(1);
    let mut positions = HashMap::with_capacity(nodes.len());

    for (&rank, layer) in layers.iter_mut() {
        // Stable: equal names keep input order.
        layer.sort_by(|a, b| a.name.cmp(&b.name));

        let x = LEFT_MARGIN + f64::from(rank) * H_SPACING;
        let top = TOP_MARGIN + (max_layer_size - layer.len()) as f64 * ROW_SPACING / 2.0;
        for (row, node) in layer.iter().enumerate() {
            positions.insert(node.id.clone(), Point::new(x, top + row as f64 * ROW_SPACING));
        }
    }

    let max_rank = layers.keys().next_back().copied().unwrap_or(0);
    let width = LEFT_MARGIN * 2.0 + f64::from(max_rank) * H_SPACING + LABEL_ALLOWANCE;
    let height =
        TOP_MARGIN * 2.0 + (max_layer_size.max(2) - 1) as f64 * ROW_SPACING + BOTTOM_ALLOWANCE;

    Layout {
        positions,
        width,
        height,
    }
}

/// Lay out several independent graphs in parallel.
pub fn layout_many(graphs: &[Graph]) -> Vec<Layout> {
    graphs.par_iter().map(|g| layout(g.nodes())).collect()
}
