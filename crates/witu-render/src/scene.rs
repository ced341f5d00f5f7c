//! Visual scene derived from a graph and its layout.
//!
//! A scene is rebuilt wholesale on every accepted render pass; nothing in it
//! is patched in place.

use tracing::trace;

use witu_core::kind::{CYCLE_COLOR, ROOT_COLOR};
use witu_core::{ComponentKind, Graph, Layout, Node};

use crate::svg::SvgBuilder;

pub const NODE_RADIUS: f64 = 14.0;
/// Horizontal gap between a node's circle and its label.
pub const LABEL_GAP: f64 = 8.0;
pub const MIN_CANVAS_HEIGHT: f64 = 400.0;

/// Fill color for a node: root, then cycle membership, then component type.
pub fn node_color(node: &Node) -> &'static str {
    if node.is_root {
        return ROOT_COLOR;
    }
    if node.is_cycle_node {
        return CYCLE_COLOR;
    }
    ComponentKind::parse(&node.component_type).color()
}

/// Scale applied to the layout: explicit zoom times a shrink-to-fit factor.
///
/// The fit factor never exceeds 1, so small diagrams are not blown up. A
/// viewport width of 0 means the width is not known yet.
pub fn effective_scale(zoom: f64, viewport_width: f64, layout_width: f64) -> f64 {
    let fit = if viewport_width > 0.0 && layout_width > 0.0 {
        (viewport_width / layout_width).min(1.0)
    } else {
        1.0
    };
    zoom * fit
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMark {
    pub id: String,
    pub label: String,
    pub cx: f64,
    pub cy: f64,
    pub fill: &'static str,
    pub selected: bool,
}

impl NodeMark {
    pub fn label_x(&self) -> f64 {
        self.cx + NODE_RADIUS + LABEL_GAP
    }

    pub fn label_y(&self) -> f64 {
        self.cy + 4.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub source_id: String,
    pub target_id: String,
    /// Quadratic curve from the source's right rim to the target's left rim.
    pub d: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub edges: Vec<EdgePath>,
    pub nodes: Vec<NodeMark>,
}

impl Scene {
    /// Map positioned nodes and resolvable edges to drawable marks.
    ///
    /// Edges with an endpoint missing from `layout` are skipped.
    pub fn build(
        graph: &Graph,
        layout: &Layout,
        selected: Option<&str>,
        scale: f64,
        viewport_width: f64,
    ) -> Self {
        let mut edges = Vec::with_capacity(graph.edges().len());
        for edge in graph.edges() {
            let (Some(source), Some(target)) = (
                layout.position(&edge.source_id),
                layout.position(&edge.target_id),
            ) else {
                trace!(source = %edge.source_id, target = %edge.target_id, "edge not drawn");
                continue;
            };

            let control_x = (source.x + target.x) / 2.0;
            let d = format!(
                "M {} {} Q {} {} {} {}",
                source.x + NODE_RADIUS,
                source.y,
                control_x,
                source.y,
                target.x - NODE_RADIUS,
                target.y
            );
            edges.push(EdgePath {
                source_id: edge.source_id.clone(),
                target_id: edge.target_id.clone(),
                d,
                highlighted: selected.is_some_and(|id| edge.touches(id)),
            });
        }

        let nodes = graph
            .nodes()
            .iter()
            .filter_map(|node| {
                let point = layout.position(&node.id)?;
                Some(NodeMark {
                    id: node.id.clone(),
                    label: node.name.clone(),
                    cx: point.x,
                    cy: point.y,
                    fill: node_color(node),
                    selected: selected == Some(node.id.as_str()),
                })
            })
            .collect();

        Self {
            width: layout.width.max(viewport_width),
            height: layout.height.max(MIN_CANVAS_HEIGHT),
            scale,
            edges,
            nodes,
        }
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn highlighted_edges(&self) -> impl Iterator<Item = &EdgePath> {
        self.edges.iter().filter(|e| e.highlighted)
    }

    /// Standalone SVG document: edges first so nodes paint on top.
    pub fn to_svg(&self) -> String {
        let mut svg = SvgBuilder::new(self.width, self.height);
        let transform = format!("scale({})", self.scale);
        svg.open_group(&[("class", "graph-content"), ("transform", &transform)]);

        for edge in &self.edges {
            let class = if edge.highlighted { "edge selected" } else { "edge" };
            svg.path(&edge.d, class);
        }

        for node in &self.nodes {
            let class = if node.selected { "node selected" } else { "node" };
            svg.open_group(&[("class", "node-group"), ("data-node-id", &node.id)])
                .circle(node.cx, node.cy, NODE_RADIUS, node.fill, class)
                .text(node.label_x(), node.label_y(), "node-label", &node.label)
                .close_group();
        }

        svg.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use witu_core::kind::FALLBACK_COLOR;
    use witu_core::{Edge, layout};

    fn sample() -> Graph {
        Graph::new(
            vec![
                Node::new("a", "Root").with_rank(0).with_type("Flow").root(),
                Node::new("b", "Beta").with_rank(1).with_type("ApexClass"),
                Node::new("c", "Alpha").with_rank(1).with_type("CustomThing").cycle(),
                Node::new("d", "Delta").with_rank(2).with_type("Widget"),
            ],
            vec![
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("a", "zzz"),
            ],
        )
    }

    #[test]
    fn test_colors_by_precedence() {
        let graph = sample();
        assert_eq!(node_color(graph.node("a").unwrap()), ROOT_COLOR);
        assert_eq!(node_color(graph.node("b").unwrap()), "#9050E9");
        assert_eq!(node_color(graph.node("c").unwrap()), CYCLE_COLOR);
        assert_eq!(node_color(graph.node("d").unwrap()), FALLBACK_COLOR);
    }

    #[test]
    fn test_effective_scale_never_upscales() {
        assert_eq!(effective_scale(1.0, 2000.0, 500.0), 1.0);
        assert_eq!(effective_scale(1.0, 250.0, 500.0), 0.5);
        assert_eq!(effective_scale(2.0, 250.0, 500.0), 1.0);
        assert_eq!(effective_scale(1.5, 0.0, 500.0), 1.5);
    }

    #[test]
    fn test_unresolved_edge_is_not_drawn() {
        let graph = sample();
        let scene = Scene::build(&graph, &layout(graph.nodes()), None, 1.0, 800.0);
        assert_eq!(scene.edges.len(), 3);
        assert!(scene.edges.iter().all(|e| e.target_id != "zzz"));
        assert_eq!(scene.nodes.len(), 4);
    }

    #[test]
    fn test_selection_highlights_touching_edges() {
        let graph = sample();
        let scene = Scene::build(&graph, &layout(graph.nodes()), Some("b"), 1.0, 800.0);
        let highlighted: Vec<_> = scene
            .highlighted_edges()
            .map(|e| (e.source_id.as_str(), e.target_id.as_str()))
            .collect();
        assert_eq!(highlighted, vec![("a", "b"), ("b", "d")]);
        assert!(scene.nodes.iter().find(|n| n.id == "b").unwrap().selected);
    }

    #[test]
    fn test_edge_path_geometry() {
        let graph = Graph::new(
            vec![
                Node::new("a", "A").with_rank(0),
                Node::new("b", "B").with_rank(1),
            ],
            vec![Edge::new("a", "b")],
        );
        let scene = Scene::build(&graph, &layout(graph.nodes()), None, 1.0, 0.0);
        assert_eq!(scene.edges[0].d, "M 84 40 Q 160 40 236 40");
        assert_eq!(scene.view_box(), "0 0 540 400");
    }

    #[test]
    fn test_svg_contains_marks() {
        let graph = sample();
        let scene = Scene::build(&graph, &layout(graph.nodes()), Some("a"), 0.5, 800.0);
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 800 400\""));
        assert!(svg.contains("transform=\"scale(0.5)\""));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("class=\"edge selected\"").count(), 2);
        assert!(svg.contains(">Alpha</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
