//! Three-column panel for a field data journey.
//!
//! Upstream writers sit in the left column, the searched field in the centre
//! and downstream readers on the right, indented by how far down the chain
//! they are.

use witu_core::{Direction, Graph, JourneyNodeKind, Node, classify_ranks};

use crate::scene::NODE_RADIUS;
use crate::svg::SvgBuilder;

pub const ROW_HEIGHT: f64 = 86.0;
pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CENTER_X: f64 = 500.0;
pub const LEFT_X: f64 = 260.0;
pub const RIGHT_X: f64 = 740.0;
pub const INDENT: f64 = 48.0;
pub const MIN_CANVAS_HEIGHT: f64 = 260.0;

const FIRST_ROW_Y: f64 = 36.0;
/// Half-width of the centre card, where connectors attach.
const CENTER_HALF_WIDTH: f64 = 88.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamEntry<'g> {
    pub node: &'g Node,
    /// Hops from the root field, at least 1.
    pub hop: u32,
    pub chain: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub key: String,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JourneyPanel<'g> {
    pub root: Option<&'g Node>,
    pub upstream: Vec<&'g Node>,
    pub downstream: Vec<DownstreamEntry<'g>>,
}

impl<'g> JourneyPanel<'g> {
    pub fn build(graph: &'g Graph) -> Self {
        let root = graph
            .nodes()
            .iter()
            .find(|n| n.direction == Some(Direction::Root));

        let mut upstream: Vec<&Node> = graph
            .nodes()
            .iter()
            .filter(|n| n.direction == Some(Direction::Upstream))
            .collect();
        upstream.sort_by(|a, b| a.name.cmp(&b.name));

        let hops = root
            .map(|r| classify_ranks(graph.nodes(), graph.edges(), &r.id))
            .unwrap_or_default();

        let mut downstream: Vec<DownstreamEntry> = graph
            .nodes()
            .iter()
            .filter(|n| n.direction == Some(Direction::Downstream))
            .map(|node| {
                let hop = hops.get(&node.id).copied().filter(|&h| h > 0).unwrap_or(1);
                DownstreamEntry {
                    node,
                    hop,
                    chain: hop.saturating_sub(1),
                }
            })
            .collect();
        downstream.sort_by(|a, b| a.hop.cmp(&b.hop).then_with(|| a.node.name.cmp(&b.node.name)));

        Self {
            root,
            upstream,
            downstream,
        }
    }

    pub fn rows(&self) -> usize {
        self.upstream.len().max(self.downstream.len()).max(1)
    }

    pub fn canvas_height(&self) -> f64 {
        (self.rows() as f64 * ROW_HEIGHT + 70.0).max(MIN_CANVAS_HEIGHT)
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", CANVAS_WIDTH, self.canvas_height())
    }

    /// Cubic curves from each upstream row into the centre card and from the
    /// centre card out to each downstream row.
    pub fn connector_paths(&self) -> Vec<Connector> {
        let center_y = self.canvas_height() / 2.0;
        let mut paths = Vec::with_capacity(self.upstream.len() + self.downstream.len());

        for (i, node) in self.upstream.iter().enumerate() {
            let y = FIRST_ROW_Y + i as f64 * ROW_HEIGHT;
            paths.push(Connector {
                key: format!("u-{}", node.id),
                d: format!(
                    "M {LEFT_X} {y} C {} {y} {} {center_y} {} {center_y}",
                    LEFT_X + 70.0,
                    CENTER_X - 150.0,
                    CENTER_X - CENTER_HALF_WIDTH
                ),
            });
        }

        for (i, entry) in self.downstream.iter().enumerate() {
            let y = FIRST_ROW_Y + i as f64 * ROW_HEIGHT;
            let x_end = RIGHT_X + f64::from(entry.chain) * INDENT;
            paths.push(Connector {
                key: format!("d-{}", entry.node.id),
                d: format!(
                    "M {} {center_y} C {} {center_y} {} {y} {x_end} {y}",
                    CENTER_X + CENTER_HALF_WIDTH,
                    CENTER_X + 180.0,
                    x_end - 100.0
                ),
            });
        }

        paths
    }

    /// Standalone SVG: connectors underneath, then one marker per node.
    pub fn to_svg(&self) -> String {
        let height = self.canvas_height();
        let center_y = height / 2.0;
        let mut svg = SvgBuilder::new(CANVAS_WIDTH, height);

        svg.open_group(&[("class", "connectors")]);
        for connector in self.connector_paths() {
            svg.path(&connector.d, "connector");
        }
        svg.close_group();

        if let Some(root) = self.root {
            journey_mark(&mut svg, root, CENTER_X, center_y, "journey-root");
        }
        for (i, node) in self.upstream.iter().enumerate() {
            let y = FIRST_ROW_Y + i as f64 * ROW_HEIGHT;
            journey_mark(&mut svg, node, LEFT_X, y, "journey-upstream");
        }
        for (i, entry) in self.downstream.iter().enumerate() {
            let y = FIRST_ROW_Y + i as f64 * ROW_HEIGHT;
            let x = RIGHT_X + f64::from(entry.chain) * INDENT;
            journey_mark(&mut svg, entry.node, x, y, "journey-downstream");
        }

        svg.build()
    }
}

fn journey_mark(svg: &mut SvgBuilder, node: &Node, x: f64, y: f64, class: &str) {
    let fill = JourneyNodeKind::parse(&node.component_type).color();
    svg.open_group(&[("class", class), ("data-node-id", &node.id)])
        .circle(x, y, NODE_RADIUS, fill, "node")
        .text(x + NODE_RADIUS + 8.0, y + 4.0, "node-label", &node.name)
        .close_group();
}
