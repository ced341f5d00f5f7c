//! Node/edge graph model as received from the dependency-discovery service.
//!
//! A [`Graph`] is immutable once built. Every constructor builds the attached
//! [`GraphIndex`], so lookups by id never go stale: a new response produces a
//! new `Graph` value with a new index.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::index::GraphIndex;
use crate::rank::{UNREACHABLE_RANK, classify_ranks, cycle_members};
use crate::{Error, Result};

/// Position of a node relative to the searched field in a data journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Root,
    Upstream,
    Downstream,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Root => "root",
            Direction::Upstream => "upstream",
            Direction::Downstream => "downstream",
        }
    }

    /// Title-case label used in detail panels.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Root => "Root",
            Direction::Upstream => "Upstream",
            Direction::Downstream => "Downstream",
        }
    }
}

/// A metadata component in the dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Tool-facing type name, e.g. "ApexClass". Journey payloads call it `nodeType`.
    #[serde(default, alias = "nodeType")]
    pub component_type: String,
    /// Hop distance from the root. `None` until classified.
    #[serde(default, alias = "depth", skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub is_cycle_node: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_url: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = component_type.into();
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_access(mut self, access_type: impl Into<String>) -> Self {
        self.access_type = Some(access_type.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_setup_url(mut self, url: impl Into<String>) -> Self {
        self.setup_url = Some(url.into());
        self
    }

    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn cycle(mut self) -> Self {
        self.is_cycle_node = true;
        self
    }

    /// Rank used for placement; unclassified nodes sit in the root column.
    pub fn layer(&self) -> u32 {
        self.rank.unwrap_or(0)
    }
}

/// How the source of an edge relates to its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relationship {
    WritesTo,
    ReadBy,
    Triggers,
    FeedsInto,
    /// Any label the service sends that is not one of the above.
    Other(String),
}

impl Relationship {
    pub fn as_str(&self) -> &str {
        match self {
            Relationship::WritesTo => "writes_to",
            Relationship::ReadBy => "read_by",
            Relationship::Triggers => "triggers",
            Relationship::FeedsInto => "feeds_into",
            Relationship::Other(label) => label,
        }
    }

    /// Human phrasing shown in selection details.
    pub fn label(&self) -> &str {
        match self {
            Relationship::WritesTo => "writes to",
            Relationship::ReadBy => "reads from",
            Relationship::Triggers => "triggers",
            Relationship::FeedsInto => "feeds into",
            Relationship::Other(label) => label,
        }
    }
}

impl Default for Relationship {
    fn default() -> Self {
        Relationship::Other(String::new())
    }
}

impl From<String> for Relationship {
    fn from(value: String) -> Self {
        match value.as_str() {
            "writes_to" => Relationship::WritesTo,
            "read_by" => Relationship::ReadBy,
            "triggers" => Relationship::Triggers,
            "feeds_into" => Relationship::FeedsInto,
            _ => Relationship::Other(value),
        }
    }
}

impl From<&str> for Relationship {
    fn from(value: &str) -> Self {
        Relationship::from(value.to_string())
    }
}

impl From<Relationship> for String {
    fn from(value: Relationship) -> Self {
        match value {
            Relationship::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed "uses" relation between two nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub relationship: Relationship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Edge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            ..Self::default()
        }
    }

    pub fn with_relationship(mut self, relationship: impl Into<Relationship>) -> Self {
        self.relationship = relationship.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// True when either endpoint is `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.source_id == id || self.target_id == id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    #[serde(alias = "maxDepthReached")]
    pub max_rank_reached: u32,
}

impl GraphStats {
    fn measure(nodes: &[Node], edges: &[Edge]) -> Self {
        Self {
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            max_rank_reached: nodes.iter().filter_map(|n| n.rank).max().unwrap_or(0),
        }
    }
}

/// Wire shape of a graph response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphPayload {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stats: Option<GraphStats>,
    #[serde(default)]
    warnings: Vec<String>,
}

impl From<GraphPayload> for Graph {
    fn from(payload: GraphPayload) -> Self {
        let mut graph = Graph::new(payload.nodes, payload.edges);
        if let Some(stats) = payload.stats {
            graph.stats = stats;
        }
        graph.warnings = payload.warnings;
        graph
    }
}

impl From<Graph> for GraphPayload {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            stats: Some(graph.stats),
            warnings: graph.warnings,
        }
    }
}

/// One dependency graph response with its derived lookup index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphPayload", into = "GraphPayload")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    stats: GraphStats,
    warnings: Vec<String>,
    index: GraphIndex,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let stats = GraphStats::measure(&nodes, &edges);
        let index = GraphIndex::build(&nodes, &edges);
        Self {
            nodes,
            edges,
            stats,
            warnings: Vec::new(),
            index,
        }
    }

    /// Decode a JSON response, failing fast when it is not graph-shaped.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Graph>(json).map_err(|err| {
            Error::deserialization_failed(format!("not a graph payload: {err}"))
                .with_operation("model::from_json")
                .set_source(err)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::new(witu_error::ErrorKind::SerializationFailed, err.to_string())
                .with_operation("model::to_json")
                .set_source(err)
        })
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.node(id).map(|pos| &self.nodes[pos])
    }

    /// Edges that enter `id`, in input order.
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.index.incoming(id).iter().map(|&pos| &self.edges[pos])
    }

    /// The node marked as root, or the first node when none is marked.
    pub fn root(&self) -> Option<&Node> {
        self.index.root().map(|pos| &self.nodes[pos])
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root().map(|n| n.id.as_str())
    }

    /// Edges whose endpoints both resolve to known nodes.
    pub fn resolved_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| self.index.resolves(e))
    }

    pub fn cycle_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_cycle_node).count()
    }

    /// Fill in ranks for nodes that arrived without one.
    ///
    /// Nodes the classifier cannot place (unreachable, or no usable root) get
    /// rank 1. Ranks already present are left untouched.
    pub fn with_classified_ranks(mut self) -> Self {
        if self.nodes.iter().all(|n| n.rank.is_some()) {
            return self;
        }

        let ranks = match self.root_id() {
            Some(root) => classify_ranks(&self.nodes, &self.edges, root),
            None => Default::default(),
        };

        let mut filled = 0usize;
        for node in self.nodes.iter_mut().filter(|n| n.rank.is_none()) {
            node.rank = Some(ranks.get(&node.id).copied().unwrap_or(UNREACHABLE_RANK));
            filled += 1;
        }
        debug!(filled, classified = ranks.len(), "ranks classified");

        let max_rank = self.nodes.iter().filter_map(|n| n.rank).max().unwrap_or(0);
        self.stats.max_rank_reached = self.stats.max_rank_reached.max(max_rank);
        self
    }

    /// Flag nodes on a directed cycle reachable from the root.
    pub fn with_detected_cycles(mut self) -> Self {
        let Some(root) = self.root_id().map(str::to_string) else {
            return self;
        };
        let members = cycle_members(&self.nodes, &self.edges, &root);
        for node in self.nodes.iter_mut() {
            if members.contains(&node.id) {
                trace!(id = %node.id, "cycle member");
                node.is_cycle_node = true;
            }
        }
        self
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.edges == other.edges
            && self.stats == other.stats
            && self.warnings == other.warnings
    }
}

/// Hop bound sent to the discovery service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaxRank(u8);

impl MaxRank {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_argument(format!(
                "max rank must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
            .with_operation("model::max_rank"))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for MaxRank {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for MaxRank {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

/// Parameters of one discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    pub root: String,
    pub max_rank: MaxRank,
}

impl GraphRequest {
    pub fn new(root: impl Into<String>, max_rank: MaxRank) -> Self {
        Self {
            root: root.into(),
            max_rank,
        }
    }
}
