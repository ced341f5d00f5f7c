//! Comma-separated tables for every view.
//!
//! Cells are quoted only when they contain a comma, a quote or a line break
//! (`\n` or `\r`), with inner quotes doubled. Rows are joined by `\n` with
//! no trailing newline.

use witu_core::{DependencyReport, Graph, ProcessFlow};

pub const DEPENDENCY_HEADER: [&str; 5] = [
    "Component Name",
    "Component Type",
    "Namespace",
    "Access Type",
    "Setup URL",
];
pub const BLAST_RADIUS_HEADER: [&str; 6] = [
    "Component Name",
    "Component Type",
    "Depth",
    "Is Root",
    "Is Cycle Node",
    "Setup URL",
];
pub const JOURNEY_HEADER: [&str; 6] = [
    "Node Name",
    "Node Type",
    "Direction",
    "Access Type",
    "Depth",
    "Setup URL",
];
pub const PROCESS_FLOW_HEADER: [&str; 6] = [
    "Phase",
    "Phase Name",
    "Automation Name",
    "Automation Type",
    "Is Active",
    "Setup URL",
];
pub const EDGE_HEADER: [&str; 4] = ["Source Id", "Target Id", "Relationship", "Detail"];

pub fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| escape_cell(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

struct Table {
    rows: Vec<String>,
}

impl Table {
    fn new(header: &[&str]) -> Self {
        Self {
            rows: vec![row(header)],
        }
    }

    fn push<S: AsRef<str>>(&mut self, cells: &[S]) {
        self.rows.push(row(cells));
    }

    fn finish(self) -> String {
        self.rows.join("\n")
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

pub fn dependency_csv(report: &DependencyReport) -> String {
    let mut table = Table::new(&DEPENDENCY_HEADER);
    for rec in report.records() {
        table.push(&[
            rec.metadata_component_name.as_str(),
            rec.metadata_component_type.as_str(),
            opt(&rec.metadata_component_namespace),
            opt(&rec.access_type),
            opt(&rec.setup_url),
        ]);
    }
    table.finish()
}

/// One row per node. Unranked nodes leave the depth cell empty.
pub fn blast_radius_csv(graph: &Graph) -> String {
    let mut table = Table::new(&BLAST_RADIUS_HEADER);
    for node in graph.nodes() {
        table.push(&[
            node.name.clone(),
            node.component_type.clone(),
            node.rank.map(|r| r.to_string()).unwrap_or_default(),
            node.is_root.to_string(),
            node.is_cycle_node.to_string(),
            opt(&node.setup_url).to_string(),
        ]);
    }
    table.finish()
}

pub fn journey_csv(graph: &Graph) -> String {
    let mut table = Table::new(&JOURNEY_HEADER);
    for node in graph.nodes() {
        table.push(&[
            node.name.clone(),
            node.component_type.clone(),
            node.direction.map(|d| d.as_str()).unwrap_or_default().to_string(),
            opt(&node.access_type).to_string(),
            node.rank.unwrap_or(0).to_string(),
            opt(&node.setup_url).to_string(),
        ]);
    }
    table.finish()
}

pub fn process_flow_csv(flow: &ProcessFlow) -> String {
    let mut table = Table::new(&PROCESS_FLOW_HEADER);
    for (phase, step) in flow.steps() {
        table.push(&[
            phase.phase_number.to_string(),
            phase.phase_name.clone(),
            step.name.clone(),
            step.automation_type.clone(),
            step.is_active.to_string(),
            opt(&step.setup_url).to_string(),
        ]);
    }
    table.finish()
}

/// Every edge as received, including ones whose endpoints do not resolve.
pub fn edges_csv(graph: &Graph) -> String {
    let mut table = Table::new(&EDGE_HEADER);
    for edge in graph.edges() {
        table.push(&[
            edge.source_id.as_str(),
            edge.target_id.as_str(),
            edge.relationship.as_str(),
            opt(&edge.detail),
        ]);
    }
    table.finish()
}
