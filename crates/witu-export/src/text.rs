//! Plain-text reports for clipboard and `.txt` downloads.

use std::collections::BTreeMap;
use std::fmt::Write;

use witu_core::{DependencyReport, Graph, JourneyResponse, ProcessFlow, SearchContext};

const HEAVY_RULE: usize = 60;
const LIGHT_RULE: usize = 40;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = write!(out, "{}\n\n", "=".repeat(HEAVY_RULE));
}

fn warnings_section(lines: &mut Vec<String>, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    lines.push("Warnings:".to_string());
    lines.extend(warnings.iter().map(|w| format!("- {w}")));
    lines.push(String::new());
}

/// Grouped dependency list with bullet lines per record.
pub fn dependency_text(report: &DependencyReport, context: Option<&SearchContext>) -> String {
    let mut text = String::new();
    if let Some(described) = context.and_then(SearchContext::describe) {
        heading(&mut text, &format!("Dependencies of {described}"));
    }

    for group in &report.groups {
        let _ = writeln!(text, "{} ({})", group.component_type, group.count);
        let _ = writeln!(text, "{}", "-".repeat(LIGHT_RULE));
        for rec in &group.records {
            let _ = write!(text, "  • {}", rec.metadata_component_name);
            if let Some(access) = rec.access_type.as_deref().filter(|a| !a.is_empty()) {
                let _ = write!(text, " [{access}]");
            }
            if let Some(ns) = rec
                .metadata_component_namespace
                .as_deref()
                .filter(|n| !n.is_empty())
            {
                let _ = write!(text, " ({ns})");
            }
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

/// Journey summary, node list and edge list. Edge endpoints are shown by name
/// when they resolve and by raw id otherwise.
pub fn journey_text(response: &JourneyResponse, depth: u8) -> String {
    let graph = &response.graph;
    let mut lines = vec![
        format!(
            "Data Journey: {}.{}",
            response.object_name, response.field_name
        ),
        format!("Depth: {depth}"),
        format!("Nodes: {}", graph.nodes().len()),
        format!("Edges: {}", graph.edges().len()),
        String::new(),
    ];

    warnings_section(&mut lines, graph.warnings());

    lines.push("Nodes:".to_string());
    for node in graph.nodes() {
        lines.push(format!(
            "- {} | type={} | direction={} | access={} | depth={}",
            node.name,
            node.component_type,
            node.direction.map(|d| d.as_str()).unwrap_or_default(),
            node.access_type
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or("n/a"),
            node.rank.unwrap_or(0)
        ));
    }

    lines.push(String::new());
    lines.push("Edges:".to_string());
    let name_of = |id: &str| graph.node(id).map_or(id.to_string(), |n| n.name.clone());
    for edge in graph.edges() {
        lines.push(format!(
            "- {} -> {} | {} | {}",
            name_of(&edge.source_id),
            name_of(&edge.target_id),
            edge.relationship,
            edge.detail.as_deref().unwrap_or_default()
        ));
    }

    lines.join("\n")
}

/// Phase-by-phase order of execution.
pub fn process_flow_text(flow: &ProcessFlow) -> String {
    let mut lines = vec![
        "Process Flow Map".to_string(),
        format!("Object: {}", flow.object_name),
        format!("Context: {}", flow.trigger_context),
        format!("Total automations: {}", flow.total_automations),
        format!("Summary: {}", flow.stats_label()),
        String::new(),
    ];

    for phase in &flow.phases {
        lines.push(format!("{}. {}", phase.phase_number, phase.phase_name));
        if phase.steps.is_empty() {
            lines.push("  [none]".to_string());
            lines.push(String::new());
            continue;
        }
        for step in &phase.steps {
            let name = if step.name.is_empty() {
                "[unnamed]"
            } else {
                step.name.as_str()
            };
            let state = if step.is_active { "Active" } else { "Inactive" };
            lines.push(format!("  - {name} [{state}]"));
            lines.push(format!(
                "    Context: {}",
                step.trigger_context
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .unwrap_or("n/a")
            ));
            if let Some(description) = step.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(format!("    Description: {description}"));
            }
            if let Some(url) = step.setup_url.as_deref().filter(|u| !u.is_empty()) {
                lines.push(format!("    Setup: {url}"));
            }
        }
        lines.push(String::new());
    }

    warnings_section(&mut lines, &flow.warnings);
    lines.join("\n")
}

/// Blast-radius summary with nodes grouped by rank.
pub fn blast_radius_text(graph: &Graph, context: Option<&SearchContext>) -> String {
    let mut text = String::new();
    if let Some(described) = context.and_then(SearchContext::describe) {
        heading(&mut text, &format!("Blast Radius of {described}"));
    }

    let stats = graph.stats();
    let _ = writeln!(text, "Nodes: {}", stats.total_nodes);
    let _ = writeln!(text, "Edges: {}", stats.total_edges);
    let _ = writeln!(text, "Max rank: {}", stats.max_rank_reached);
    let _ = writeln!(text, "Cycle nodes: {}", graph.cycle_count());
    text.push('\n');

    let mut warnings = Vec::new();
    warnings_section(&mut warnings, graph.warnings());
    for line in warnings {
        let _ = writeln!(text, "{line}");
    }

    let mut by_rank: BTreeMap<u32, Vec<_>> = BTreeMap::new();
    for node in graph.nodes() {
        by_rank.entry(node.layer()).or_default().push(node);
    }
    for (rank, mut nodes) in by_rank {
        nodes.sort_by(|a, b| a.name.cmp(&b.name));
        let _ = writeln!(text, "Rank {rank} ({})", nodes.len());
        let _ = writeln!(text, "{}", "-".repeat(LIGHT_RULE));
        for node in nodes {
            let _ = write!(text, "  • {}", node.name);
            if !node.component_type.is_empty() {
                let _ = write!(text, " [{}]", node.component_type);
            }
            if node.is_root {
                text.push_str(" (root)");
            }
            if node.is_cycle_node {
                text.push_str(" (cycle)");
            }
            text.push('\n');
        }
        text.push('\n');
    }
    text
}
