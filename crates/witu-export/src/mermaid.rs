//! Mermaid flowchart text for pasting into docs and tickets.

use std::fmt::Write;

use strum_macros::{Display, EnumString};

use witu_core::Graph;

/// Replace anything outside `[A-Za-z0-9_]` with `_`. Empty ids become `unknown`.
pub fn sanitize_id(input: &str) -> String {
    if input.is_empty() {
        return "unknown".to_string();
    }
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

pub fn escape_label(input: &str) -> String {
    input.replace('"', "\\\"")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FlowDirection {
    #[default]
    #[strum(serialize = "TD")]
    TopDown,
    #[strum(serialize = "LR")]
    LeftRight,
}

/// Builder for flowchart text. Every statement is indented four spaces.
pub struct DiagramBuilder {
    output: String,
    prefix: String,
}

impl DiagramBuilder {
    pub fn new(direction: FlowDirection) -> Self {
        let mut output = String::with_capacity(1024);
        let _ = writeln!(output, "graph {direction}");
        Self {
            output,
            prefix: String::new(),
        }
    }

    /// Prepend `prefix` to every sanitized identifier.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn id(&self, raw: &str) -> String {
        format!("{}{}", self.prefix, sanitize_id(raw))
    }

    pub fn node(&mut self, id: &str, label: &str) -> &mut Self {
        let id = self.id(id);
        let _ = writeln!(self.output, "    {id}[\"{}\"]", escape_label(label));
        self
    }

    /// Subroutine shape, used for the root.
    pub fn emphasized_node(&mut self, id: &str, label: &str) -> &mut Self {
        let id = self.id(id);
        let _ = writeln!(self.output, "    {id}[[\"{}\"]]", escape_label(label));
        self
    }

    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        let (from, to) = (self.id(from), self.id(to));
        let _ = writeln!(self.output, "    {from} --> {to}");
        self
    }

    pub fn build(self) -> String {
        self.output
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MermaidOptions {
    pub direction: FlowDirection,
    pub id_prefix: String,
}

impl MermaidOptions {
    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

/// Node declarations in input order, then every edge in input order.
pub fn mermaid(graph: &Graph, options: &MermaidOptions) -> String {
    let mut diagram = DiagramBuilder::new(options.direction).with_id_prefix(&options.id_prefix);
    for node in graph.nodes() {
        if node.is_root {
            diagram.emphasized_node(&node.id, &node.name);
        } else {
            diagram.node(&node.id, &node.name);
        }
    }
    for edge in graph.edges() {
        diagram.edge(&edge.source_id, &edge.target_id);
    }
    diagram.build()
}
