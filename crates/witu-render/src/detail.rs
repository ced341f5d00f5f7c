//! Detail panel contents for the selected node.

use witu_core::{Direction, Graph, JourneyNodeKind, Node};

pub const NO_DETAIL: &str = "No additional detail available.";

/// Coarse read/write label derived from a free-form access type.
pub fn access_label(access_type: Option<&str>) -> &'static str {
    let access = access_type.unwrap_or_default().to_lowercase();
    match (access.contains("write"), access.contains("read")) {
        (true, true) => "reads/writes",
        (true, false) => "writes",
        _ => "reads",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDetail {
    pub id: String,
    pub name: String,
    pub type_label: String,
    pub direction_label: &'static str,
    pub relationship_summary: String,
    pub detail_text: String,
    pub setup_url: Option<String>,
}

impl SelectionDetail {
    /// Describe `id` using the graph's index. `None` if the id is unknown.
    pub fn for_node(graph: &Graph, id: &str) -> Option<Self> {
        let node = graph.node(id)?;
        let incoming: Vec<_> = graph.incoming(id).collect();

        let relationship_summary = if incoming.is_empty() {
            access_label(node.access_type.as_deref()).to_string()
        } else {
            let mut labels: Vec<&str> = Vec::new();
            for edge in &incoming {
                let label = edge.relationship.label();
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            labels.join(", ")
        };

        let edge_detail = incoming
            .iter()
            .filter_map(|e| e.detail.as_deref())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");

        let detail_text = match node.detail.as_deref() {
            Some(detail) if !detail.is_empty() => detail.to_string(),
            _ if !edge_detail.is_empty() => edge_detail,
            _ => NO_DETAIL.to_string(),
        };

        Some(Self {
            id: node.id.clone(),
            name: node.name.clone(),
            type_label: type_label(node),
            direction_label: node.direction.unwrap_or(Direction::Root).label(),
            relationship_summary,
            detail_text,
            setup_url: node.setup_url.clone().filter(|url| !url.is_empty()),
        })
    }
}

fn type_label(node: &Node) -> String {
    if node.direction.is_some() {
        return JourneyNodeKind::parse(&node.component_type).label().to_string();
    }
    if node.component_type.is_empty() {
        "Unknown".to_string()
    } else {
        node.component_type.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use witu_core::Edge;

    fn journey() -> Graph {
        Graph::new(
            vec![
                Node::new("f", "Account.Status__c")
                    .with_type("field")
                    .with_direction(Direction::Root)
                    .root(),
                Node::new("fl", "Update Status")
                    .with_type("flow")
                    .with_direction(Direction::Upstream)
                    .with_access("Write"),
                Node::new("vr", "Status_Check")
                    .with_type("validationRule")
                    .with_direction(Direction::Downstream)
                    .with_access("Read")
                    .with_setup_url("https://example.test/vr"),
                Node::new("x", "Mystery").with_type("somethingElse"),
            ],
            vec![
                Edge::new("fl", "f").with_relationship("writes_to"),
                Edge::new("f", "vr")
                    .with_relationship("read_by")
                    .with_detail("criteria"),
                Edge::new("fl", "vr")
                    .with_relationship("read_by")
                    .with_detail("entry condition"),
                Edge::new("f", "x").with_relationship("custom link"),
            ],
        )
    }

    #[test]
    fn test_access_label() {
        assert_eq!(access_label(Some("Read/Write")), "reads/writes");
        assert_eq!(access_label(Some("WRITE")), "writes");
        assert_eq!(access_label(Some("Read")), "reads");
        assert_eq!(access_label(None), "reads");
    }

    #[test]
    fn test_relationships_are_distinct_labels() {
        let detail = SelectionDetail::for_node(&journey(), "vr").unwrap();
        assert_eq!(detail.relationship_summary, "reads from");
        assert_eq!(detail.detail_text, "criteria | entry condition");
        assert_eq!(detail.type_label, "Validation Rule");
        assert_eq!(detail.direction_label, "Downstream");
        assert_eq!(detail.setup_url.as_deref(), Some("https://example.test/vr"));
    }

    #[test]
    fn test_summary_falls_back_to_access() {
        let detail = SelectionDetail::for_node(&journey(), "fl").unwrap();
        assert_eq!(detail.relationship_summary, "writes");
        assert_eq!(detail.detail_text, NO_DETAIL);
        assert_eq!(detail.direction_label, "Upstream");
    }

    #[test]
    fn test_free_form_relationship_verbatim() {
        let detail = SelectionDetail::for_node(&journey(), "x").unwrap();
        assert_eq!(detail.relationship_summary, "custom link");
        assert_eq!(detail.type_label, "somethingElse");
        assert_eq!(detail.direction_label, "Root");
    }

    #[test]
    fn test_unknown_id() {
        assert!(SelectionDetail::for_node(&journey(), "missing").is_none());
    }
}
