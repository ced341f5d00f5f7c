//! Response payloads of the non-graph views and the search context they share.

use serde::{Deserialize, Serialize};

use crate::Graph;

/// What the user searched for. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchContext {
    pub metadata_type: Option<String>,
    pub component_name: Option<String>,
    pub object_name: Option<String>,
    pub field_name: Option<String>,
}

impl SearchContext {
    pub fn component(metadata_type: impl Into<String>, component_name: impl Into<String>) -> Self {
        Self {
            metadata_type: Some(metadata_type.into()),
            component_name: Some(component_name.into()),
            ..Self::default()
        }
    }

    pub fn field(object_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            object_name: Some(object_name.into()),
            field_name: Some(field_name.into()),
            ..Self::default()
        }
    }

    /// `"name (type)"` when a component was searched.
    pub fn describe(&self) -> Option<String> {
        let name = self.component_name.as_deref().filter(|n| !n.is_empty())?;
        Some(format!(
            "{name} ({})",
            self.metadata_type.as_deref().unwrap_or_default()
        ))
    }
}

/// One component that references the searched component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyRecord {
    pub metadata_component_id: String,
    pub metadata_component_name: String,
    pub metadata_component_type: String,
    pub metadata_component_namespace: Option<String>,
    pub access_type: Option<String>,
    pub setup_url: Option<String>,
    pub is_subflow_reference: bool,
}

impl DependencyRecord {
    pub fn new(name: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            metadata_component_name: name.into(),
            metadata_component_type: component_type.into(),
            ..Self::default()
        }
    }

    pub fn with_access(mut self, access: impl Into<String>) -> Self {
        self.access_type = Some(access.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata_component_namespace = Some(namespace.into());
        self
    }

    pub fn with_setup_url(mut self, url: impl Into<String>) -> Self {
        self.setup_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyGroup {
    pub component_type: String,
    pub count: usize,
    pub records: Vec<DependencyRecord>,
}

impl DependencyGroup {
    pub fn new(component_type: impl Into<String>, records: Vec<DependencyRecord>) -> Self {
        Self {
            component_type: component_type.into(),
            count: records.len(),
            records,
        }
    }
}

/// "Where is this used" result list, grouped by referencing component type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependencyReport {
    pub component_name: String,
    pub metadata_type: String,
    pub total_count: usize,
    pub limit_reached: bool,
    pub warning_message: Option<String>,
    pub groups: Vec<DependencyGroup>,
}

impl DependencyReport {
    pub fn records(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.groups.iter().flat_map(|g| g.records.iter())
    }

    pub fn context(&self) -> SearchContext {
        SearchContext::component(&self.metadata_type, &self.component_name)
    }
}

/// Field data journey: a graph whose nodes carry a direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyResponse {
    #[serde(default)]
    pub object_name: String,
    #[serde(default)]
    pub field_name: String,
    #[serde(flatten)]
    pub graph: Graph,
}

impl JourneyResponse {
    pub fn context(&self) -> SearchContext {
        SearchContext::field(&self.object_name, &self.field_name)
    }
}

/// One automation that fires during a save phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutomationStep {
    pub id: Option<String>,
    pub name: String,
    pub automation_type: String,
    pub is_active: bool,
    pub trigger_context: Option<String>,
    pub description: Option<String>,
    pub setup_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phase {
    pub phase_number: u32,
    pub phase_name: String,
    #[serde(alias = "automations")]
    pub steps: Vec<AutomationStep>,
}

/// Order of execution of automations for one object and trigger context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessFlow {
    pub object_name: String,
    pub trigger_context: String,
    pub total_automations: usize,
    pub warnings: Vec<String>,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessFlowStats {
    pub triggers: usize,
    pub validation_rules: usize,
    pub flows: usize,
    pub workflows: usize,
}

impl ProcessFlow {
    pub fn steps(&self) -> impl Iterator<Item = (&Phase, &AutomationStep)> {
        self.phases
            .iter()
            .flat_map(|phase| phase.steps.iter().map(move |step| (phase, step)))
    }

    pub fn stats(&self) -> ProcessFlowStats {
        let mut stats = ProcessFlowStats::default();
        for (_, step) in self.steps() {
            match step.automation_type.as_str() {
                "BeforeTrigger" | "AfterTrigger" => stats.triggers += 1,
                "ValidationRule" => stats.validation_rules += 1,
                "WorkflowRule" | "WorkflowFieldUpdate" => stats.workflows += 1,
                t if t.starts_with("Flow_") => stats.flows += 1,
                _ => {}
            }
        }
        stats
    }

    pub fn stats_label(&self) -> String {
        let s = self.stats();
        format!(
            "{} triggers, {} VRs, {} flows, {} workflows",
            s.triggers, s.validation_rules, s.flows, s.workflows
        )
    }
}
