//! Component and journey node kinds with their fixed palette.
//!
//! Both enums are closed with an explicit `Other` arm, so an unknown type name
//! parses to `Other` and falls back to a neutral color instead of failing.

use strum_macros::EnumString;

pub const ROOT_COLOR: &str = "#FF538A";
pub const CYCLE_COLOR: &str = "#FE9339";
pub const FALLBACK_COLOR: &str = "#5F6A7D";
pub const JOURNEY_FALLBACK_COLOR: &str = "#54698D";

/// Metadata component type as reported by the discovery service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum ComponentKind {
    Flow,
    ApexClass,
    ApexTrigger,
    ValidationRule,
    Layout,
    LightningComponentBundle,
    AuraDefinitionBundle,
    #[strum(default)]
    Other(String),
}

impl ComponentKind {
    pub fn parse(type_name: &str) -> Self {
        type_name
            .parse()
            .unwrap_or_else(|_| ComponentKind::Other(type_name.to_string()))
    }

    pub fn color(&self) -> &'static str {
        match self {
            ComponentKind::Flow => "#1B96FF",
            ComponentKind::ApexClass => "#9050E9",
            ComponentKind::ApexTrigger => "#BA01FF",
            ComponentKind::ValidationRule => "#FE5C4C",
            ComponentKind::Layout => "#04844B",
            ComponentKind::LightningComponentBundle | ComponentKind::AuraDefinitionBundle => {
                "#0D9DDA"
            }
            ComponentKind::Other(_) => FALLBACK_COLOR,
        }
    }
}

/// Node type in a field data journey.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum JourneyNodeKind {
    Field,
    Flow,
    Apex,
    ValidationRule,
    Formula,
    WorkflowUpdate,
    #[strum(default)]
    Other(String),
}

impl JourneyNodeKind {
    pub fn parse(type_name: &str) -> Self {
        type_name
            .parse()
            .unwrap_or_else(|_| JourneyNodeKind::Other(type_name.to_string()))
    }

    pub fn color(&self) -> &'static str {
        match self {
            JourneyNodeKind::Field => "#1B96FF",
            JourneyNodeKind::Flow => "#9050E9",
            JourneyNodeKind::Apex => "#04844B",
            JourneyNodeKind::ValidationRule => "#FE5C4C",
            JourneyNodeKind::Formula => "#0D9DDA",
            JourneyNodeKind::WorkflowUpdate => "#FE9339",
            JourneyNodeKind::Other(_) => JOURNEY_FALLBACK_COLOR,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JourneyNodeKind::Field => "Field",
            JourneyNodeKind::Flow => "Flow",
            JourneyNodeKind::Apex => "Apex",
            JourneyNodeKind::ValidationRule => "Validation Rule",
            JourneyNodeKind::Formula => "Formula",
            JourneyNodeKind::WorkflowUpdate => "Workflow Field Update",
            JourneyNodeKind::Other(_) => "Metadata",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_component_kinds() {
        assert_eq!(ComponentKind::parse("ApexTrigger"), ComponentKind::ApexTrigger);
        assert_eq!(ComponentKind::parse("Flow").color(), "#1B96FF");
        assert_eq!(
            ComponentKind::parse("AuraDefinitionBundle").color(),
            ComponentKind::LightningComponentBundle.color()
        );
    }

    #[test]
    fn test_unknown_component_kind_falls_back() {
        let kind = ComponentKind::parse("EmailTemplate");
        assert_eq!(kind, ComponentKind::Other("EmailTemplate".to_string()));
        assert_eq!(kind.color(), FALLBACK_COLOR);
        assert_eq!(ComponentKind::parse("").color(), FALLBACK_COLOR);
    }

    #[test]
    fn test_journey_kinds_are_camel_case() {
        assert_eq!(JourneyNodeKind::parse("validationRule"), JourneyNodeKind::ValidationRule);
        assert_eq!(JourneyNodeKind::parse("workflowUpdate").label(), "Workflow Field Update");
        assert_eq!(JourneyNodeKind::parse("ValidationRule").label(), "Metadata");
        assert_eq!(JourneyNodeKind::parse("mystery").color(), JOURNEY_FALLBACK_COLOR);
    }
}
