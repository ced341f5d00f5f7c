use std::fmt::Write;

use witu_core::{DependencyReport, SearchContext};

pub const TABLE_HEADER: &str = "| Component Name | Type | Namespace | Access |\n|---|---|---|---|\n";

/// Pipe table of the dependency list, ready to paste into a ticket.
///
/// Cell values are written verbatim.
pub fn markdown_table(report: &DependencyReport, context: Option<&SearchContext>) -> String {
    let mut md = String::new();
    if let Some(described) = context.and_then(SearchContext::describe) {
        let _ = write!(md, "## Dependencies of {described}\n\n");
    }
    md.push_str(TABLE_HEADER);

    for rec in report.records() {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} |",
            rec.metadata_component_name,
            rec.metadata_component_type,
            rec.metadata_component_namespace.as_deref().unwrap_or_default(),
            rec.access_type.as_deref().unwrap_or_default()
        );
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use witu_core::{DependencyGroup, DependencyRecord};

    #[test]
    fn test_markdown_table() {
        let report = DependencyReport {
            component_name: "Status__c".into(),
            metadata_type: "CustomField".into(),
            groups: vec![DependencyGroup::new(
                "Flow",
                vec![DependencyRecord::new("Sync", "Flow").with_access("Read")],
            )],
            ..DependencyReport::default()
        };
        assert_eq!(
            markdown_table(&report, Some(&report.context())),
            "## Dependencies of Status__c (CustomField)\n\n\
             | Component Name | Type | Namespace | Access |\n\
             |---|---|---|---|\n\
             | Sync | Flow |  | Read |\n"
        );
    }

    #[test]
    fn test_without_context() {
        assert_eq!(markdown_table(&DependencyReport::default(), None), TABLE_HEADER);
    }
}
