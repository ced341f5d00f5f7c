use witu_core::ComponentKind;
use witu_core::kind::{CYCLE_COLOR, ROOT_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Fixed legend shown beside the blast-radius graph, in display order.
pub fn legend() -> Vec<LegendEntry> {
    let kinds = [
        ("Flow", ComponentKind::Flow),
        ("Apex Class", ComponentKind::ApexClass),
        ("Apex Trigger", ComponentKind::ApexTrigger),
        ("Validation Rule", ComponentKind::ValidationRule),
        ("Layout", ComponentKind::Layout),
        ("LWC/Aura", ComponentKind::LightningComponentBundle),
    ];

    kinds
        .into_iter()
        .map(|(label, kind)| LegendEntry {
            label,
            color: kind.color(),
        })
        .chain([
            LegendEntry {
                label: "Root",
                color: ROOT_COLOR,
            },
            LegendEntry {
                label: "Cycle",
                color: CYCLE_COLOR,
            },
        ])
        .collect()
}
