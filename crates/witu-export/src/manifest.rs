//! Deployment manifest (`package.xml`) listing every referencing component.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use chrono::{SecondsFormat, Utc};

use witu_core::{DependencyReport, SearchContext};

pub const API_VERSION: &str = "65.0";
pub const PACKAGE_NS: &str = "http://soap.sforce.com/2006/04/metadata";

/// Map a tooling API type name to its deployable metadata type.
///
/// Unknown names pass through unchanged.
pub fn metadata_type(tooling_type: &str) -> &str {
    match tooling_type {
        "FlowDefinition" => "Flow",
        "Page" => "ApexPage",
        other => other,
    }
}

/// Current UTC time in the form written to the manifest header.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the manifest. Types and their members are sorted and members are
/// listed once each, so only the timestamp line varies between runs.
pub fn package_xml(
    report: &DependencyReport,
    context: Option<&SearchContext>,
    generated_at: &str,
) -> String {
    let mut members: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for rec in report.records() {
        members
            .entry(metadata_type(&rec.metadata_component_type))
            .or_default()
            .insert(&rec.metadata_component_name);
    }

    let mut xml = String::with_capacity(256 + members.len() * 128);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<Package xmlns=\"{PACKAGE_NS}\">");
    xml.push_str("    <!-- Generated by Where Is This Used? (WITU) -->\n");
    if let Some(described) = context.and_then(SearchContext::describe) {
        let _ = writeln!(xml, "    <!-- Dependencies of: {described} -->");
    }
    let _ = writeln!(xml, "    <!-- Generated: {generated_at} -->");

    for (type_name, names) in &members {
        xml.push_str("    <types>\n");
        for name in names {
            let _ = writeln!(xml, "        <members>{}</members>", escape(name));
        }
        let _ = writeln!(xml, "        <name>{}</name>", escape(type_name));
        xml.push_str("    </types>\n");
    }

    let _ = writeln!(xml, "    <version>{API_VERSION}</version>");
    xml.push_str("</Package>\n");
    xml
}
