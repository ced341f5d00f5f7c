use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use witu::{
    DiagramDirection, ExportOptions, OutputFormat, ProcessingOptions, RenderOptions, ViewKind,
    WituOptions, run_main,
};
use witu_core::ErrorKind;

const BLAST: &str = r#"{
    "nodes": [
        {"id": "r", "name": "Status__c", "componentType": "CustomField", "isRoot": true},
        {"id": "f", "name": "Sync Flow", "componentType": "Flow"},
        {"id": "c", "name": "AccountService", "componentType": "ApexClass"},
        {"id": "t", "name": "AccountTrigger", "componentType": "ApexTrigger"}
    ],
    "edges": [
        {"sourceId": "r", "targetId": "f"},
        {"sourceId": "r", "targetId": "c"},
        {"sourceId": "c", "targetId": "t"},
        {"sourceId": "t", "targetId": "c"},
        {"sourceId": "c", "targetId": "zzz"}
    ],
    "warnings": []
}"#;

const JOURNEY: &str = r#"{
    "objectName": "Account",
    "fieldName": "Status__c",
    "nodes": [
        {"id": "fld", "name": "Status__c", "nodeType": "field", "direction": "root", "depth": 0},
        {"id": "fl", "name": "Sync", "nodeType": "flow", "direction": "upstream", "accessType": "Write", "depth": 1},
        {"id": "vr", "name": "Check", "nodeType": "validationRule", "direction": "downstream", "accessType": "Read", "depth": 1}
    ],
    "edges": [
        {"sourceId": "fl", "targetId": "fld", "relationship": "writes_to"},
        {"sourceId": "fld", "targetId": "vr", "relationship": "read_by", "detail": "criteria"}
    ],
    "warnings": []
}"#;

const DEPENDENCIES: &str = r#"{
    "componentName": "Status__c",
    "metadataType": "CustomField",
    "totalCount": 2,
    "limitReached": false,
    "groups": [
        {"componentType": "Flow", "count": 1, "records": [
            {"metadataComponentId": "301", "metadataComponentName": "Sync", "metadataComponentType": "FlowDefinition"}
        ]},
        {"componentType": "ApexClass", "count": 1, "records": [
            {"metadataComponentId": "01p", "metadataComponentName": "AccountService", "metadataComponentType": "ApexClass", "accessType": "Read"}
        ]}
    ]
}"#;

fn payload(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

fn options(file: String, view: ViewKind, format: OutputFormat) -> WituOptions {
    WituOptions {
        files: vec![file],
        view,
        format,
        ..WituOptions::default()
    }
}

#[test]
fn blast_radius_svg_with_selection() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(
        payload(dir.path(), "blast.json", BLAST),
        ViewKind::BlastRadius,
        OutputFormat::Svg,
    );
    opts.render = RenderOptions::new().with_select("c").with_viewport_width(1000.0);
    opts.processing = ProcessingOptions::new().with_detect_cycles(true);

    let svg = run_main(&opts).unwrap();
    assert!(svg.starts_with("<svg "));
    assert_eq!(svg.matches("<circle").count(), 4);
    // r->c, c->t and t->c touch the selection; c->zzz is never drawn
    assert_eq!(svg.matches("class=\"edge selected\"").count(), 3);
    assert_eq!(svg.matches("fill=\"#FE9339\"").count(), 2);
    assert!(svg.contains("fill=\"#FF538A\""));
}

#[test]
fn unknown_selection_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(
        payload(dir.path(), "blast.json", BLAST),
        ViewKind::BlastRadius,
        OutputFormat::Svg,
    );
    opts.render = RenderOptions::new().with_select("nope");
    assert_eq!(run_main(&opts).unwrap_err().kind(), ErrorKind::NodeNotFound);
}

#[test]
fn blast_radius_exports() {
    let dir = tempfile::tempdir().unwrap();
    let file = payload(dir.path(), "blast.json", BLAST);

    let csv = run_main(&options(file.clone(), ViewKind::BlastRadius, OutputFormat::Csv)).unwrap();
    assert_eq!(
        csv.lines().nth(1),
        Some("Status__c,CustomField,0,true,false,")
    );

    let edges = run_main(&options(file.clone(), ViewKind::BlastRadius, OutputFormat::EdgesCsv)).unwrap();
    assert!(edges.lines().any(|l| l == "c,zzz,,"));

    let mut mermaid = options(file, ViewKind::BlastRadius, OutputFormat::Mermaid);
    mermaid.export = ExportOptions::new().with_direction(DiagramDirection::Lr);
    let out = run_main(&mermaid).unwrap();
    assert!(out.starts_with("graph LR\n    r[[\"Status__c\"]]\n"));

    mermaid.export = ExportOptions::new()
        .with_direction(DiagramDirection::Lr)
        .with_id_prefix("n_");
    let out = run_main(&mermaid).unwrap();
    assert!(out.starts_with("graph LR\n    n_r[[\"Status__c\"]]\n"));
    assert!(out.contains("    n_c --> n_zzz\n"));
}

#[test]
fn max_rank_trims_blast_radius() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(
        payload(dir.path(), "blast.json", BLAST),
        ViewKind::BlastRadius,
        OutputFormat::Text,
    );
    opts.render = RenderOptions::new().with_max_rank(1);
    let text = run_main(&opts).unwrap();
    assert!(text.starts_with("Nodes: 3\n"));
    assert!(text.contains("Depth limit reached: 1 components beyond rank 1 omitted"));
}

#[test]
fn journey_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let file = payload(dir.path(), "journey.json", JOURNEY);

    let svg = run_main(&options(file.clone(), ViewKind::Journey, OutputFormat::Svg)).unwrap();
    assert_eq!(svg.matches("<circle").count(), 3);

    let mut text_opts = options(file, ViewKind::Journey, OutputFormat::Text);
    text_opts.render = RenderOptions::new().with_max_rank(2);
    let text = run_main(&text_opts).unwrap();
    assert!(text.starts_with("Data Journey: Account.Status__c\nDepth: 2\nNodes: 3\nEdges: 2\n"));
    assert!(text.contains("- Check | type=validationRule | direction=downstream | access=Read | depth=1"));
}

#[test]
fn dependency_manifest_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(
        payload(dir.path(), "deps.json", DEPENDENCIES),
        ViewKind::Dependencies,
        OutputFormat::Manifest,
    );
    opts.export = ExportOptions::new().with_timestamp("2026-01-01T00:00:00.000Z");

    let xml = run_main(&opts).unwrap();
    assert!(xml.contains("<!-- Dependencies of: Status__c (CustomField) -->"));
    assert!(xml.contains("<!-- Generated: 2026-01-01T00:00:00.000Z -->"));
    assert!(xml.contains("        <members>Sync</members>\n        <name>Flow</name>"));
    assert_eq!(run_main(&opts).unwrap(), xml);
}

#[test]
fn unsupported_combinations_fail_fast() {
    let dir = tempfile::tempdir().unwrap();
    let deps = payload(dir.path(), "deps.json", DEPENDENCIES);
    let err = run_main(&options(deps.clone(), ViewKind::Dependencies, OutputFormat::Mermaid)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = run_main(&options(deps, ViewKind::Dependencies, OutputFormat::Svg)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn malformed_payload_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = payload(dir.path(), "bad.json", r#"{"edges": "nope"}"#);
    let err = run_main(&options(file, ViewKind::BlastRadius, OutputFormat::Csv)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
}

#[test]
fn directory_inputs_in_parallel_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    payload(dir.path(), "b.json", BLAST);
    payload(
        dir.path(),
        "a.json",
        r#"{"nodes": [{"id": "x", "name": "Solo", "isRoot": true}], "edges": []}"#,
    );

    let opts = WituOptions {
        dirs: vec![dir.path().to_string_lossy().into_owned()],
        view: ViewKind::BlastRadius,
        format: OutputFormat::Csv,
        processing: ProcessingOptions::new().with_parallel(true),
        ..WituOptions::default()
    };
    let out = run_main(&opts).unwrap();
    let solo = out.find("Solo").unwrap();
    let status = out.find("Status__c").unwrap();
    assert!(solo < status);
}
