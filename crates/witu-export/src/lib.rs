//! Text exports of witu views.
//!
//! Every emitter is a pure function of its payload. None of them depend on
//! layout or ranking, and all of them accept empty input.
//!
//! # Module Structure
//!
//! - [`tabular`]: CSV tables per view plus the raw edge list
//! - [`manifest`]: `package.xml` generation
//! - [`markdown`]: dependency table in Markdown
//! - [`mermaid`]: flowchart text
//! - [`text`]: plain-text reports
//! - [`export`]: view/format dispatch, file names and MIME types

pub mod export;
pub mod manifest;
pub mod markdown;
pub mod mermaid;
pub mod tabular;
pub mod text;

pub use export::{Export, ExportFormat, Exporter, ViewData};
pub use manifest::{metadata_type, now_timestamp, package_xml};
pub use markdown::markdown_table;
pub use mermaid::{DiagramBuilder, FlowDirection, MermaidOptions, mermaid, sanitize_id};
pub use tabular::{
    blast_radius_csv, dependency_csv, edges_csv, escape_cell, journey_csv, process_flow_csv,
};
pub use text::{blast_radius_text, dependency_text, journey_text, process_flow_text};
