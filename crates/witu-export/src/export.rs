//! Export dispatch: which formats each view offers and what the file is called.

use std::time::Instant;

use strum_macros::{Display, EnumString, IntoStaticStr};
use tracing::info;

use witu_core::{DependencyReport, Graph, JourneyResponse, MaxRank, ProcessFlow, SearchContext};
use witu_error::{Error, Result};

use crate::manifest::{now_timestamp, package_xml};
use crate::markdown::markdown_table;
use crate::mermaid::{FlowDirection, MermaidOptions, mermaid};
use crate::tabular;
use crate::text;

pub const MIME_CSV: &str = "text/csv";
pub const MIME_XML: &str = "application/xml";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ExportFormat {
    Csv,
    /// Raw edge list, unresolved edges included.
    EdgesCsv,
    Manifest,
    Markdown,
    Mermaid,
    Text,
}

/// Payload of whichever view is being exported.
#[derive(Debug, Clone)]
pub enum ViewData {
    Dependencies(DependencyReport),
    BlastRadius(Graph),
    Journey(JourneyResponse),
    ProcessFlow(ProcessFlow),
}

impl ViewData {
    /// Name used in generated file names.
    pub fn view_type(&self) -> &'static str {
        match self {
            ViewData::Dependencies(_) => "dependencies",
            ViewData::BlastRadius(_) => "blastRadius",
            ViewData::Journey(_) => "dataJourney",
            ViewData::ProcessFlow(_) => "processFlow",
        }
    }

    pub fn supports(&self, format: ExportFormat) -> bool {
        use ExportFormat::*;
        matches!(
            (self, format),
            (ViewData::Dependencies(_), Csv | Manifest | Markdown | Text)
                | (ViewData::BlastRadius(_), Csv | EdgesCsv | Mermaid | Text)
                | (ViewData::Journey(_), Csv | EdgesCsv | Text)
                | (ViewData::ProcessFlow(_), Csv | Text)
        )
    }

    /// Search context carried by the payload itself, if any.
    pub fn context(&self) -> Option<SearchContext> {
        match self {
            ViewData::Dependencies(report) => Some(report.context()),
            ViewData::Journey(response) => Some(response.context()),
            ViewData::BlastRadius(_) | ViewData::ProcessFlow(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

/// Settings shared by every export call.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    context: Option<SearchContext>,
    generated_at: Option<String>,
    max_rank: Option<MaxRank>,
    direction: FlowDirection,
    id_prefix: String,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the search context taken from the payload.
    pub fn with_context(mut self, context: SearchContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Fix the manifest timestamp instead of reading the clock.
    pub fn with_generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    /// Hop bound the journey was requested with.
    pub fn with_max_rank(mut self, max_rank: MaxRank) -> Self {
        self.max_rank = Some(max_rank);
        self
    }

    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Prefix for Mermaid node identifiers, e.g. `n_` so ids that start
    /// with a digit stay letter-led.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn export(&self, view: &ViewData, format: ExportFormat) -> Result<Export> {
        if !view.supports(format) {
            return Err(Error::unsupported(format!(
                "{format} export is not available for the {} view",
                view.view_type()
            ))
            .with_operation("export::export")
            .with_context("view", view.view_type())
            .with_context("format", format.to_string()));
        }

        let start = Instant::now();
        let context = self.context.clone().or_else(|| view.context());
        let prefix = context
            .as_ref()
            .and_then(|c| c.component_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("witu")
            .to_string();
        let view_type = view.view_type();

        let export = match (view, format) {
            (view, ExportFormat::Csv) => Export {
                filename: format!("{prefix}-{view_type}.csv"),
                mime: MIME_CSV,
                body: match view {
                    ViewData::Dependencies(report) => tabular::dependency_csv(report),
                    ViewData::BlastRadius(graph) => tabular::blast_radius_csv(graph),
                    ViewData::Journey(response) => tabular::journey_csv(&response.graph),
                    ViewData::ProcessFlow(flow) => tabular::process_flow_csv(flow),
                },
            },
            (ViewData::BlastRadius(graph), ExportFormat::EdgesCsv) => Export {
                filename: format!("{prefix}-{view_type}-edges.csv"),
                mime: MIME_CSV,
                body: tabular::edges_csv(graph),
            },
            (ViewData::Journey(response), ExportFormat::EdgesCsv) => Export {
                filename: format!("{prefix}-{view_type}-edges.csv"),
                mime: MIME_CSV,
                body: tabular::edges_csv(&response.graph),
            },
            (ViewData::Dependencies(report), ExportFormat::Manifest) => {
                let generated_at = self.generated_at.clone().unwrap_or_else(now_timestamp);
                Export {
                    filename: "package.xml".to_string(),
                    mime: MIME_XML,
                    body: package_xml(report, context.as_ref(), &generated_at),
                }
            }
            (ViewData::Dependencies(report), ExportFormat::Markdown) => Export {
                filename: format!("{prefix}-{view_type}.md"),
                mime: MIME_MARKDOWN,
                body: markdown_table(report, context.as_ref()),
            },
            (ViewData::BlastRadius(graph), ExportFormat::Mermaid) => {
                let options = MermaidOptions::default()
                    .with_direction(self.direction)
                    .with_id_prefix(self.id_prefix.as_str());
                Export {
                    filename: format!("{prefix}-{view_type}.mmd"),
                    mime: MIME_TEXT,
                    body: mermaid(graph, &options),
                }
            }
            (ViewData::Dependencies(report), ExportFormat::Text) => Export {
                filename: format!("{prefix}-{view_type}.txt"),
                mime: MIME_TEXT,
                body: text::dependency_text(report, context.as_ref()),
            },
            (ViewData::BlastRadius(graph), ExportFormat::Text) => Export {
                filename: format!("{prefix}-{view_type}.txt"),
                mime: MIME_TEXT,
                body: text::blast_radius_text(graph, context.as_ref()),
            },
            (ViewData::Journey(response), ExportFormat::Text) => {
                let depth = self
                    .max_rank
                    .map(|m| m.get())
                    .unwrap_or_else(|| {
                        u8::try_from(response.graph.stats().max_rank_reached).unwrap_or(u8::MAX)
                    });
                Export {
                    filename: format!(
                        "{}_{}_data_journey.txt",
                        response.object_name, response.field_name
                    ),
                    mime: MIME_TEXT,
                    body: text::journey_text(response, depth),
                }
            }
            (ViewData::ProcessFlow(flow), ExportFormat::Text) => {
                let object = if flow.object_name.is_empty() {
                    "object"
                } else {
                    flow.object_name.as_str()
                };
                Export {
                    filename: format!(
                        "process-flow-{object}-{}.txt",
                        flow.trigger_context.to_lowercase()
                    ),
                    mime: MIME_TEXT,
                    body: text::process_flow_text(flow),
                }
            }
            (view, format) => {
                return Err(Error::unexpected(format!(
                    "no emitter for {format} on the {} view",
                    view.view_type()
                ))
                .with_operation("export::export"));
            }
        };

        info!(
            view = view_type,
            %format,
            bytes = export.body.len(),
            "export in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        Ok(export)
    }
}
