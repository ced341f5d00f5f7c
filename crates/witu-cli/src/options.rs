//! Option groups shared by the `witu` binary and its tests.

use clap::{Args, ValueEnum};

use witu_core::MaxRank;
use witu_export::{ExportFormat, FlowDirection};

/// Which view payload the inputs hold.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewKind {
    #[default]
    BlastRadius,
    Journey,
    Dependencies,
    ProcessFlow,
}

/// What to write: an SVG drawing or one of the text exports.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    Csv,
    EdgesCsv,
    Manifest,
    Markdown,
    Mermaid,
    Text,
}

impl OutputFormat {
    /// The export format behind this choice, `None` for SVG.
    pub fn export_format(&self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Svg => None,
            OutputFormat::Csv => Some(ExportFormat::Csv),
            OutputFormat::EdgesCsv => Some(ExportFormat::EdgesCsv),
            OutputFormat::Manifest => Some(ExportFormat::Manifest),
            OutputFormat::Markdown => Some(ExportFormat::Markdown),
            OutputFormat::Mermaid => Some(ExportFormat::Mermaid),
            OutputFormat::Text => Some(ExportFormat::Text),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagramDirection {
    #[default]
    Td,
    Lr,
}

impl From<DiagramDirection> for FlowDirection {
    fn from(value: DiagramDirection) -> Self {
        match value {
            DiagramDirection::Td => FlowDirection::TopDown,
            DiagramDirection::Lr => FlowDirection::LeftRight,
        }
    }
}

/// Request and view-state options for graph rendering.
#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    /// Id of the root component (must exist in the payload when given)
    #[arg(long, value_name = "ID")]
    pub root: Option<String>,

    /// Hop bound, 1 to 5; nodes ranked beyond it are dropped with a warning
    #[arg(
        long = "max-rank",
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=5)
    )]
    pub max_rank: u8,

    /// Node to select; edges touching it are highlighted
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,

    /// Zoom factor applied on top of the fit-to-width scale
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Viewport width in pixels; 0 disables fit-to-width
    #[arg(long = "viewport-width", default_value_t = 0.0)]
    pub viewport_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root: None,
            max_rank: MaxRank::default().get(),
            select: None,
            zoom: None,
            viewport_width: 0.0,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_max_rank(mut self, max_rank: u8) -> Self {
        self.max_rank = max_rank;
        self
    }

    pub fn with_select(mut self, id: impl Into<String>) -> Self {
        self.select = Some(id.into());
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }
}

/// Options that only affect text exports.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportOptions {
    /// Flowchart direction for Mermaid output
    #[arg(long, value_enum, default_value_t = DiagramDirection::Td)]
    pub direction: DiagramDirection,

    /// Prefix for Mermaid node identifiers (e.g. `n_` for ids starting with a digit)
    #[arg(long = "id-prefix", value_name = "PREFIX")]
    pub id_prefix: Option<String>,

    /// Fixed manifest timestamp, for reproducible package.xml output
    #[arg(long, value_name = "RFC3339")]
    pub timestamp: Option<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: DiagramDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Options controlling how inputs are processed.
#[derive(Args, Debug, Clone, Default)]
pub struct ProcessingOptions {
    /// Process inputs in parallel (output order is still input order).
    #[arg(long)]
    pub parallel: bool,

    /// Flag nodes on a directed cycle when the payload does not.
    #[arg(long = "detect-cycles")]
    pub detect_cycles: bool,
}

impl ProcessingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_detect_cycles(mut self, detect: bool) -> Self {
        self.detect_cycles = detect;
        self
    }
}
