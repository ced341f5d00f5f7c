//! witu command-line interface.

pub mod discovery;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod source;

use witu_core::Result;

pub use options::{
    DiagramDirection, ExportOptions, OutputFormat, ProcessingOptions, RenderOptions, ViewKind,
};
pub use output::write_output;
pub use pipeline::{process_input, process_inputs};
pub use source::FileSource;

/// Options for one `witu` run.
#[derive(Debug, Clone, Default)]
pub struct WituOptions {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
    pub output: Option<String>,
    pub view: ViewKind,
    pub format: OutputFormat,
    pub render: RenderOptions,
    pub export: ExportOptions,
    pub processing: ProcessingOptions,
}

/// Main entry point: discover inputs, then render or export each of them.
pub fn run_main(opts: &WituOptions) -> Result<String> {
    let inputs = discovery::discover_inputs(opts)?;
    process_inputs(opts, &inputs)
}
