use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgGroup, Parser};

use witu::{
    ExportOptions, OutputFormat, ProcessingOptions, RenderOptions, ViewKind, WituOptions,
    run_main, write_output,
};

#[derive(Parser, Debug)]
#[command(
    name = "witu",
    about = "witu: where is this used? Lay out, render and export dependency graphs",
    version,
    group = ArgGroup::new("inputs").required(true).args(["files", "dirs"])
)]
pub struct Cli {
    /// Payload files to load (repeatable)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        num_args = 1..,
        action = clap::ArgAction::Append,
        conflicts_with = "dirs"
    )]
    files: Vec<String>,

    /// Directories to scan recursively for *.json payloads (repeatable)
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        num_args = 1..,
        action = clap::ArgAction::Append,
        conflicts_with = "files"
    )]
    dirs: Vec<String>,

    /// Which view the payloads describe
    #[arg(long, value_enum, default_value_t = ViewKind::BlastRadius)]
    view: ViewKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    #[command(flatten)]
    render: RenderOptions,

    #[command(flatten)]
    export: ExportOptions,

    #[command(flatten)]
    processing: ProcessingOptions,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,
}

pub fn run(args: Cli) -> ExitCode {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = WituOptions {
        files: args.files,
        dirs: args.dirs,
        output: args.output,
        view: args.view,
        format: args.format,
        render: args.render,
        export: args.export,
        processing: args.processing,
    };

    let result = run_main(&opts).and_then(|out| write_output(opts.output.as_deref(), &out));

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "execution failed");
            ExitCode::FAILURE
        }
    }
}

pub fn main() -> ExitCode {
    let args = Cli::parse();
    run(args)
}
