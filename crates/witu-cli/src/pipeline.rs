//! Per-input pipeline: load -> classify -> render or export.

use std::fs;
use std::time::Instant;

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use witu_core::{
    DependencyReport, Error, ErrorKind, Graph, GraphRequest, GraphSource, JourneyResponse,
    MaxRank, ProcessFlow, Result, layout,
};
use witu_export::{Exporter, ViewData};
use witu_render::{Command, Coordinator, JourneyPanel, LoadStatus, Message, Scene};

use crate::source::FileSource;
use crate::{OutputFormat, ViewKind, WituOptions};

/// Process every input and join the results in input order.
pub fn process_inputs(opts: &WituOptions, inputs: &[String]) -> Result<String> {
    let start = Instant::now();
    let outputs: Vec<String> = if opts.processing.parallel {
        inputs
            .par_iter()
            .map(|path| process_input(opts, path))
            .collect::<Result<_>>()?
    } else {
        inputs
            .iter()
            .map(|path| process_input(opts, path))
            .collect::<Result<_>>()?
    };
    info!(
        "Processed {} inputs: {:.2}s",
        inputs.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(outputs.join("\n"))
}

/// Render or export a single payload file.
pub fn process_input(opts: &WituOptions, path: &str) -> Result<String> {
    let max_rank = MaxRank::new(opts.render.max_rank)?;
    let source = FileSource::new(path).with_detect_cycles(opts.processing.detect_cycles);

    match (opts.view, opts.format) {
        (ViewKind::BlastRadius, OutputFormat::Svg) => render_blast_radius(opts, &source, max_rank),
        (ViewKind::Journey, OutputFormat::Svg) => {
            let response: JourneyResponse = decode(path)?;
            let start = Instant::now();
            let svg = JourneyPanel::build(&response.graph).to_svg();
            info!("Journey render: {:.2}s", start.elapsed().as_secs_f64());
            Ok(svg)
        }
        (view, OutputFormat::Svg) => Err(Error::unsupported(format!(
            "svg output is not available for the {view:?} view"
        ))
        .with_operation("pipeline::process_input")),
        (view, format) => {
            let Some(export_format) = format.export_format() else {
                return Err(Error::unexpected("no export format for output")
                    .with_operation("pipeline::process_input"));
            };
            let data = match view {
                ViewKind::BlastRadius => {
                    let request = GraphRequest::new(root_of(opts), max_rank);
                    ViewData::BlastRadius(source.fetch(&request)?)
                }
                ViewKind::Journey => ViewData::Journey(decode(path)?),
                ViewKind::Dependencies => ViewData::Dependencies(decode::<DependencyReport>(path)?),
                ViewKind::ProcessFlow => ViewData::ProcessFlow(decode::<ProcessFlow>(path)?),
            };

            let mut exporter = Exporter::new()
                .with_max_rank(max_rank)
                .with_direction(opts.export.direction.into());
            if let Some(prefix) = &opts.export.id_prefix {
                exporter = exporter.with_id_prefix(prefix.as_str());
            }
            if let Some(timestamp) = &opts.export.timestamp {
                exporter = exporter.with_generated_at(timestamp.clone());
            }
            Ok(exporter.export(&data, export_format)?.body)
        }
    }
}

fn root_of(opts: &WituOptions) -> String {
    opts.render.root.clone().unwrap_or_default()
}

/// Drive the coordinator through one search and draw the resulting scene.
fn render_blast_radius(opts: &WituOptions, source: &FileSource, max_rank: MaxRank) -> Result<String> {
    let mut coordinator = Coordinator::new().with_viewport_width(opts.render.viewport_width);

    let request = GraphRequest::new(root_of(opts), max_rank);
    let command = coordinator.update(Message::Search(request))?;
    coordinator.fulfil(source, command)?;

    match coordinator.status() {
        LoadStatus::Ready => {}
        LoadStatus::Empty => {
            warn!("graph has no nodes");
            let empty = Graph::default();
            let scene = Scene::build(&empty, &layout(empty.nodes()), None, 1.0, opts.render.viewport_width);
            return Ok(scene.to_svg());
        }
        LoadStatus::Failed(message) => {
            return Err(Error::upstream_fetch_failed(message.clone())
                .with_operation("pipeline::render_blast_radius"));
        }
        LoadStatus::Idle | LoadStatus::Loading => {
            return Err(Error::unexpected("graph was not loaded")
                .with_operation("pipeline::render_blast_radius"));
        }
    }

    if let Some(id) = &opts.render.select {
        if coordinator.update(Message::SelectNode(id.clone()))? == Command::None {
            return Err(Error::node_not_found(id).with_operation("pipeline::select"));
        }
    }
    if let Some(detail) = coordinator.selected_detail() {
        info!(
            id = %detail.id,
            kind = %detail.type_label,
            relationship = %detail.relationship_summary,
            "selected {}",
            detail.name
        );
    }
    if let Some(zoom) = opts.render.zoom {
        coordinator.update(Message::SetZoom(zoom))?;
    }

    let start = Instant::now();
    let scene = coordinator.render().ok_or_else(|| {
        Error::unexpected("nothing to draw").with_operation("pipeline::render_blast_radius")
    })?;
    info!(
        "Scene render: {:.2}s ({} nodes, {} edges)",
        start.elapsed().as_secs_f64(),
        scene.nodes.len(),
        scene.edges.len()
    );
    Ok(scene.to_svg())
}

/// Decode a non-graph view payload.
fn decode<T: DeserializeOwned>(path: &str) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|err| {
        let error = if err.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path)
        } else {
            Error::new(ErrorKind::IoFailed, format!("cannot read {path}: {err}"))
        };
        error.with_operation("pipeline::decode").set_source(err)
    })?;
    serde_json::from_str(&json).map_err(|err| {
        Error::deserialization_failed(format!("{path} is not a valid payload: {err}"))
            .with_operation("pipeline::decode")
            .set_source(err)
    })
}
