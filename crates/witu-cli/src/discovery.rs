//! Input discovery for witu.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::info;

use witu_core::{Error, ErrorKind, Result};

use crate::WituOptions;

/// Directories that never hold payloads worth loading.
fn should_skip_dir(name: &str) -> bool {
    matches!(name, "target" | "node_modules" | ".sfdx" | ".sf")
}

fn is_payload(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Collect input files: explicit files first, in the order given, then the
/// `*.json` files under each directory, sorted per directory.
pub fn discover_inputs(opts: &WituOptions) -> Result<Vec<String>> {
    let discovery_start = Instant::now();

    let mut seen = HashSet::new();
    let mut inputs = Vec::new();
    let mut add_path = |path: String| {
        if seen.insert(path.clone()) {
            inputs.push(path);
        }
    };

    for file in &opts.files {
        if !Path::new(file).is_file() {
            return Err(Error::file_not_found(file).with_operation("discovery::discover_inputs"));
        }
        add_path(file.clone());
    }

    for dir in &opts.dirs {
        if !Path::new(dir).is_dir() {
            return Err(Error::file_not_found(dir).with_operation("discovery::discover_inputs"));
        }

        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(true)
            .follow_links(false)
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let Some(name) = entry.file_name().to_str() else {
                    return true;
                };
                !(is_dir && should_skip_dir(&name.to_ascii_lowercase()))
            });

        let mut found = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|err| {
                Error::new(
                    ErrorKind::TraversalFailed,
                    format!("failed to walk directory {dir}: {err}"),
                )
                .with_operation("discovery::discover_inputs")
                .set_source(err)
            })?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if is_payload(entry.path()) {
                found.push(entry.path().to_string_lossy().into_owned());
            }
        }
        found.sort();
        for path in found {
            add_path(path);
        }
    }

    info!(
        "Input discovery: {:.2}s ({} files)",
        discovery_start.elapsed().as_secs_f64(),
        inputs.len()
    );

    if inputs.is_empty() {
        return Err(Error::invalid_argument(
            "no input files found; directories must contain *.json payloads",
        )
        .with_operation("discovery::discover_inputs"));
    }

    Ok(inputs)
}
