//! Graph payloads read from disk, standing in for the discovery service.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use witu_core::{Edge, Error, Graph, GraphRequest, GraphSource, Node, Result};

/// Answers every request with the graph stored at `path`.
///
/// Like the service it replaces, it ranks unranked nodes, trims nodes beyond
/// `request.max_rank` and records a warning when it trimmed anything. A
/// non-empty `request.root` must name a node in the payload.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    detect_cycles: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            detect_cycles: false,
        }
    }

    pub fn with_detect_cycles(mut self, detect: bool) -> Self {
        self.detect_cycles = detect;
        self
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|err| {
            let path = self.path.display().to_string();
            let error = if err.kind() == io::ErrorKind::NotFound {
                Error::file_not_found(&path)
            } else {
                Error::upstream_fetch_failed(format!("cannot read {path}: {err}"))
                    .with_context("path", path)
            };
            error.with_operation("source::read").set_source(err)
        })
    }
}

impl GraphSource for FileSource {
    fn fetch(&self, request: &GraphRequest) -> Result<Graph> {
        let json = self.read()?;
        let mut graph = Graph::from_json(&json)?
            .with_classified_ranks();

        if !request.root.is_empty() && graph.node(&request.root).is_none() {
            return Err(Error::node_not_found(&request.root).with_operation("source::fetch"));
        }
        if self.detect_cycles {
            graph = graph.with_detected_cycles();
        }

        let bound = u32::from(request.max_rank.get());
        let beyond = graph.nodes().iter().filter(|n| n.layer() > bound).count();
        if beyond == 0 {
            debug!(path = %self.path.display(), nodes = graph.nodes().len(), "payload read");
            return Ok(graph);
        }

        warn!(beyond, bound, "trimming nodes beyond the rank bound");
        let nodes: Vec<Node> = graph
            .nodes()
            .iter()
            .filter(|n| n.layer() <= bound)
            .cloned()
            .collect();
        let edges: Vec<Edge> = graph
            .edges()
            .iter()
            .filter(|e| {
                let dropped = |id: &str| graph.node(id).is_some_and(|n| n.layer() > bound);
                !dropped(&e.source_id) && !dropped(&e.target_id)
            })
            .cloned()
            .collect();

        let mut warnings = graph.warnings().to_vec();
        warnings.push(format!(
            "Depth limit reached: {beyond} components beyond rank {bound} omitted"
        ));
        Ok(Graph::new(nodes, edges).with_warnings(warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witu_core::{ErrorKind, MaxRank};

    fn write(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("graph.json");
        fs::write(&path, json).unwrap();
        path
    }

    const CHAIN: &str = r#"{
        "nodes": [
            {"id": "a", "name": "A", "isRoot": true},
            {"id": "b", "name": "B"},
            {"id": "c", "name": "C"}
        ],
        "edges": [
            {"sourceId": "a", "targetId": "b"},
            {"sourceId": "b", "targetId": "c"},
            {"sourceId": "b", "targetId": "zzz"}
        ]
    }"#;

    #[test]
    fn test_missing_file() {
        let source = FileSource::new("/definitely/not/here.json");
        let err = source
            .fetch(&GraphRequest::new("", MaxRank::default()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_unknown_root() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(write(&dir, CHAIN));
        let err = source
            .fetch(&GraphRequest::new("nope", MaxRank::default()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
    }

    #[test]
    fn test_rank_bound_trims_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(write(&dir, CHAIN));
        let graph = source
            .fetch(&GraphRequest::new("a", MaxRank::new(1).unwrap()))
            .unwrap();
        let ids: Vec<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        // the unresolved edge survives; only edges into trimmed nodes go
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.warnings().len(), 1);
    }

    #[test]
    fn test_not_graph_shaped() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(write(&dir, r#"{"nodes": 42}"#));
        let err = source
            .fetch(&GraphRequest::new("", MaxRank::default()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
    }
}
