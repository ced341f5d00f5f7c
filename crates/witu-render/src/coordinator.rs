//! Event-driven state owner for the blast-radius view.
//!
//! Everything funnels through [`Coordinator::update`]. The only asynchronous
//! step, fetching a graph, is handed back to the host as [`Command::Fetch`];
//! the host answers with [`Message::Loaded`] or [`Message::FetchFailed`]
//! carrying the same sequence number. Answers to anything but the latest
//! fetch are dropped.

use std::time::Instant;

use tracing::{debug, info, warn};

use witu_core::{Graph, GraphRequest, GraphSource, Layout, MaxRank, layout};
use witu_error::{Error, Result};

use crate::detail::SelectionDetail;
use crate::scene::{Scene, effective_scale};

pub const ZOOM_STEP: f64 = 1.25;
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;

#[derive(Debug)]
pub enum Message {
    Search(GraphRequest),
    ChangeMaxRank(MaxRank),
    Loaded { seq: u64, graph: Graph },
    FetchFailed { seq: u64, error: Error },
    SelectNode(String),
    ClearSelection,
    ZoomIn,
    ZoomOut,
    SetZoom(f64),
    ZoomFit,
    Resize(f64),
}

/// What the host should do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Fetch { seq: u64, request: GraphRequest },
    Redraw,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The service answered with zero nodes.
    Empty,
    Failed(String),
}

/// Everything that invalidates a drawn scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderKey {
    pub selected: Option<String>,
    zoom_bits: u64,
    pub node_count: usize,
    pub edge_count: usize,
    viewport_bits: u64,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub selected_node_id: Option<String>,
    pub zoom_factor: f64,
    pub last_render_key: Option<RenderKey>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_node_id: None,
            zoom_factor: 1.0,
            last_render_key: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Coordinator {
    view: ViewState,
    graph: Option<Graph>,
    layout: Option<Layout>,
    status: LoadStatus,
    viewport_width: f64,
    root: Option<String>,
    max_rank: MaxRank,
    last_seq: u64,
    pending: Option<u64>,
    version: u64,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width.max(0.0);
        self
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn max_rank(&self) -> MaxRank {
        self.max_rank
    }

    /// Load generation, bumped on every accepted graph.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn update(&mut self, message: Message) -> Result<Command> {
        match message {
            Message::Search(request) => {
                self.root = Some(request.root.clone());
                self.max_rank = request.max_rank;
                Ok(self.start_fetch(request))
            }
            Message::ChangeMaxRank(max_rank) => {
                self.max_rank = max_rank;
                match self.root.clone() {
                    Some(root) => Ok(self.start_fetch(GraphRequest::new(root, max_rank))),
                    None => Ok(Command::None),
                }
            }
            Message::Loaded { seq, graph } => {
                if self.pending != Some(seq) {
                    debug!(seq, latest = self.last_seq, "discarding stale response");
                    return Ok(Command::None);
                }
                self.pending = None;
                self.accept(graph);
                Ok(Command::Redraw)
            }
            Message::FetchFailed { seq, error } => {
                if self.pending != Some(seq) {
                    debug!(seq, latest = self.last_seq, "discarding stale failure");
                    return Ok(Command::None);
                }
                self.pending = None;
                warn!(seq, error = %error, "fetch failed");
                self.clear_model();
                self.status = LoadStatus::Failed(error.message().to_string());
                Ok(Command::Redraw)
            }
            Message::SelectNode(id) => {
                let Some(graph) = &self.graph else {
                    return Ok(Command::None);
                };
                if !graph.index().contains(&id) {
                    debug!(%id, "ignoring selection of unknown node");
                    return Ok(Command::None);
                }
                self.view.selected_node_id = Some(id);
                Ok(Command::Redraw)
            }
            Message::ClearSelection => {
                self.view.selected_node_id = None;
                Ok(Command::Redraw)
            }
            Message::ZoomIn => self.zoom_to(self.view.zoom_factor * ZOOM_STEP),
            Message::ZoomOut => self.zoom_to(self.view.zoom_factor / ZOOM_STEP),
            Message::SetZoom(factor) => {
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(Error::invalid_argument(format!(
                        "zoom must be a positive number, got {factor}"
                    ))
                    .with_operation("coordinator::set_zoom"));
                }
                self.zoom_to(factor)
            }
            Message::ZoomFit => self.zoom_to(1.0),
            Message::Resize(width) => {
                if !width.is_finite() || width < 0.0 {
                    return Err(Error::invalid_argument(format!(
                        "viewport width must be non-negative, got {width}"
                    ))
                    .with_operation("coordinator::resize"));
                }
                self.viewport_width = width;
                Ok(Command::Redraw)
            }
        }
    }

    /// Run a fetch command against `source` and feed the answer back in.
    ///
    /// Other commands are returned untouched.
    pub fn fulfil(&mut self, source: &impl GraphSource, command: Command) -> Result<Command> {
        let Command::Fetch { seq, request } = command else {
            return Ok(command);
        };
        let message = match source.fetch(&request) {
            Ok(graph) => Message::Loaded { seq, graph },
            Err(error) => Message::FetchFailed { seq, error },
        };
        self.update(message)
    }

    pub fn render_key(&self) -> Option<RenderKey> {
        let graph = self.graph.as_ref()?;
        Some(RenderKey {
            selected: self.view.selected_node_id.clone(),
            zoom_bits: self.view.zoom_factor.to_bits(),
            node_count: graph.nodes().len(),
            edge_count: graph.edges().len(),
            viewport_bits: self.viewport_width.to_bits(),
            version: self.version,
        })
    }

    /// Build a fresh scene, or `None` when nothing changed since the last one
    /// or there is nothing to draw.
    pub fn render(&mut self) -> Option<Scene> {
        let key = self.render_key()?;
        let (graph, layout) = (self.graph.as_ref()?, self.layout.as_ref()?);
        if graph.is_empty() || self.view.last_render_key.as_ref() == Some(&key) {
            return None;
        }

        let start = Instant::now();
        let scale = effective_scale(self.view.zoom_factor, self.viewport_width, layout.width);
        let scene = Scene::build(
            graph,
            layout,
            self.view.selected_node_id.as_deref(),
            scale,
            self.viewport_width,
        );
        self.view.last_render_key = Some(key);
        debug!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            scale,
            elapsed = ?start.elapsed(),
            "scene built"
        );
        Some(scene)
    }

    pub fn effective_scale(&self) -> f64 {
        let layout_width = self.layout.as_ref().map_or(0.0, |l| l.width);
        effective_scale(self.view.zoom_factor, self.viewport_width, layout_width)
    }

    pub fn selected_detail(&self) -> Option<SelectionDetail> {
        let graph = self.graph.as_ref()?;
        let id = self.view.selected_node_id.as_deref()?;
        SelectionDetail::for_node(graph, id)
    }

    fn start_fetch(&mut self, request: GraphRequest) -> Command {
        self.last_seq += 1;
        let seq = self.last_seq;
        self.pending = Some(seq);
        self.clear_model();
        self.status = LoadStatus::Loading;
        info!(seq, root = %request.root, max_rank = request.max_rank.get(), "fetching graph");
        Command::Fetch { seq, request }
    }

    fn accept(&mut self, graph: Graph) {
        let roots = graph.nodes().iter().filter(|n| n.is_root).count();
        if roots > 1 {
            warn!(roots, "several nodes marked as root, using the first");
        }

        let start = Instant::now();
        let graph = graph.with_classified_ranks();
        let layout = layout(graph.nodes());
        info!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            warnings = graph.warnings().len(),
            "graph loaded in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        self.version += 1;
        self.view = ViewState {
            selected_node_id: graph.root_id().map(str::to_string),
            ..ViewState::default()
        };
        self.status = if graph.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ready
        };
        self.layout = Some(layout);
        self.graph = Some(graph);
    }

    fn clear_model(&mut self) {
        self.graph = None;
        self.layout = None;
        self.view = ViewState::default();
    }

    fn zoom_to(&mut self, factor: f64) -> Result<Command> {
        self.view.zoom_factor = factor.clamp(MIN_ZOOM, MAX_ZOOM);
        Ok(Command::Redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witu_core::{Edge, Node};
    use witu_error::ErrorKind;

    fn small() -> Graph {
        Graph::new(
            vec![
                Node::new("a", "Root").with_rank(0).root(),
                Node::new("b", "Beta").with_rank(1),
            ],
            vec![Edge::new("a", "b")],
        )
    }

    fn loaded() -> Coordinator {
        let mut c = Coordinator::new().with_viewport_width(1200.0);
        let cmd = c
            .update(Message::Search(GraphRequest::new("a", MaxRank::default())))
            .unwrap();
        let Command::Fetch { seq, .. } = cmd else {
            panic!("expected fetch, got {cmd:?}");
        };
        c.update(Message::Loaded { seq, graph: small() }).unwrap();
        c
    }

    #[test]
    fn test_search_clears_and_loads() {
        let mut c = loaded();
        assert_eq!(c.status(), &LoadStatus::Ready);
        assert_eq!(c.view().selected_node_id.as_deref(), Some("a"));

        let cmd = c.update(Message::ChangeMaxRank(MaxRank::new(5).unwrap())).unwrap();
        assert!(matches!(cmd, Command::Fetch { seq: 2, .. }));
        assert_eq!(c.status(), &LoadStatus::Loading);
        assert!(c.graph().is_none());
        assert!(c.render().is_none());
    }

    #[test]
    fn test_change_max_rank_without_search() {
        let mut c = Coordinator::new();
        let cmd = c.update(Message::ChangeMaxRank(MaxRank::new(2).unwrap())).unwrap();
        assert_eq!(cmd, Command::None);
        assert_eq!(c.max_rank().get(), 2);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut c = loaded();
        for _ in 0..20 {
            c.update(Message::ZoomIn).unwrap();
        }
        assert_eq!(c.view().zoom_factor, MAX_ZOOM);
        for _ in 0..20 {
            c.update(Message::ZoomOut).unwrap();
        }
        assert_eq!(c.view().zoom_factor, MIN_ZOOM);
        c.update(Message::ZoomFit).unwrap();
        assert_eq!(c.view().zoom_factor, 1.0);
    }

    #[test]
    fn test_set_zoom_rejects_bad_values() {
        let mut c = loaded();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = c.update(Message::SetZoom(bad)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        c.update(Message::SetZoom(2.0)).unwrap();
        assert_eq!(c.view().zoom_factor, 2.0);
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        let mut c = loaded();
        let cmd = c.update(Message::SelectNode("nope".into())).unwrap();
        assert_eq!(cmd, Command::None);
        assert_eq!(c.view().selected_node_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_effective_scale_uses_viewport() {
        let mut c = loaded();
        // layout width = 140 + 180 + 220 = 540
        assert_eq!(c.effective_scale(), 1.0);
        c.update(Message::Resize(270.0)).unwrap();
        assert_eq!(c.effective_scale(), 0.5);
        c.update(Message::Resize(0.0)).unwrap();
        assert_eq!(c.effective_scale(), 1.0);
    }

    #[test]
    fn test_fetch_failure_sets_status() {
        let mut c = Coordinator::new();
        let cmd = c
            .update(Message::Search(GraphRequest::new("a", MaxRank::default())))
            .unwrap();
        let failing = |_: &GraphRequest| -> Result<Graph> {
            Err(Error::upstream_fetch_failed("service unavailable"))
        };
        c.fulfil(&failing, cmd).unwrap();
        assert_eq!(
            c.status(),
            &LoadStatus::Failed("service unavailable".to_string())
        );
        assert!(c.graph().is_none());
    }
}
