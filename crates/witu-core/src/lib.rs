//! Graph model, rank classification and layered layout for witu.
//!
//! # Module Structure
//!
//! - [`model`]: nodes, edges and the immutable [`Graph`] response
//! - [`index`]: id lookups attached to each graph
//! - [`kind`]: component kinds and their palette
//! - [`rank`]: hop-distance classification and cycle detection
//! - [`layout`]: rank-column / alphabetical-row placement
//! - [`view`]: payloads of the list, journey and process-flow views
//! - [`source`]: the discovery service boundary

pub mod index;
pub mod kind;
pub mod layout;
pub mod model;
pub mod rank;
pub mod source;
pub mod view;

pub use index::GraphIndex;
pub use kind::{ComponentKind, JourneyNodeKind};
pub use layout::{Layout, Point, layout, layout_many};
pub use model::{
    Direction, Edge, Graph, GraphRequest, GraphStats, MaxRank, Node, Relationship,
};
pub use rank::{UNREACHABLE_RANK, classify_ranks, cycle_members};
pub use source::GraphSource;
pub use view::{
    AutomationStep, DependencyGroup, DependencyRecord, DependencyReport, JourneyResponse, Phase,
    ProcessFlow, ProcessFlowStats, SearchContext,
};
pub use witu_error::{Error, ErrorKind, ErrorStatus, Result};
