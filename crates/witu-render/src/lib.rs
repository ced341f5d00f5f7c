//! Interactive blast-radius rendering for witu.
//!
//! # Module Structure
//!
//! - [`coordinator`]: message-driven view state, fetch sequencing and render memoization
//! - [`scene`]: drawable marks built from a graph and its layout
//! - [`svg`]: SVG serialization of a scene
//! - [`detail`]: selection detail panel
//! - [`journey`]: three-column data journey panel
//! - [`legend`]: component color legend

pub mod coordinator;
pub mod detail;
pub mod journey;
pub mod legend;
pub mod scene;
pub mod svg;

pub use coordinator::{Command, Coordinator, LoadStatus, Message, RenderKey, ViewState};
pub use detail::{SelectionDetail, access_label};
pub use journey::{Connector, DownstreamEntry, JourneyPanel};
pub use legend::{LegendEntry, legend};
pub use scene::{EdgePath, NodeMark, Scene, node_color};
pub use svg::SvgBuilder;
