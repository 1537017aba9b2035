//! Layout engine for the profile preference graph.
//!
//! Turns a flat collection of categorized preference items into a
//! positioned hub-and-spoke diagram: one `user` node at the center,
//! category hubs on a ring around it, and item leaves (or subnode
//! clusters) fanned around their hubs. Deterministic by construction:
//! identical input produces identical coordinates.
//!
//! The engine is pure geometry over already-validated data. Parsing the
//! item store, deduplication, and rendering all live on the other side
//! of the wasm boundary.

pub mod builder;
pub mod error;
pub mod layout;
pub mod model;
pub mod wasm;

pub use builder::{ProfileItem, build_graph};
pub use error::GraphError;
pub use layout::{LayoutConfig, layout_graph, recalculate_spokes};
pub use model::{GraphData, GraphEdge, GraphNode, NodeKind};
