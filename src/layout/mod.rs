//
// Hub-and-spoke layout for the profile graph.
//
// Goals:
// - Deterministic: no randomness, identical input -> identical coordinates
// - Single-pass radial placement with a bounded local-relaxation pass,
//   not a global energy minimizer
// - Immutable in, fresh out: every pass returns a new GraphData
//
// Submodules:
// - subnodes: groups >=2 same-category/same-subcategory items under a
//   synthetic intermediate node
// - radial: places user/hubs/subnodes/items on concentric rings
// - collision: iteration-capped outward relaxation of overlapping items
// - drag: incremental subtree repositioning while a hub is dragged
//
// A fresh layout flows grouping -> placement -> collision; dragging
// re-enters at `drag` only.

use serde::{Deserialize, Serialize};

mod collision;
mod drag;
mod radial;
mod subnodes;

pub use collision::resolve_collisions;
pub use drag::recalculate_spokes;
pub use radial::hub_spoke_layout;
pub use subnodes::create_subnodes;

use crate::model::GraphData;

/// Tuning knobs for the radial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub center_x: f64,
    pub center_y: f64,
    /// Distance of category hubs from the user node.
    pub hub_radius: f64,
    /// Base length of spokes from hub to item.
    pub spoke_length: f64,
    /// Minimum angle between adjacent spokes, in degrees.
    pub min_spoke_angle: f64,
    /// Minimum space between an item and nodes of other categories.
    pub min_node_spacing: f64,
    /// Minimum space between item nodes of the same category.
    pub item_spacing: f64,
    pub enable_collision_detection: bool,
    /// Cap on collision-resolution rounds per category.
    pub max_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            hub_radius: 300.0,
            spoke_length: 180.0,
            min_spoke_angle: 20.0,
            min_node_spacing: 100.0,
            item_spacing: 80.0,
            enable_collision_detection: true,
            max_iterations: 10,
        }
    }
}

impl LayoutConfig {
    /// Derive a config from the available canvas area so the diagram
    /// scales with viewport size. Hub ring takes 25% of the smaller
    /// dimension, spokes 15%; everything else keeps its default.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        let min_dimension = width.min(height);
        Self {
            hub_radius: min_dimension * 0.25,
            spoke_length: min_dimension * 0.15,
            ..Self::default()
        }
    }
}

/// Full rebuild: subnode grouping, then radial placement with the
/// per-category collision pass. The input graph is left untouched.
pub fn layout_graph(graph: &GraphData, cfg: &LayoutConfig) -> GraphData {
    let grouped = create_subnodes(graph);
    hub_spoke_layout(&grouped, cfg)
}
