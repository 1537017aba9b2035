//! WASM bindings for the profile-graph-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Every entry point takes and returns JSON strings; malformed input
//! degrades to an `{"error": …}` payload plus a console error, never a
//! panic across the boundary.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::builder::{ProfileItem, build_graph};
use crate::error::GraphError;
use crate::layout::{LayoutConfig, layout_graph, recalculate_spokes};
use crate::model::GraphData;

/// Set up the log facade and panic hook once per wasm instance.
#[wasm_bindgen(start)]
pub fn init() {
    let _ = console_log::init_with_level(log::Level::Info);
    console_error_panic_hook::set_once();
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: String,
}

fn error_json(err: &GraphError) -> String {
    log::error!("{err}");
    serde_json::to_string(&ErrorOutput {
        error: err.to_string(),
    })
    .unwrap_or_else(|_| "{\"error\": \"internal error\"}".to_string())
}

fn graph_json(graph: &GraphData) -> Result<String, GraphError> {
    serde_json::to_string(graph).map_err(GraphError::Serialize)
}

fn config_for(width: f64, height: f64) -> LayoutConfig {
    if width > 0.0 && height > 0.0 {
        LayoutConfig::for_canvas(width, height)
    } else {
        LayoutConfig::default()
    }
}

/// Build and lay out a graph from a flat JSON item list
/// (`[{ "category", "subcategory", "value", "metadata" }, …]`).
/// Pass zero width/height to use the default canvas-independent config.
#[wasm_bindgen]
pub fn build_profile_graph(
    items_json: &str,
    user_name: Option<String>,
    width: f64,
    height: f64,
) -> String {
    let result = (|| {
        let items: Vec<ProfileItem> =
            serde_json::from_str(items_json).map_err(GraphError::InvalidItems)?;
        let graph = build_graph(&items, user_name.as_deref());
        graph_json(&layout_graph(&graph, &config_for(width, height)))
    })();

    match result {
        Ok(json) => json,
        Err(err) => error_json(&err),
    }
}

/// Re-run grouping + placement on an existing graph JSON, e.g. after the
/// underlying item list changed.
#[wasm_bindgen]
pub fn relayout_graph(graph_json_in: &str, width: f64, height: f64) -> String {
    let result = (|| {
        let graph: GraphData =
            serde_json::from_str(graph_json_in).map_err(GraphError::InvalidGraph)?;
        graph_json(&layout_graph(&graph, &config_for(width, height)))
    })();

    match result {
        Ok(json) => json,
        Err(err) => error_json(&err),
    }
}

/// Drag-move handler: move `hub_id` to the pointer and carry its subtree
/// along without re-running placement.
#[wasm_bindgen]
pub fn recalculate_hub_spokes(graph_json_in: &str, hub_id: &str, x: f64, y: f64) -> String {
    let result = (|| {
        let graph: GraphData =
            serde_json::from_str(graph_json_in).map_err(GraphError::InvalidGraph)?;
        graph_json(&recalculate_spokes(&graph, hub_id, x, y))
    })();

    match result {
        Ok(json) => json,
        Err(err) => error_json(&err),
    }
}

/// Resolve the layout config the engine would use for a canvas size, so
/// the renderer can mirror distances (e.g. for zoom-to-fit).
#[wasm_bindgen]
pub fn layout_config_for_canvas(width: f64, height: f64) -> String {
    serde_json::to_string(&config_for(width, height))
        .unwrap_or_else(|_| "{\"error\": \"internal error\"}".to_string())
}
