//
// Incremental recalculation while a hub is dragged.
//
// The dragged hub moves to the pointer; every descendant keeps its angle
// and distance relative to the hub, now measured from the new position.
// Scope is the hub's own subtree: direct children, plus grandchildren
// below subnode children. Never ancestors, never siblings. This runs on
// every drag-move event, so it must stay O(descendants) and never
// re-enter full placement.

use std::collections::HashSet;

use log::debug;

use crate::model::GraphData;

/// Move `hub_id` to (`new_x`, `new_y`) and carry its subtree along.
/// An unknown hub id is a recoverable no-op: the input comes back
/// unchanged (the renderer may race a drag against a rebuild).
pub fn recalculate_spokes(graph: &GraphData, hub_id: &str, new_x: f64, new_y: f64) -> GraphData {
    let mut nodes = graph.nodes.clone();

    let Some(hub_index) = nodes.iter().position(|n| n.id == hub_id) else {
        debug!("recalculate_spokes: hub {hub_id:?} not found, ignoring drag");
        return graph.clone();
    };

    let (old_hub_x, old_hub_y) = nodes[hub_index].position_or_origin();
    nodes[hub_index].x = Some(new_x);
    nodes[hub_index].y = Some(new_y);

    // Direct children, then one more level below subnode children only.
    let mut descendants: HashSet<String> = graph
        .edges
        .iter()
        .filter(|e| e.from == hub_id)
        .map(|e| e.to.clone())
        .collect();

    let subnode_ids: Vec<&String> = descendants
        .iter()
        .filter(|id| graph.node(id.as_str()).is_some_and(|n| n.is_subnode()))
        .collect();
    let grandchildren: Vec<String> = graph
        .edges
        .iter()
        .filter(|e| subnode_ids.iter().any(|id| **id == e.from))
        .map(|e| e.to.clone())
        .collect();
    descendants.extend(grandchildren);

    for node in nodes.iter_mut() {
        if !descendants.contains(&node.id) {
            continue;
        }
        let (old_x, old_y) = node.position_or_origin();
        let relative_angle = (old_y - old_hub_y).atan2(old_x - old_hub_x);
        let relative_distance =
            ((old_x - old_hub_x).powi(2) + (old_y - old_hub_y).powi(2)).sqrt();

        node.x = Some(new_x + relative_angle.cos() * relative_distance);
        node.y = Some(new_y + relative_angle.sin() * relative_distance);
    }

    GraphData {
        nodes,
        edges: graph.edges.clone(),
    }
}
