//
// Radial placement: user at the center, category hubs on a ring around
// it, items (or subnode clusters) fanned around their hub.
//
// The node and edge lists are rebuilt from scratch on every run; the
// tree edges are re-derived from node kinds and categories, which keeps
// the output a rooted tree regardless of what the input edge list looked
// like. Items whose category has no hub never make it into the output;
// they are skipped, not fatal (the renderer simply has nothing to draw).
//
// Collision resolution runs per category, right after that category's
// items are fanned out, with everything placed so far as obstacles.
// Unrelated categories therefore never perturb each other.

use std::f64::consts::{PI, TAU};

use crate::model::{GraphData, GraphEdge, GraphNode};

use super::LayoutConfig;
use super::collision::resolve_collisions;

/// Widest fan a hub's direct items may occupy (216 degrees).
const MAX_FAN_SPREAD: f64 = PI * 1.2;

/// Item count past which spokes start lengthening.
const SPOKE_GROWTH_THRESHOLD: usize = 8;

/// Assign a position to every node reachable from a hub and return the
/// fully positioned graph.
pub fn hub_spoke_layout(graph: &GraphData, cfg: &LayoutConfig) -> GraphData {
    let mut nodes: Vec<GraphNode> = Vec::with_capacity(graph.nodes.len());
    let mut edges: Vec<GraphEdge> = Vec::with_capacity(graph.edges.len());

    // 1. User node pinned to the center.
    let user_id = match graph.nodes.iter().find(|n| n.is_user()) {
        Some(user) => {
            let mut user = user.clone();
            user.x = Some(cfg.center_x);
            user.y = Some(cfg.center_y);
            let id = user.id.clone();
            nodes.push(user);
            id
        }
        None => "user".to_string(),
    };

    // 2. Category hubs evenly around the first ring.
    let hubs: Vec<&GraphNode> = graph.nodes.iter().filter(|n| n.is_category()).collect();
    let total_hubs = hubs.len().max(1);

    for (index, category) in hubs.iter().enumerate() {
        let hub_angle = index as f64 / total_hubs as f64 * TAU;
        let hub_x = cfg.center_x + hub_angle.cos() * cfg.hub_radius;
        let hub_y = cfg.center_y + hub_angle.sin() * cfg.hub_radius;

        let mut hub = (*category).clone();
        hub.x = Some(hub_x);
        hub.y = Some(hub_y);
        let hub = hub;

        nodes.push(hub.clone());
        edges.push(GraphEdge::new(user_id.clone(), hub.id.clone()));

        let category_key = hub.category().unwrap_or_default().to_string();
        let category_items: Vec<&GraphNode> = graph
            .nodes
            .iter()
            .filter(|n| n.is_item() && n.category() == Some(category_key.as_str()))
            .collect();
        let item_count = category_items.len();

        // Spokes grow 10% per item past the threshold so crowded
        // categories get more room.
        let dynamic_spoke_length = if item_count > SPOKE_GROWTH_THRESHOLD {
            cfg.spoke_length * (1.0 + (item_count - SPOKE_GROWTH_THRESHOLD) as f64 * 0.1)
        } else {
            cfg.spoke_length
        };

        let subnodes: Vec<&GraphNode> = graph
            .nodes
            .iter()
            .filter(|n| n.is_subnode() && n.category() == Some(category_key.as_str()))
            .collect();

        // Everything finalized before this category's items were placed
        // is an obstacle for its collision pass. Own-category subnodes
        // are deliberately not in this snapshot.
        let obstacles = nodes.clone();
        let mut placed_items: Vec<GraphNode> = Vec::with_capacity(item_count);

        if !subnodes.is_empty() {
            for (sub_index, subnode) in subnodes.iter().enumerate() {
                let subnode_items: Vec<&&GraphNode> = category_items
                    .iter()
                    .filter(|item| item.subcategory() == subnode.subcategory())
                    .collect();

                // Subnodes sit halfway out on their own ring around the hub.
                let subnode_angle =
                    sub_index as f64 / subnodes.len().max(1) as f64 * TAU;
                let subnode_distance = cfg.spoke_length * 0.5;
                let subnode_x = hub_x + subnode_angle.cos() * subnode_distance;
                let subnode_y = hub_y + subnode_angle.sin() * subnode_distance;

                let mut placed_subnode = (*subnode).clone();
                placed_subnode.x = Some(subnode_x);
                placed_subnode.y = Some(subnode_y);
                nodes.push(placed_subnode);
                edges.push(GraphEdge::new(hub.id.clone(), subnode.id.clone()));

                // Items fan around the subnode, centered on its angle.
                for (item_index, item) in subnode_items.iter().enumerate() {
                    let item_angle = subnode_angle
                        + (item_index as f64 - (subnode_items.len() as f64 - 1.0) / 2.0)
                            * cfg.min_spoke_angle.to_radians();
                    let item_x = subnode_x + item_angle.cos() * (cfg.spoke_length * 0.5);
                    let item_y = subnode_y + item_angle.sin() * (cfg.spoke_length * 0.5);

                    let mut placed = (***item).clone();
                    placed.x = Some(item_x);
                    placed.y = Some(item_y);
                    placed_items.push(placed);
                    edges.push(GraphEdge::new(subnode.id.clone(), item.id.clone()));
                }
            }

            // Items matching no subnode fan directly from the hub, past
            // the last subnode's angular slot.
            let leftover: Vec<&&GraphNode> = category_items
                .iter()
                .filter(|item| {
                    !subnodes
                        .iter()
                        .any(|s| s.subcategory() == item.subcategory())
                })
                .collect();

            if !leftover.is_empty() {
                let start_angle =
                    subnodes.len() as f64 / (subnodes.len() + 1).max(1) as f64 * TAU;
                for (item_index, item) in leftover.iter().enumerate() {
                    let item_angle = start_angle
                        + (item_index as f64 - (leftover.len() as f64 - 1.0) / 2.0)
                            * cfg.min_spoke_angle.to_radians();
                    let item_x = hub_x + item_angle.cos() * cfg.spoke_length;
                    let item_y = hub_y + item_angle.sin() * cfg.spoke_length;

                    let mut placed = (***item).clone();
                    placed.x = Some(item_x);
                    placed.y = Some(item_y);
                    placed_items.push(placed);
                    edges.push(GraphEdge::new(hub.id.clone(), item.id.clone()));
                }
            }
        } else {
            // No subnodes: fan everything from the hub, centered on the
            // hub's own angle from the user, capped spread.
            let spread = (item_count as f64 * cfg.min_spoke_angle.to_radians())
                .min(MAX_FAN_SPREAD);
            let step = spread / (item_count.saturating_sub(1)).max(1) as f64;

            for (item_index, item) in category_items.iter().enumerate() {
                let item_angle =
                    hub_angle + (item_index as f64 - (item_count as f64 - 1.0) / 2.0) * step;
                let item_x = hub_x + item_angle.cos() * dynamic_spoke_length;
                let item_y = hub_y + item_angle.sin() * dynamic_spoke_length;

                let mut placed = (**item).clone();
                placed.x = Some(item_x);
                placed.y = Some(item_y);
                placed_items.push(placed);
                edges.push(GraphEdge::new(hub.id.clone(), item.id.clone()));
            }
        }

        nodes.extend(resolve_collisions(placed_items, &hub, &obstacles, cfg));
    }

    GraphData { nodes, edges }
}
