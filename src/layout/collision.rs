//
// Collision resolution: bounded local relaxation over one category's
// freshly placed items.
//
// Colliding items are pushed further out from their hub along their
// current angular direction, so the radial structure survives. This is
// best-effort, not a convergence proof: pathological inputs (items
// stacked on the exact same spoke) can exhaust the iteration cap with
// residual overlap, and that is accepted.

use crate::model::GraphNode;

use super::LayoutConfig;

/// True when two positioned nodes sit closer than `min_spacing`.
fn nodes_collide(a: &GraphNode, b: &GraphNode, min_spacing: f64) -> bool {
    let (ax, ay) = a.position_or_origin();
    let (bx, by) = b.position_or_origin();
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt() < min_spacing
}

/// Move `item` outward from the hub by `step`, keeping its angle.
fn push_outward(item: &mut GraphNode, hub_x: f64, hub_y: f64, step: f64) {
    let (x, y) = item.position_or_origin();
    let angle = (y - hub_y).atan2(x - hub_x);
    let distance = ((x - hub_x).powi(2) + (y - hub_y).powi(2)).sqrt();
    let new_distance = distance + step;
    item.x = Some(hub_x + angle.cos() * new_distance);
    item.y = Some(hub_y + angle.sin() * new_distance);
}

/// Relax `items` until no pair is closer than `item_spacing` and no item
/// is closer than `min_node_spacing` to an obstacle, or the iteration cap
/// is hit. `obstacles` are the nodes finalized before this category was
/// placed; the hub itself is never treated as an obstacle. Disabled
/// collision detection is a pass-through.
pub fn resolve_collisions(
    items: Vec<GraphNode>,
    hub: &GraphNode,
    obstacles: &[GraphNode],
    cfg: &LayoutConfig,
) -> Vec<GraphNode> {
    if !cfg.enable_collision_detection || items.is_empty() {
        return items;
    }

    let (hub_x, hub_y) = hub.position_or_origin();
    let mut items = items;
    let mut iteration = 0;

    while iteration < cfg.max_iterations {
        let mut has_collision = false;

        for i in 0..items.len() {
            // Against siblings in this category.
            for j in 0..items.len() {
                if i == j {
                    continue;
                }
                if nodes_collide(&items[i], &items[j], cfg.item_spacing) {
                    has_collision = true;
                    push_outward(&mut items[i], hub_x, hub_y, cfg.item_spacing * 0.2);
                }
            }

            // Against already-finalized nodes from other categories.
            for other in obstacles {
                if other.id == items[i].id || other.id == hub.id {
                    continue;
                }
                if nodes_collide(&items[i], other, cfg.min_node_spacing) {
                    has_collision = true;
                    push_outward(&mut items[i], hub_x, hub_y, cfg.min_node_spacing * 0.15);
                }
            }
        }

        if !has_collision {
            break;
        }
        iteration += 1;
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;
    use std::collections::HashMap;

    fn node(id: &str, kind: NodeKind, x: f64, y: f64) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            kind,
            label: id.to_string(),
            value: None,
            metadata: HashMap::new(),
            x: Some(x),
            y: Some(y),
            size: 20.0,
            color: "#6b7280".to_string(),
            item_count: None,
        }
    }

    fn hub_at(x: f64, y: f64) -> GraphNode {
        node(
            "category-hobbies",
            NodeKind::Category {
                category: "hobbies".to_string(),
            },
            x,
            y,
        )
    }

    fn item_at(id: &str, x: f64, y: f64) -> GraphNode {
        node(
            id,
            NodeKind::Item {
                category: "hobbies".to_string(),
            },
            x,
            y,
        )
    }

    fn distance(a: &GraphNode, b: &GraphNode) -> f64 {
        let (ax, ay) = a.position_or_origin();
        let (bx, by) = b.position_or_origin();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    #[test]
    fn test_disabled_detection_is_a_pass_through() {
        let cfg = LayoutConfig {
            enable_collision_detection: false,
            ..LayoutConfig::default()
        };
        let items = vec![item_at("a", 10.0, 0.0), item_at("b", 10.0, 0.0)];
        let resolved = resolve_collisions(items.clone(), &hub_at(0.0, 0.0), &[], &cfg);
        assert_eq!(resolved, items);
    }

    #[test]
    fn test_overlapping_items_on_distinct_spokes_separate() {
        let cfg = LayoutConfig::default();
        let hub = hub_at(0.0, 0.0);
        // Colliding, but on diverging angles from the hub, so outward
        // pushes separate them within the iteration budget.
        let theta = std::f64::consts::PI / 8.0;
        let items = vec![
            item_at("a", 90.0 * theta.cos(), 90.0 * theta.sin()),
            item_at("b", 90.0 * theta.cos(), -90.0 * theta.sin()),
        ];
        assert!(distance(&items[0], &items[1]) < cfg.item_spacing);

        let resolved = resolve_collisions(items, &hub, &[], &cfg);
        assert!(distance(&resolved[0], &resolved[1]) >= cfg.item_spacing);
    }

    #[test]
    fn test_identical_coordinates_hit_the_cap_not_a_crash() {
        let cfg = LayoutConfig::default();
        let hub = hub_at(0.0, 0.0);
        // Same spoke, same position: outward pushes can never separate
        // them, so the loop must stop at max_iterations.
        let items = vec![item_at("a", 120.0, 0.0), item_at("b", 120.0, 0.0)];
        let resolved = resolve_collisions(items, &hub, &[], &cfg);

        let d = distance(&resolved[0], &resolved[1]);
        // Each round pushes both items by the same step along the same
        // angle; residual overlap after the cap is the accepted outcome.
        assert!(d < cfg.item_spacing);
        // Bounded work: max_iterations rounds of item_spacing * 0.2 per
        // collision pair puts a hard ceiling on how far anything moved.
        let max_travel = cfg.max_iterations as f64 * cfg.item_spacing * 0.2 * 2.0;
        assert!(resolved[0].x.unwrap() - 120.0 <= max_travel);
    }

    #[test]
    fn test_item_is_pushed_away_from_foreign_node() {
        let cfg = LayoutConfig::default();
        let hub = hub_at(0.0, 0.0);
        let foreign = node(
            "category-destinations",
            NodeKind::Category {
                category: "destinations".to_string(),
            },
            180.0,
            0.0,
        );
        let items = vec![item_at("a", 160.0, 0.0)];
        let resolved = resolve_collisions(items, &hub, &[foreign.clone()], &cfg);

        assert!(distance(&resolved[0], &foreign) >= cfg.min_node_spacing);
        // Push direction is outward from the hub, so the angle (here 0)
        // is preserved.
        assert_eq!(resolved[0].y, Some(0.0));
        assert!(resolved[0].x.unwrap() > 160.0);
    }

    #[test]
    fn test_hub_in_obstacle_list_is_ignored() {
        let cfg = LayoutConfig::default();
        let hub = hub_at(0.0, 0.0);
        // Item well inside min_node_spacing of its own hub must not move.
        let items = vec![item_at("a", 60.0, 0.0)];
        let resolved = resolve_collisions(items, &hub, &[hub.clone()], &cfg);
        assert_eq!(resolved[0].x, Some(60.0));
        assert_eq!(resolved[0].y, Some(0.0));
    }
}
