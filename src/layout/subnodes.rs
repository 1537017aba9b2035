//
// Subnode grouping: insert a synthetic intermediate node between a
// category hub and every group of >=2 items sharing that category's
// subcategory, and rewire the edges accordingly.
//
// - Groups of exactly 1 never get a subnode; the item stays on the hub.
// - Idempotent: running on its own output adds nothing. Existing
//   equivalent nodes/edges are checked before every insert.
// - The subnode gets a position hint (midpoint between hub and member
//   centroid); a full placement run overwrites it, so the hint only
//   matters for groups created outside a full rebuild.

use std::collections::HashMap;

use log::warn;

use crate::model::{GraphData, GraphEdge, GraphNode, NodeKind, humanize_slug};

const SUBNODE_SIZE: f64 = 30.0;

pub fn subnode_id(category: &str, subcategory: &str) -> String {
    format!("subnode-{category}-{subcategory}")
}

/// Group same-category/same-subcategory items under synthetic subnodes.
/// Returns a new graph; the input is untouched.
pub fn create_subnodes(graph: &GraphData) -> GraphData {
    let mut nodes = graph.nodes.clone();
    let mut edges = graph.edges.clone();

    // Composite (category, subcategory) -> member item indices, in
    // first-seen order for determinism.
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<usize>> = HashMap::new();
    for (idx, node) in graph.nodes.iter().enumerate() {
        if !node.is_item() {
            continue;
        }
        let (Some(category), Some(subcategory)) = (node.category(), node.subcategory()) else {
            continue;
        };
        let key = (category.to_string(), subcategory.to_string());
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(idx);
    }

    for key in order {
        let members = &groups[&key];
        // Exactly-1 groups stay directly on the hub. The threshold is 2.
        if members.len() < 2 {
            continue;
        }
        let (category, subcategory) = &key;

        let Some(hub) = graph.nodes.iter().find(|n| {
            n.is_category() && n.category() == Some(category.as_str())
        }) else {
            warn!("no hub for category {category:?}, leaving its items ungrouped");
            continue;
        };

        let sub_id = subnode_id(category, subcategory);
        if !nodes.iter().any(|n| n.id == sub_id) {
            let (hub_x, hub_y) = hub.position_or_origin();
            let count = members.len() as f64;
            let (sum_x, sum_y) = members
                .iter()
                .map(|&idx| graph.nodes[idx].position_or_origin())
                .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
            // Midpoint between the hub and the member centroid.
            let hint_x = (hub_x + sum_x / count) / 2.0;
            let hint_y = (hub_y + sum_y / count) / 2.0;

            nodes.push(GraphNode {
                id: sub_id.clone(),
                kind: NodeKind::Subnode {
                    category: category.clone(),
                    subcategory: subcategory.clone(),
                },
                label: humanize_slug(subcategory),
                value: None,
                metadata: HashMap::new(),
                x: Some(hint_x),
                y: Some(hint_y),
                size: SUBNODE_SIZE,
                color: hub.color.clone(),
                item_count: Some(members.len()),
            });
        }

        if !edges.iter().any(|e| e.from == hub.id && e.to == sub_id) {
            edges.push(GraphEdge::new(hub.id.clone(), sub_id.clone()));
        }

        for &idx in members {
            let item_id = &graph.nodes[idx].id;
            edges.retain(|e| !(e.from == hub.id && e.to == *item_id));
            if !edges.iter().any(|e| e.from == sub_id && e.to == *item_id) {
                edges.push(GraphEdge::new(sub_id.clone(), item_id.clone()));
            }
        }
    }

    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ProfileItem, build_graph};

    fn item(category: &str, subcategory: &str, value: &str) -> ProfileItem {
        ProfileItem {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            value: value.to_string(),
            metadata: HashMap::new(),
        }
    }

    fn sports_and_outdoor() -> GraphData {
        build_graph(
            &[
                item("hobbies", "sports", "Tennis"),
                item("hobbies", "sports", "Surfing"),
                item("hobbies", "sports", "Climbing"),
                item("hobbies", "outdoor", "Hiking"),
            ],
            None,
        )
    }

    #[test]
    fn test_group_of_three_gets_one_subnode() {
        let grouped = create_subnodes(&sports_and_outdoor());

        let sub = grouped.node("subnode-hobbies-sports").unwrap();
        assert!(sub.is_subnode());
        assert_eq!(sub.label, "Sports");
        assert_eq!(sub.item_count, Some(3));
        assert_eq!(sub.subcategory(), Some("sports"));

        // Hub feeds the subnode, the subnode feeds exactly the 3 items.
        assert!(grouped.has_edge("category-hobbies", "subnode-hobbies-sports"));
        let children = grouped.children_of("subnode-hobbies-sports");
        assert_eq!(children.len(), 3);
        for child in &children {
            let node = grouped.node(child).unwrap();
            assert_eq!(node.subcategory(), Some("sports"));
        }
    }

    #[test]
    fn test_singleton_group_stays_on_hub() {
        let grouped = create_subnodes(&sports_and_outdoor());

        assert!(grouped.node("subnode-hobbies-outdoor").is_none());
        let hiking = grouped.nodes.iter().find(|n| n.label == "Hiking").unwrap();
        assert!(grouped.has_edge("category-hobbies", &hiking.id));
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let once = create_subnodes(&sports_and_outdoor());
        let twice = create_subnodes(&once);

        assert_eq!(once.nodes.len(), twice.nodes.len());
        assert_eq!(once.edges.len(), twice.edges.len());
        assert_eq!(once.edges, twice.edges);
    }

    #[test]
    fn test_tree_invariant_survives_grouping() {
        let grouped = create_subnodes(&sports_and_outdoor());

        assert_eq!(grouped.edges.len(), grouped.nodes.len() - 1);
        for node in grouped.nodes.iter().filter(|n| !n.is_user()) {
            let incoming = grouped.edges.iter().filter(|e| e.to == node.id).count();
            assert_eq!(incoming, 1, "node {} should have one parent", node.id);
        }
    }

    #[test]
    fn test_same_subcategory_in_different_categories_stays_separate() {
        let graph = build_graph(
            &[
                item("hobbies", "general", "Chess"),
                item("hobbies", "general", "Reading"),
                item("destinations", "general", "Japan"),
                item("destinations", "general", "Iceland"),
            ],
            None,
        );
        let grouped = create_subnodes(&graph);

        assert!(grouped.node("subnode-hobbies-general").is_some());
        assert!(grouped.node("subnode-destinations-general").is_some());
        assert_eq!(grouped.children_of("subnode-hobbies-general").len(), 2);
        assert_eq!(grouped.children_of("subnode-destinations-general").len(), 2);
    }

    #[test]
    fn test_missing_hub_is_skipped_without_crashing() {
        let mut graph = sports_and_outdoor();
        graph.nodes.retain(|n| n.id != "category-hobbies");
        graph.edges.retain(|e| e.from != "category-hobbies");

        let grouped = create_subnodes(&graph);
        assert!(grouped.node("subnode-hobbies-sports").is_none());
    }

    #[test]
    fn test_items_without_subcategory_are_ignored() {
        let graph = build_graph(
            &[item("hobbies", "", "Tennis"), item("hobbies", "", "Surfing")],
            None,
        );
        let grouped = create_subnodes(&graph);
        assert!(grouped.nodes.iter().all(|n| !n.is_subnode()));
        assert_eq!(grouped.edges, graph.edges);
    }

    #[test]
    fn test_subnode_position_hint_is_hub_centroid_midpoint() {
        let mut graph = build_graph(
            &[
                item("hobbies", "sports", "Tennis"),
                item("hobbies", "sports", "Surfing"),
            ],
            None,
        );
        for node in graph.nodes.iter_mut() {
            match node.id.as_str() {
                "category-hobbies" => (node.x, node.y) = (Some(100.0), Some(0.0)),
                "item-0" => (node.x, node.y) = (Some(200.0), Some(40.0)),
                "item-1" => (node.x, node.y) = (Some(200.0), Some(-40.0)),
                _ => {}
            }
        }

        let grouped = create_subnodes(&graph);
        let sub = grouped.node("subnode-hobbies-sports").unwrap();
        assert_eq!(sub.x, Some(150.0));
        assert_eq!(sub.y, Some(0.0));
    }
}
