//
// Builder step: flat item list -> initial (unpositioned) GraphData.
//
// What this does:
// - Creates the single `user` root node
// - Groups items by category in first-seen order (deterministic)
// - Creates one category hub per group, sized by item count
// - Creates item leaves carrying their subcategory in metadata
// - Wires `user -> category` and `category -> item` edges
//
// Assumptions:
// - Input is already deduplicated upstream; this step never merges values.
// - Items with an empty category cannot be attached to a hub; they are
//   skipped with a warning, and never abort the build for their siblings.

use std::collections::HashMap;

use log::warn;
use serde::Deserialize;

use crate::model::{GraphData, GraphEdge, GraphNode, NodeKind, humanize_slug};

/// One categorized preference supplied by the data layer.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileItem {
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub value: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Display defaults for the known preference domains. Unknown categories
/// fall back to a humanized slug and neutral gray.
const CATEGORY_PALETTE: &[(&str, &str, &str)] = &[
    ("travel-style", "Travel Style", "#3b82f6"),
    ("destinations", "Destinations", "#10b981"),
    ("accommodations", "Accommodations", "#8b5cf6"),
    ("travel-preferences", "Travel Preferences", "#06b6d4"),
    ("hobbies", "Hobbies", "#f59e0b"),
    ("spending-priorities", "Spending Priorities", "#ef4444"),
    ("family", "Family", "#ec4899"),
    ("native-language", "Native Language", "#14b8a6"),
    ("other-languages", "Other Languages", "#84cc16"),
    ("other", "Other", "#6b7280"),
];

const FALLBACK_COLOR: &str = "#6b7280";

const USER_NODE_SIZE: f64 = 60.0;
const ITEM_NODE_SIZE: f64 = 20.0;
const HUB_BASE_SIZE: f64 = 40.0;
const HUB_SIZE_PER_ITEM: f64 = 2.0;

pub fn category_label(category: &str) -> String {
    CATEGORY_PALETTE
        .iter()
        .find(|(slug, _, _)| *slug == category)
        .map(|(_, label, _)| (*label).to_string())
        .unwrap_or_else(|| humanize_slug(category))
}

pub fn category_color(category: &str) -> String {
    CATEGORY_PALETTE
        .iter()
        .find(|(slug, _, _)| *slug == category)
        .map(|(_, _, color)| (*color).to_string())
        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
}

pub fn category_node_id(category: &str) -> String {
    format!("category-{category}")
}

/// Build the initial graph from a flat item list. Positions stay unset;
/// the layout passes own them.
pub fn build_graph(items: &[ProfileItem], user_name: Option<&str>) -> GraphData {
    let mut nodes: Vec<GraphNode> = Vec::with_capacity(items.len() + 8);
    let mut edges: Vec<GraphEdge> = Vec::with_capacity(items.len() + 8);

    nodes.push(GraphNode {
        id: "user".to_string(),
        kind: NodeKind::User,
        label: user_name.unwrap_or("You").to_string(),
        value: None,
        metadata: HashMap::new(),
        x: None,
        y: None,
        size: USER_NODE_SIZE,
        color: "#ffffff".to_string(),
        item_count: None,
    });

    // Group by category, preserving first-seen order for determinism.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&ProfileItem>> = HashMap::new();
    for item in items {
        if item.category.is_empty() {
            warn!("skipping item without category: {:?}", item.value);
            continue;
        }
        if !groups.contains_key(item.category.as_str()) {
            order.push(item.category.as_str());
        }
        groups
            .entry(item.category.as_str())
            .or_default()
            .push(item);
    }

    let mut item_seq = 0usize;
    for category in order {
        let members = &groups[category];
        let color = category_color(category);
        let hub_id = category_node_id(category);

        nodes.push(GraphNode {
            id: hub_id.clone(),
            kind: NodeKind::Category {
                category: category.to_string(),
            },
            label: category_label(category),
            value: None,
            metadata: HashMap::new(),
            x: None,
            y: None,
            size: HUB_BASE_SIZE + members.len() as f64 * HUB_SIZE_PER_ITEM,
            color: color.clone(),
            item_count: Some(members.len()),
        });
        edges.push(GraphEdge::new("user", hub_id.clone()));

        for item in members {
            // Upstream records carry a stable id when they come from the
            // store; synthesized items get a running index instead.
            let item_id = item
                .metadata
                .get("id")
                .map(|id| format!("item-{id}"))
                .unwrap_or_else(|| format!("item-{item_seq}"));
            item_seq += 1;

            let mut metadata = item.metadata.clone();
            if !item.subcategory.is_empty() {
                metadata.insert("subcategory".to_string(), item.subcategory.clone());
            }

            nodes.push(GraphNode {
                id: item_id.clone(),
                kind: NodeKind::Item {
                    category: category.to_string(),
                },
                label: item.value.clone(),
                value: Some(item.value.clone()),
                metadata,
                x: None,
                y: None,
                size: ITEM_NODE_SIZE,
                color: color.clone(),
                item_count: None,
            });
            edges.push(GraphEdge::new(hub_id.clone(), item_id));
        }
    }

    GraphData { nodes, edges }
}
