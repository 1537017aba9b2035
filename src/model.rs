//
// Graph data model: the typed containers every layout pass reads and writes.
//
// A GraphData value is a rooted tree dressed up as a node/edge list:
// - exactly one `user` node (the root)
// - `category` hubs on the first ring
// - optional `subnode` clusters between a hub and its items
// - `item` leaves
//
// The node kind is a tagged union so category/subcategory are only
// reachable on the variants that actually carry them. Serialized shape
// matches what the React renderer expects: the tag flattens into a
// `type` field next to the shared attributes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Discriminated node kind. The `type` tag and the per-variant fields
/// flatten into the node object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    User,
    Category { category: String },
    Subnode { category: String, subcategory: String },
    Item { category: String },
}

/// A single visual element of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub label: String,
    /// Raw underlying value; participates in deduplication upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Open provenance/extra attributes. The layout engine only ever
    /// reads `subcategory` out of this.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    /// Cartesian position. None until layout has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Visual radius hint.
    pub size: f64,
    pub color: String,
    /// Cached descendant item count, used to scale hub size and spokes.
    #[serde(
        rename = "itemCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub item_count: Option<usize>,
}

impl GraphNode {
    /// The semantic grouping key, absent only on the user node.
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::User => None,
            NodeKind::Category { category }
            | NodeKind::Subnode { category, .. }
            | NodeKind::Item { category } => Some(category),
        }
    }

    /// Finer grouping key. Subnodes carry it structurally; items carry it
    /// in metadata (when present at all).
    pub fn subcategory(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Subnode { subcategory, .. } => Some(subcategory),
            NodeKind::Item { .. } => self.metadata.get("subcategory").map(String::as_str),
            _ => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, NodeKind::User)
    }

    pub fn is_category(&self) -> bool {
        matches!(self.kind, NodeKind::Category { .. })
    }

    pub fn is_subnode(&self) -> bool {
        matches!(self.kind, NodeKind::Subnode { .. })
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, NodeKind::Item { .. })
    }

    /// Position with the same fallback the renderer uses for
    /// not-yet-positioned nodes.
    pub fn position_or_origin(&self) -> (f64, f64) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}

/// Directed parent -> child pair. The full edge set together with the
/// node set forms a rooted tree; the layout passes preserve that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The unit exchanged between every layout function. Treated as an
/// immutable value in, fresh value out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// Ids of direct children of `id` in edge order.
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to.as_str())
            .collect()
    }
}

/// Title-case a hyphenated slug: "local-cuisine" -> "Local Cuisine".
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
