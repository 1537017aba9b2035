//
// Boundary errors. The geometric core is infallible by design: degenerate
// input degrades to "node left unpositioned" or "unchanged graph". The
// only real failure modes live at the JSON boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to parse profile items: {0}")]
    InvalidItems(#[source] serde_json::Error),

    #[error("failed to parse graph data: {0}")]
    InvalidGraph(#[source] serde_json::Error),

    #[error("failed to serialize graph data: {0}")]
    Serialize(#[source] serde_json::Error),
}
