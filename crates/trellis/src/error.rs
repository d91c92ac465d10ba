use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::{NodeId, OverlayId};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Layout itself never fails; these errors come from structural tree edits,
/// overlay bookkeeping, and parsing of configuration or bound data.
#[derive(Error, Debug)]
pub enum Error {
    /// A node handle did not resolve, either because it never existed or
    /// because the node has since been removed.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// An overlay handle did not resolve.
    #[error("overlay not found: {0:?}")]
    OverlayNotFound(OverlayId),

    /// The node is already owned by an active overlay entry.
    #[error("node {0:?} is already an active overlay")]
    DuplicateOverlay(NodeId),

    /// A structural operation that would break tree ownership.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Bound data that does not have the expected shape.
    #[error("data: {0}")]
    Data(String),

    /// Configuration or style that could not be parsed.
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}
