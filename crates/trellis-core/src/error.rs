//! Errors reported by the document API.

use thiserror::Error;
use trellis_dom::TreeError;

/// A document operation that could not be carried out.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A structural edit was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The render tree could not be serialized.
    #[error("failed to serialize the render tree: {0}")]
    Snapshot(#[from] serde_json::Error),
}
