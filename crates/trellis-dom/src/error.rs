//! Errors reported by structural tree edits.

use thiserror::Error;

use crate::NodeId;

/// A structural edit that cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node was disposed (or never allocated).
    #[error("element {0} has been disposed")]
    Disposed(NodeId),

    /// `child` is not a child of `parent`.
    #[error("element {child} is not a child of {parent}")]
    NotAChild {
        /// The presumed parent.
        parent: NodeId,
        /// The node that was looked up.
        child: NodeId,
    },

    /// `child` already has a structural parent.
    #[error("element {child} is already a child of {parent}")]
    AlreadyParented {
        /// The node being inserted.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// The edit would make a node its own ancestor.
    #[error("inserting {child} under {parent} would create a cycle")]
    Cycle {
        /// The requested parent.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },

    /// Replaced elements (media, embedded content) have no child boxes.
    #[error("element {0} is replaced content and cannot have children")]
    NotAContainer(NodeId),

    /// The root element can be neither moved nor disposed.
    #[error("the root element cannot be moved or disposed")]
    RootImmovable,
}
