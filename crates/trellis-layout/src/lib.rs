//! Render boxes and the machinery that keeps them in step with element style.
//!
//! # Scope
//!
//! - **Render tree**: an arena of [`RenderBox`]es addressed by [`BoxId`]
//! - **Box model**: intrinsic leaves, flow/flex/recycler containers and
//!   placeholders, each self- or parent-repainting
//! - **Factories**: [`BoxFactory`] builds fresh boxes and converted copies
//! - **Synchronizer**: [`sync_box`] picks, reuses or converts an element's box
//! - **Capabilities**: per-feature style application ([`capability`])
//! - **Layout flush**: the [`LayoutFlush`] seam and the [`StackLayout`]
//!   reference implementation
//!
//! # Not Yet Implemented
//!
//! - Real flow and flex algorithms: line boxes, flexible lengths, wrapping
//! - Recycling of off-screen list items

/// Per-feature style capabilities.
pub mod capability;
/// Box factories.
pub mod factory;
/// Layout flush seam and reference layout.
pub mod flush;
/// Box model types.
pub mod render_box;
/// Box-variant synchronizer.
pub mod sync;
/// Render-box arena.
pub mod tree;

pub use capability::Capability;
pub use factory::{BoxFactory, BoxSpec, DefaultBoxFactory};
pub use flush::{LayoutFlush, StackLayout};
pub use render_box::{
    BoxId, BoxKind, BoxStyle, FlexContainerState, FlexItemData, Invalidation, LayoutVariant,
    RenderBox, RepaintMode, VariantState,
};
pub use sync::{BoxRequest, resolve_kind, sync_box};
pub use tree::{BoxSnapshot, RenderTree};
