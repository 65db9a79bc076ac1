//! Document context for the Trellis render-tree engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document** - the element tree, the render tree, and their bindings
//! - **Style dispatch** - routing each committed style write to its handler
//! - **Positioning** - containing blocks and out-of-flow relocation
//! - **Sticky scrolling** - scroll-linked paint offsets
//! - **Geometry** - flushed geometry queries and synthetic clicks
//!
//! # Not Yet Implemented
//!
//! - Event listeners (clicks report the bubbling path only)
//! - Scroll anchoring

mod containing_block;
mod dispatch;
mod document;
mod error;
mod frame;
mod geometry;
mod mutation;
mod relocate;
mod sticky;

pub use document::{Document, DocumentConfig};
pub use error::DocumentError;
pub use frame::{DeferredTask, FrameScheduler};
pub use geometry::Metric;
pub use sticky::{StickyCache, StickyStatus};

pub use trellis_common as common;
pub use trellis_dom as dom;
pub use trellis_layout as layout;
pub use trellis_style as style;
