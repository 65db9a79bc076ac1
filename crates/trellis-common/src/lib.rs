//! Common utilities for the Trellis render-tree engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - once-only reports of unsupported input, routed through `log`
//! - **Geometry** - points, sizes, rectangles, and edge sizes shared by the box tree

pub mod geometry;
pub mod warning;

pub use geometry::{Axis, EdgeSizes, Point, Rect, Size};
