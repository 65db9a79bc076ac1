//! `overflow`, `overflow-x`, `overflow-y`.

use trellis_common::Axis;
use trellis_dom::StyleDeclaration;
use trellis_style::Overflow;

use super::Capability;
use crate::render_box::{Invalidation, RenderBox};

/// Overflow clipping capability.
#[derive(Debug, Clone, Copy)]
pub struct OverflowClip;

impl Capability for OverflowClip {
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        _property: &str,
        _value: &str,
    ) -> Invalidation {
        let x = Overflow::of(style, Axis::Horizontal);
        let y = Overflow::of(style, Axis::Vertical);
        if (x, y) == (target.style.overflow_x, target.style.overflow_y) {
            return Invalidation::None;
        }
        target.style.overflow_x = x;
        target.style.overflow_y = y;
        if !x.is_scrollable() {
            target.scroll.x = 0.0;
        }
        if !y.is_scrollable() {
            target.scroll.y = 0.0;
        }
        Invalidation::Layout
    }
}
