//! Inherited text properties re-applied to an element's own text.
//!
//! [CSS Cascade 4 § 7.2](https://www.w3.org/TR/css-cascade-4/#inheriting)

use trellis_dom::StyleDeclaration;
use trellis_style::affects_text_metrics;

use super::{Capability, store};
use crate::render_box::{Invalidation, RenderBox};

/// Text inheritance capability.
#[derive(Debug, Clone, Copy)]
pub struct TextInherit;

impl Capability for TextInherit {
    fn apply(
        &self,
        target: &mut RenderBox,
        _style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        if !store(&mut target.style.text, property, value) {
            return Invalidation::None;
        }
        if affects_text_metrics(property) {
            Invalidation::Layout
        } else {
            Invalidation::Paint
        }
    }
}
