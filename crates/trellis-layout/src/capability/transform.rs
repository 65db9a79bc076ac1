//! `transform` and `transform-origin`.
//!
//! Whether a transform turns the element into a containing block is decided
//! by the document; the box only records what to paint.

use trellis_dom::StyleDeclaration;
use trellis_style::is_transform_value;

use super::{Capability, optional};
use crate::render_box::{Invalidation, RenderBox};

/// Transform capability.
#[derive(Debug, Clone, Copy)]
pub struct Transform;

impl Capability for Transform {
    fn apply(
        &self,
        target: &mut RenderBox,
        _style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        match property {
            "transform" => {
                target.style.transform =
                    is_transform_value(value).then(|| value.trim().to_string());
            }
            "transform-origin" => target.style.transform_origin = optional(value),
            _ => return Invalidation::None,
        }
        Invalidation::Paint
    }
}
