//! Box sizing: `width`/`height` with their bounds, `padding`, `margin`.
//!
//! [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)

use trellis_common::Size;
use trellis_dom::StyleDeclaration;
use trellis_style::{edge_property, length_property};

use super::Capability;
use crate::render_box::{Invalidation, RenderBox};

/// Sizing capability.
#[derive(Debug, Clone, Copy)]
pub struct Sizing;

impl Capability for Sizing {
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        property: &str,
        _value: &str,
    ) -> Invalidation {
        let box_style = &mut target.style;
        match property {
            "width" => box_style.width = length_property(style, "width"),
            "height" => box_style.height = length_property(style, "height"),
            "min-width" => box_style.min_width = length_property(style, "min-width"),
            "min-height" => box_style.min_height = length_property(style, "min-height"),
            "max-width" => box_style.max_width = length_property(style, "max-width"),
            "max-height" => box_style.max_height = length_property(style, "max-height"),
            name if name.starts_with("padding") => {
                box_style.padding = edge_property(style, "padding");
            }
            name if name.starts_with("margin") => {
                box_style.margin = edge_property(style, "margin");
            }
            _ => return Invalidation::None,
        }

        // Leaves have no children to size them; their preferred size is all
        // layout has to go on.
        if !target.kind.is_container() {
            target.preferred = Size::new(
                target.style.width.unwrap_or(0.0),
                target.style.height.unwrap_or(0.0),
            );
        }
        Invalidation::Layout
    }
}
