//! `position`, `z-index` and the box offsets.

use trellis_dom::StyleDeclaration;
use trellis_style::{BoxOffsets, PositionType};

use super::{Capability, parse_number};
use crate::render_box::{Invalidation, RenderBox};

/// Positioning capability.
///
/// Moving the box between containing blocks is the document's job; this
/// only records the values layout and paint read.
#[derive(Debug, Clone, Copy)]
pub struct Positioning;

impl Capability for Positioning {
    #[allow(clippy::cast_possible_truncation)]
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        match property {
            "position" => {
                let position = PositionType::of(style);
                if position == target.style.position {
                    return Invalidation::None;
                }
                target.style.position = position;
                Invalidation::Layout
            }
            "z-index" => {
                let z_index = if value.trim().eq_ignore_ascii_case("auto") {
                    None
                } else {
                    parse_number(property, value).map(|z| z as i32)
                };
                target.style.z_index = z_index;
                Invalidation::Paint
            }
            "top" | "right" | "bottom" | "left" => {
                target.style.offsets = BoxOffsets::from_style(style);
                match target.style.position {
                    PositionType::Static => Invalidation::None,
                    // Sticky offsets are applied at paint time by the scroll engine.
                    PositionType::Sticky => Invalidation::Paint,
                    PositionType::Relative | PositionType::Absolute | PositionType::Fixed => {
                        Invalidation::Layout
                    }
                }
            }
            _ => Invalidation::None,
        }
    }
}
