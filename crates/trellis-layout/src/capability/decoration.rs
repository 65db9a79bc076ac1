//! Paint decoration: backgrounds, borders, colour, opacity, visibility.
//!
//! Everything here is paint-only except border widths, `text-align` and
//! `content-visibility`, which change geometry.

use trellis_dom::StyleDeclaration;
use trellis_style::edge_property;

use super::{Capability, optional, parse_number, store};
use crate::render_box::{Invalidation, RenderBox};

/// Decoration capability.
#[derive(Debug, Clone, Copy)]
pub struct Decoration;

impl Capability for Decoration {
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        match property {
            "opacity" => {
                target.style.opacity = parse_number(property, value)
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0);
                Invalidation::Paint
            }
            // [§ 11.2 Visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
            "visibility" => {
                let value = value.trim().to_ascii_lowercase();
                target.style.visible = !matches!(value.as_str(), "hidden" | "collapse");
                Invalidation::Paint
            }
            "content-visibility" => {
                target.style.content_visible = !value.trim().eq_ignore_ascii_case("hidden");
                Invalidation::Layout
            }
            "text-align" => {
                target.style.text_align = optional(value);
                Invalidation::Layout
            }
            name if is_border_width(name) => {
                let border = edge_property(style, "border");
                if border == target.style.border {
                    return Invalidation::None;
                }
                target.style.border = border;
                Invalidation::Layout
            }
            _ => {
                if store(&mut target.style.paint, property, value) {
                    Invalidation::Paint
                } else {
                    Invalidation::None
                }
            }
        }
    }
}

fn is_border_width(name: &str) -> bool {
    name == "border-width"
        || matches!(
            name.strip_prefix("border-").and_then(|rest| rest.strip_suffix("-width")),
            Some("top" | "right" | "bottom" | "left")
        )
}
