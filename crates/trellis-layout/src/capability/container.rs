//! Container parameters that only one layout variant understands.
//!
//! Values are kept in [`VariantState`]; a box of another variant ignores them
//! until a conversion makes them meaningful.

use trellis_common::Axis;
use trellis_common::warning::warn_once;
use trellis_dom::StyleDeclaration;

use super::Capability;
use crate::render_box::{FlexContainerState, Invalidation, RenderBox, VariantState};

/// Flex container and recycler list capability.
#[derive(Debug, Clone, Copy)]
pub struct Container;

impl Capability for Container {
    fn apply(
        &self,
        target: &mut RenderBox,
        _style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        let value = value.trim().to_ascii_lowercase();
        match (&mut target.variant, property) {
            (VariantState::Flex(state), _) => {
                if apply_flex(state, property, &value) {
                    Invalidation::Layout
                } else {
                    Invalidation::None
                }
            }
            (VariantState::Recycler { axis }, "list-axis") => {
                *axis = match value.as_str() {
                    "horizontal" => Axis::Horizontal,
                    "" | "vertical" => Axis::Vertical,
                    other => {
                        warn_once("Layout", &format!("unknown list-axis '{other}'"));
                        Axis::Vertical
                    }
                };
                Invalidation::Layout
            }
            _ => Invalidation::None,
        }
    }
}

/// [CSS Flexbox § 5](https://www.w3.org/TR/css-flexbox-1/#flow-order)
fn apply_flex(state: &mut FlexContainerState, property: &str, value: &str) -> bool {
    match property {
        "flex-direction" => set_direction(state, value),
        "flex-wrap" => state.wrap = !matches!(value, "" | "nowrap"),
        "flex-flow" => {
            set_direction(state, "row");
            state.wrap = false;
            for part in value.split_whitespace() {
                if part.starts_with("row") || part.starts_with("column") {
                    set_direction(state, part);
                } else {
                    state.wrap = part != "nowrap";
                }
            }
        }
        "justify-content" => state.justify_content = keyword_or(value, "flex-start"),
        "align-items" => state.align_items = keyword_or(value, "stretch"),
        "align-content" => state.align_content = keyword_or(value, "normal"),
        _ => return false,
    }
    true
}

fn set_direction(state: &mut FlexContainerState, value: &str) {
    let (axis, reverse) = match value {
        "column" => (Axis::Vertical, false),
        "column-reverse" => (Axis::Vertical, true),
        "row-reverse" => (Axis::Horizontal, true),
        _ => (Axis::Horizontal, false),
    };
    state.main_axis = axis;
    state.reverse = reverse;
}

fn keyword_or(value: &str, initial: &str) -> String {
    if value.is_empty() {
        initial.to_string()
    } else {
        value.to_string()
    }
}
