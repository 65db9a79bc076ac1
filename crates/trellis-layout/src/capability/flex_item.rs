//! Flex item properties.
//!
//! [CSS Flexbox § 7.1 The 'flex' shorthand](https://www.w3.org/TR/css-flexbox-1/#flex-property)

use trellis_dom::StyleDeclaration;
use trellis_style::parse_length;

use super::{Capability, optional, parse_number};
use crate::render_box::{FlexItemData, Invalidation, RenderBox};

/// Flex item capability.
#[derive(Debug, Clone, Copy)]
pub struct FlexItem;

impl Capability for FlexItem {
    fn apply(
        &self,
        target: &mut RenderBox,
        _style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation {
        let item = &mut target.style.flex_item;
        match property {
            "flex" => *item = parse_flex_shorthand(value, item),
            "flex-grow" => item.grow = parse_number(property, value).unwrap_or(0.0),
            "flex-shrink" => item.shrink = parse_number(property, value).unwrap_or(1.0),
            "flex-basis" => item.basis = parse_length(value).ok().flatten(),
            "align-self" => item.align_self = optional(value),
            "order" => {
                #[allow(clippy::cast_possible_truncation)]
                let order = parse_number(property, value).map_or(0, |n| n as i32);
                item.order = order;
            }
            _ => return Invalidation::None,
        }
        Invalidation::Layout
    }
}

/// "none" is `0 0 auto`, "auto" is `1 1 auto`, and a bare number `<n>` is
/// `<n> 1 0`. An empty value resets to the initial `0 1 auto`.
fn parse_flex_shorthand(value: &str, current: &FlexItemData) -> FlexItemData {
    let value = value.trim().to_ascii_lowercase();
    let mut item = FlexItemData {
        align_self: current.align_self.clone(),
        order: current.order,
        ..FlexItemData::default()
    };
    match value.as_str() {
        "" => {}
        "none" => item.shrink = 0.0,
        "auto" => {
            item.grow = 1.0;
            item.shrink = 1.0;
        }
        _ => {
            let mut parts = value.split_whitespace();
            if let Some(grow) = parts.next() {
                item.grow = parse_number("flex", grow).unwrap_or(0.0);
                item.basis = Some(0.0);
            }
            for part in parts {
                match part.parse::<f32>() {
                    Ok(shrink) => item.shrink = shrink,
                    Err(_) => item.basis = parse_length(part).ok().flatten(),
                }
            }
        }
    }
    item
}
