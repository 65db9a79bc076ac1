//! Per-feature style capabilities.
//!
//! Each capability owns one slice of [`BoxStyle`](crate::BoxStyle) or
//! [`VariantState`](crate::VariantState) and knows how to refresh it from an
//! element's style when one of its properties changes. The dispatcher picks a
//! capability by [`PropertyCategory`]; a box factory applies all of them when
//! it builds a box from scratch.

mod container;
mod decoration;
mod filter;
mod flex_item;
mod overflow;
mod positioning;
mod sizing;
mod text;
mod transform;
mod transition;

pub use container::Container;
pub use decoration::Decoration;
pub use filter::Filter;
pub use flex_item::FlexItem;
pub use overflow::OverflowClip;
pub use positioning::Positioning;
pub use sizing::Sizing;
pub use text::TextInherit;
pub use transform::Transform;
pub use transition::Transition;

use trellis_common::warning::warn_once;
use trellis_dom::StyleDeclaration;
use trellis_style::{PropertyCategory, fans_out_to_text};

use crate::render_box::{Invalidation, RenderBox};

/// A slice of box state driven by a family of style properties.
pub trait Capability: Sync {
    /// Refresh `target` after `property` changed to `value` in `style`.
    ///
    /// `value` is empty when the property was removed. Returns how far the
    /// change reaches.
    fn apply(
        &self,
        target: &mut RenderBox,
        style: &StyleDeclaration,
        property: &str,
        value: &str,
    ) -> Invalidation;
}

/// The capability that handles `category`. `Display` has none: display
/// changes go through the synchronizer.
#[must_use]
pub fn for_category(category: PropertyCategory) -> Option<&'static dyn Capability> {
    let capability: &'static dyn Capability = match category {
        PropertyCategory::Display => return None,
        PropertyCategory::Position | PropertyCategory::Offset => &Positioning,
        PropertyCategory::FlexContainer | PropertyCategory::ListAxis => &Container,
        PropertyCategory::FlexItem => &FlexItem,
        PropertyCategory::Padding | PropertyCategory::Size | PropertyCategory::Margin => &Sizing,
        PropertyCategory::Overflow => &OverflowClip,
        PropertyCategory::TextAlign
        | PropertyCategory::Paint
        | PropertyCategory::Opacity
        | PropertyCategory::Visibility
        | PropertyCategory::ContentVisibility => &Decoration,
        PropertyCategory::Transform | PropertyCategory::TransformOrigin => &Transform,
        PropertyCategory::Transition => &Transition,
        PropertyCategory::Filter => &Filter,
        PropertyCategory::TextInheritable => &TextInherit,
    };
    Some(capability)
}

/// Apply every declared property of `style` to a freshly built box.
pub fn apply_all(target: &mut RenderBox, style: &StyleDeclaration) -> Invalidation {
    let mut invalidation = Invalidation::None;
    for (name, value) in style.iter() {
        let Some(category) = PropertyCategory::classify(name) else {
            continue;
        };
        if let Some(capability) = for_category(category) {
            invalidation = invalidation.max(capability.apply(target, style, name, value));
        }
        if fans_out_to_text(name) && category != PropertyCategory::TextInheritable {
            invalidation = invalidation.max(TextInherit.apply(target, style, name, value));
        }
    }
    invalidation
}

/// Re-apply only the variant-specific properties, after a conversion has
/// given the box fresh [`VariantState`](crate::VariantState).
pub fn apply_variant(target: &mut RenderBox, style: &StyleDeclaration) {
    for (name, value) in style.iter() {
        if matches!(
            PropertyCategory::classify(name),
            Some(PropertyCategory::FlexContainer | PropertyCategory::ListAxis)
        ) {
            let _ = Container.apply(target, style, name, value);
        }
    }
}

/// Parse a plain number, reporting malformed input once.
pub(crate) fn parse_number(property: &str, value: &str) -> Option<f32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f32>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            warn_once("Layout", &format!("{property}: expected a number, got '{value}'"));
            None
        }
    }
}

/// Store `value` under `property` in `map`, or remove it when empty.
pub(crate) fn store(
    map: &mut std::collections::BTreeMap<String, String>,
    property: &str,
    value: &str,
) -> bool {
    let value = value.trim();
    if value.is_empty() {
        map.remove(property).is_some()
    } else {
        map.insert(property.to_string(), value.to_string()).as_deref() != Some(value)
    }
}

/// `None` for empty values, otherwise the trimmed value.
pub(crate) fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
