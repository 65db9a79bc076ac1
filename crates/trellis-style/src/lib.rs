//! Typed style values and property classification for the Trellis engine.
//!
//! # Scope
//!
//! This crate interprets the string values held in an element's
//! [`StyleDeclaration`](trellis_dom::StyleDeclaration):
//! - **Display** ([CSS Display Level 3](https://www.w3.org/TR/css-display-3/))
//! - **Position** and box offsets ([CSS Positioned Layout Level 3](https://www.w3.org/TR/css-position-3/))
//! - **Overflow** ([CSS Overflow Level 3](https://www.w3.org/TR/css-overflow-3/))
//! - **Lengths** in px, em and rem ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//! - **Property categories** used to route style changes
//!
//! # Not Yet Implemented
//!
//! - Percentages and viewport units
//! - Any cascade: only inline declarations exist

mod error;

/// Display keywords and the layout model they resolve to.
pub mod display;
/// Length and box-edge parsing.
pub mod length;
/// Overflow keywords and scroll-container detection.
pub mod overflow;
/// Position keywords and box offsets.
pub mod position;
/// Property-name classification.
pub mod property;

pub use display::{DisplayValue, LayoutModel, default_display_for_tag};
pub use error::ValueError;
pub use length::{DEFAULT_FONT_SIZE_PX, edge_property, length_property, parse_edges, parse_length};
pub use overflow::{Overflow, is_scroll_container};
pub use position::{BoxOffsets, PositionType};
pub use property::{PropertyCategory, affects_text_metrics, fans_out_to_text};

use trellis_dom::StyleDeclaration;

/// [CSS Transforms Level 1 § 6](https://www.w3.org/TR/css-transforms-1/#transform-rendering)
///
/// "For elements whose layout is governed by the CSS box model, any value
/// other than none for the transform property also causes the element to
/// establish a containing block for all descendants."
#[must_use]
pub fn is_transform_value(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("none")
}

/// Whether `style` carries a transform that establishes a containing block.
#[must_use]
pub fn has_transform(style: &StyleDeclaration) -> bool {
    is_transform_value(style.value("transform"))
}

/// The computed display of an element: its `display` declaration, else the
/// default for its tag.
///
/// # Errors
///
/// Returns [`ValueError::UnknownKeyword`] when the declaration names a
/// display the engine cannot build.
pub fn computed_display(style: &StyleDeclaration, tag_name: &str) -> Result<DisplayValue, ValueError> {
    match style.get("display") {
        Some(value) => DisplayValue::parse(value),
        None => Ok(default_display_for_tag(tag_name)),
    }
}
