//! CSS Length values
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use trellis_common::EdgeSizes;
use trellis_common::warning::warn_once;
use trellis_dom::StyleDeclaration;

use crate::ValueError;

/// User agent default font size, used for `em` and `rem`.
/// [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
///
/// Parse a length into pixels. `auto` and the empty string are `None`.
///
/// Unitless numbers are accepted as pixels. Percentages need a containing
/// block the style layer does not have; they are reported and treated as
/// `auto`.
///
/// # Errors
///
/// Returns [`ValueError::MalformedLength`] if the value is not a number with
/// a known unit.
pub fn parse_length(value: &str) -> Result<Option<f32>, ValueError> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() || value == "auto" {
        return Ok(None);
    }

    let (number, scale) = if let Some(number) = value.strip_suffix("px") {
        (number, 1.0)
    } else if let Some(number) = value.strip_suffix("rem") {
        (number, DEFAULT_FONT_SIZE_PX)
    } else if let Some(number) = value.strip_suffix("em") {
        (number, DEFAULT_FONT_SIZE_PX)
    } else if value.ends_with('%') {
        warn_once("Style", &format!("percentage length '{value}' treated as auto"));
        return Ok(None);
    } else {
        (value.as_str(), 1.0)
    };

    number
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| Some(n * scale))
        .ok_or_else(|| ValueError::MalformedLength(value.clone()))
}

/// Read a length property, treating malformed values as unset.
#[must_use]
pub fn length_property(style: &StyleDeclaration, name: &str) -> Option<f32> {
    parse_length(style.value(name)).unwrap_or_else(|err| {
        warn_once("Style", &format!("{name}: {err}"));
        None
    })
}

/// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS2/box.html#padding-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom paddings are set to the first value and
/// the right and left paddings are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four values,
/// they apply to the top, right, bottom, and left, respectively."
///
/// # Errors
///
/// Returns [`ValueError::MalformedLength`] if any component is malformed or
/// the component count is not 1–4.
pub fn parse_edges(value: &str) -> Result<EdgeSizes, ValueError> {
    let parts = value
        .split_whitespace()
        .map(|part| parse_length(part).map(Option::unwrap_or_default))
        .collect::<Result<Vec<f32>, _>>()?;
    match parts.as_slice() {
        [all] => Ok(EdgeSizes {
            top: *all,
            right: *all,
            bottom: *all,
            left: *all,
        }),
        [vertical, horizontal] => Ok(EdgeSizes {
            top: *vertical,
            right: *horizontal,
            bottom: *vertical,
            left: *horizontal,
        }),
        [top, horizontal, bottom] => Ok(EdgeSizes {
            top: *top,
            right: *horizontal,
            bottom: *bottom,
            left: *horizontal,
        }),
        [top, right, bottom, left] => Ok(EdgeSizes {
            top: *top,
            right: *right,
            bottom: *bottom,
            left: *left,
        }),
        _ => Err(ValueError::MalformedLength(value.to_string())),
    }
}

/// Resolve the four edges of a box-edge property family (`padding`,
/// `margin`, `border-width`-style) with longhands overriding the shorthand.
///
/// `prefix` is the shorthand name; longhands are `{prefix}-top` etc., except
/// for `border`, whose longhands are `border-{side}-width`.
#[must_use]
pub fn edge_property(style: &StyleDeclaration, prefix: &str) -> EdgeSizes {
    let shorthand = if prefix == "border" {
        "border-width"
    } else {
        prefix
    };
    let mut edges = match style.get(shorthand) {
        Some(value) => parse_edges(value).unwrap_or_else(|err| {
            warn_once("Style", &format!("{shorthand}: {err}"));
            EdgeSizes::default()
        }),
        None => EdgeSizes::default(),
    };

    let longhand = |side: &str| {
        if prefix == "border" {
            format!("border-{side}-width")
        } else {
            format!("{prefix}-{side}")
        }
    };
    if let Some(top) = length_property(style, &longhand("top")) {
        edges.top = top;
    }
    if let Some(right) = length_property(style, &longhand("right")) {
        edges.right = right;
    }
    if let Some(bottom) = length_property(style, &longhand("bottom")) {
        edges.bottom = bottom;
    }
    if let Some(left) = length_property(style, &longhand("left")) {
        edges.left = left;
    }
    edges
}
