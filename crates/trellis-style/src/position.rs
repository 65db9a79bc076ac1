//! CSS Positioned Layout values.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use trellis_common::{Axis, Point};
use trellis_dom::StyleDeclaration;

use crate::ValueError;
use crate::length::length_property;

/// [§ 9.3.1 Choosing a positioning scheme: 'position' property](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "The 'position' and 'float' properties determine which of the CSS 2
/// positioning algorithms is used to calculate the position of a box."
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum PositionType {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but the box is fixed with respect to some reference."
    Fixed,
    /// [CSS Positioned Layout Module Level 3 § 3.2](https://www.w3.org/TR/css-position-3/#sticky-position)
    ///
    /// "A stickily positioned box is positioned similarly to a relatively
    /// positioned box, but the offset is computed with reference to the
    /// nearest ancestor with a scrolling mechanism."
    Sticky,
}

impl PositionType {
    /// Parse a `position` value. The empty string is `static`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownKeyword`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Self::Static);
        }
        Self::from_str(&value.to_ascii_lowercase()).map_err(|_| ValueError::UnknownKeyword {
            property: "position",
            value: value.to_string(),
        })
    }

    /// The position of an element's style, `static` when unset or invalid.
    #[must_use]
    pub fn of(style: &StyleDeclaration) -> Self {
        Self::parse(style.value("position")).unwrap_or_else(|err| {
            trellis_common::warning::warn_once("Style", &err.to_string());
            Self::Static
        })
    }

    /// "An element is said to be positioned if its 'position' property has
    /// a value other than 'static'."
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Absolute and fixed boxes leave normal flow entirely.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, Self::Absolute | Self::Fixed)
    }
}

/// [§ 9.3.2 Box offsets: 'top', 'right', 'bottom', 'left'](https://www.w3.org/TR/CSS2/visuren.html#position-props)
///
/// `None` is `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoxOffsets {
    /// "how far the top margin edge of the box is offset below the top edge
    /// of the box's containing block."
    pub top: Option<f32>,
    /// "how far the right margin edge of the box is offset to the left of the
    /// right edge of the box's containing block."
    pub right: Option<f32>,
    /// "how far the bottom margin edge of the box is offset above the bottom
    /// edge of the box's containing block."
    pub bottom: Option<f32>,
    /// "how far the left margin edge of the box is offset to the right of the
    /// left edge of the box's containing block."
    pub left: Option<f32>,
}

impl BoxOffsets {
    /// Read the four offset edges from a style declaration.
    #[must_use]
    pub fn from_style(style: &StyleDeclaration) -> Self {
        Self {
            top: length_property(style, "top"),
            right: length_property(style, "right"),
            bottom: length_property(style, "bottom"),
            left: length_property(style, "left"),
        }
    }

    /// The leading edge along `axis` (top or left).
    #[must_use]
    pub const fn start(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Vertical => self.top,
            Axis::Horizontal => self.left,
        }
    }

    /// The trailing edge along `axis` (bottom or right).
    #[must_use]
    pub const fn end(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Vertical => self.bottom,
            Axis::Horizontal => self.right,
        }
    }

    /// Whether any edge along `axis` is set.
    #[must_use]
    pub const fn has_edge(&self, axis: Axis) -> bool {
        self.start(axis).is_some() || self.end(axis).is_some()
    }

    /// [§ 9.4.3 Relative positioning](https://www.w3.org/TR/CSS2/visuren.html#relative-positioning)
    ///
    /// "Offsetting a box (B1) in this way has no effect on the box (B2) that
    /// follows."
    ///
    /// The displacement a relatively positioned box receives.
    #[must_use]
    pub fn relative_shift(&self) -> Point {
        // "If both 'left' and 'right' are 'auto', the used values are both 0."
        // "If 'left' is 'auto', its used value is minus the value of 'right'."
        // "If neither 'left' nor 'right' is 'auto' ... the value of 'left'
        //  wins and 'right' becomes -'left'." (LTR only)
        let x = match (self.left, self.right) {
            (None, None) => 0.0,
            (Some(left), _) => left,
            (None, Some(right)) => -right,
        };
        // "If neither is 'auto', 'bottom' is ignored."
        let y = match (self.top, self.bottom) {
            (None, None) => 0.0,
            (Some(top), _) => top,
            (None, Some(bottom)) => -bottom,
        };
        Point { x, y }
    }
}
