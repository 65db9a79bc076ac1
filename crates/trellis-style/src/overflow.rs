//! CSS Overflow values.
//!
//! [CSS Overflow Module Level 3](https://www.w3.org/TR/css-overflow-3/)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use trellis_common::Axis;
use trellis_dom::StyleDeclaration;

/// [§ 3 Scrolling and Clipping Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-control)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Overflow {
    /// "There is no special handling of overflow."
    #[default]
    Visible,
    /// "This value indicates that the box's content is clipped to its padding
    /// box and that the UA must not provide any scrolling user interface."
    Hidden,
    /// "Like hidden, this value indicates that the box is clipped to its padding
    /// box and that the UA must not provide any scrolling user interface."
    /// Unlike hidden it also forbids programmatic scrolling.
    Clip,
    /// "This value indicates that the content is clipped to the padding box,
    /// but can be scrolled into view."
    Scroll,
    /// "Like scroll when the box has scrollable overflow; like hidden otherwise."
    Auto,
}

impl Overflow {
    /// Parse an overflow keyword, `visible` when unset or unknown.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Self::Visible;
        }
        Self::from_str(&value).unwrap_or_else(|_| {
            trellis_common::warning::warn_once(
                "Style",
                &format!("unsupported overflow value '{value}'"),
            );
            Self::Visible
        })
    }

    /// The overflow of `style` along `axis`, honouring `overflow-x`/`overflow-y`
    /// over the `overflow` shorthand.
    #[must_use]
    pub fn of(style: &StyleDeclaration, axis: Axis) -> Self {
        let longhand = match axis {
            Axis::Vertical => "overflow-y",
            Axis::Horizontal => "overflow-x",
        };
        style
            .get(longhand)
            .or_else(|| style.get("overflow"))
            .map_or(Self::Visible, Self::parse)
    }

    /// [§ 3.1](https://www.w3.org/TR/css-overflow-3/#scroll-container)
    ///
    /// "A scroll container is a box ... whose overflow is hidden, scroll or
    /// auto." Only `scroll` and `auto` let the user move content, which is
    /// what the sticky engine cares about.
    #[must_use]
    pub const fn is_scrollable(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }

    /// Whether content is clipped to the padding box.
    #[must_use]
    pub const fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }
}

/// Whether `style` makes its element a user-scrollable container on either axis.
#[must_use]
pub fn is_scroll_container(style: &StyleDeclaration) -> bool {
    Overflow::of(style, Axis::Vertical).is_scrollable()
        || Overflow::of(style, Axis::Horizontal).is_scrollable()
}
