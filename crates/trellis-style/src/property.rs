//! Classification of style properties by the effect a change has on the box tree.
//!
//! Every property name belongs to at most one [`PropertyCategory`]. A handful
//! of inherited text properties additionally fan out to descendant text.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// The effect family of a style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
pub enum PropertyCategory {
    /// `display`: may replace the box.
    Display,
    /// `position`, `z-index`.
    Position,
    /// `top`, `right`, `bottom`, `left`.
    Offset,
    /// Properties of a flex container.
    FlexContainer,
    /// Properties a flex item contributes to its container.
    FlexItem,
    /// The scroll axis of a recycler list.
    ListAxis,
    /// `text-align`.
    TextAlign,
    /// `padding` and its longhands.
    Padding,
    /// Box sizing: `width`, `height` and their min/max bounds.
    Size,
    /// `overflow`, `overflow-x`, `overflow-y`.
    Overflow,
    /// Paint-only decoration: backgrounds, borders, shadows, `color`.
    Paint,
    /// `margin` and its longhands.
    Margin,
    /// `opacity`.
    Opacity,
    /// `visibility`.
    Visibility,
    /// `content-visibility`.
    ContentVisibility,
    /// `transform`.
    Transform,
    /// `transform-origin`.
    TransformOrigin,
    /// `transition` and its longhands.
    Transition,
    /// `filter`.
    Filter,
    /// Inherited text properties other than `color`.
    TextInheritable,
}

impl PropertyCategory {
    /// Classify a (lowercase) property name.
    #[must_use]
    pub fn classify(name: &str) -> Option<Self> {
        let category = match name {
            "display" => Self::Display,
            "position" | "z-index" => Self::Position,
            "top" | "right" | "bottom" | "left" => Self::Offset,
            "flex-direction" | "flex-wrap" | "flex-flow" | "justify-content" | "align-items"
            | "align-content" => Self::FlexContainer,
            "flex" | "flex-grow" | "flex-shrink" | "flex-basis" | "align-self" | "order" => {
                Self::FlexItem
            }
            "list-axis" => Self::ListAxis,
            "text-align" => Self::TextAlign,
            "padding" | "padding-top" | "padding-right" | "padding-bottom" | "padding-left" => {
                Self::Padding
            }
            "width" | "height" | "min-width" | "min-height" | "max-width" | "max-height" => {
                Self::Size
            }
            "overflow" | "overflow-x" | "overflow-y" => Self::Overflow,
            "margin" | "margin-top" | "margin-right" | "margin-bottom" | "margin-left" => {
                Self::Margin
            }
            "opacity" => Self::Opacity,
            "visibility" => Self::Visibility,
            "content-visibility" => Self::ContentVisibility,
            "transform" => Self::Transform,
            "transform-origin" => Self::TransformOrigin,
            "transition" | "transition-property" | "transition-duration"
            | "transition-timing-function" | "transition-delay" => Self::Transition,
            "filter" => Self::Filter,
            "color" | "background" | "background-color" | "background-image" | "box-shadow"
            | "border-radius" | "border-color" | "border-style" | "outline" => Self::Paint,
            name if name.starts_with("border") => Self::Paint,
            "font" | "font-size" | "font-weight" | "font-style" | "font-family" | "line-height"
            | "letter-spacing" | "word-spacing" | "white-space" | "text-decoration"
            | "text-shadow" | "text-overflow" => Self::TextInheritable,
            _ => return None,
        };
        Some(category)
    }

    /// Whether this category only affects painting.
    #[must_use]
    pub const fn is_paint_only(self) -> bool {
        matches!(
            self,
            Self::Paint
                | Self::Opacity
                | Self::Visibility
                | Self::Transform
                | Self::TransformOrigin
                | Self::Filter
        )
    }
}

/// Whether a change to `name` must be re-applied to descendant text.
///
/// [CSS Cascade 4 § 7.2 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// "Inheritance propagates property values from parent elements to their
/// children."
#[must_use]
pub fn fans_out_to_text(name: &str) -> bool {
    name == "color"
        || matches!(
            PropertyCategory::classify(name),
            Some(PropertyCategory::TextInheritable)
        )
}

/// Whether a change to an inherited text property can alter text metrics.
#[must_use]
pub fn affects_text_metrics(name: &str) -> bool {
    !matches!(name, "color" | "text-decoration" | "text-shadow")
}
