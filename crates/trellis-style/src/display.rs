//! CSS Display property values
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::ValueError;

// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
//
// "The display property defines an element's display type, which consists of
// the two basic qualities of how an element generates boxes:
//   - the inner display type, which defines the kind of formatting context
//     it generates, dictating how its descendant boxes are laid out.
//   - the outer display type, which dictates how the principal box itself
//     participates in flow layout."
//
// The engine only distinguishes the computed keywords it can build boxes for.
// `list` is the engine's own keyword for virtualized list containers.

/// A computed `display` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DisplayValue {
    /// "The element generates a block-level box when placed in flow layout."
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    Inline,
    /// "This value causes an element to generate an inline-level block container."
    InlineBlock,
    /// [§ 2.6](https://www.w3.org/TR/css-display-3/#valdef-display-none)
    /// "The element and its descendants generate no boxes or text runs."
    None,
    /// "The element generates a principal flex container box."
    Flex,
    /// Inline-level flex container.
    InlineFlex,
    /// A virtualized list container that recycles its child boxes.
    List,
}

/// The inner layout model a display keyword resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum LayoutModel {
    /// Block-and-inline flow layout.
    Flow,
    /// Flex layout.
    Flex,
    /// Virtualized list layout.
    Recycler,
}

impl DisplayValue {
    /// Parse a computed display value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownKeyword`] for any keyword the engine
    /// cannot build a box for.
    pub fn parse(value: &str) -> Result<Self, ValueError> {
        Self::from_str(&value.trim().to_ascii_lowercase()).map_err(|_| ValueError::UnknownKeyword {
            property: "display",
            value: value.to_string(),
        })
    }

    /// The layout model the box for this display uses.
    ///
    /// `none` keeps a flow box so that toggling display back does not
    /// rebuild the subtree.
    #[must_use]
    pub const fn layout_model(self) -> LayoutModel {
        match self {
            Self::Block | Self::Inline | Self::InlineBlock | Self::None => LayoutModel::Flow,
            Self::Flex | Self::InlineFlex => LayoutModel::Flex,
            Self::List => LayoutModel::Recycler,
        }
    }

    /// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
    ///
    /// "The element generates an inline-level box when placed in flow layout."
    #[must_use]
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Whether the element generates no box at all.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Returns the default display value for a tag.
///
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
#[must_use]
pub fn default_display_for_tag(tag_name: &str) -> DisplayValue {
    // [§ 15.3.1 Hidden elements]
    // "The following elements must have their display set to none:"
    let hidden = [
        "area", "base", "datalist", "head", "link", "meta", "noscript", "param", "script",
        "style", "template", "title",
    ];
    if hidden.contains(&tag_name) {
        return DisplayValue::None;
    }

    let inline = [
        "a", "abbr", "b", "br", "cite", "code", "em", "i", "img", "label", "q", "s", "small",
        "span", "strong", "sub", "sup", "u", "video", "canvas", "audio",
    ];
    if inline.contains(&tag_name) {
        return DisplayValue::Inline;
    }

    if matches!(tag_name, "input" | "button" | "textarea" | "select") {
        return DisplayValue::InlineBlock;
    }

    DisplayValue::Block
}
