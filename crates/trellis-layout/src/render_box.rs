//! Render boxes: the layout/paint primitives bound to elements.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "Each box is associated with its generating element."
//!
//! A box names its generating element by [`NodeId`] only. Which box an element
//! currently owns is recorded by the document, so neither side holds a
//! pointer to the other.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::Display;
use trellis_common::{Axis, EdgeSizes, Point, Size};
use trellis_dom::NodeId;
use trellis_style::{BoxOffsets, DisplayValue, LayoutModel, Overflow, PositionType};

/// A type-safe index into the [`RenderTree`](crate::RenderTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoxId(pub usize);

/// The layout discipline of a container box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum LayoutVariant {
    /// Block-and-inline flow.
    Flow,
    /// Flex container.
    Flex,
    /// Virtualized list that recycles its children.
    Recycler,
}

impl From<LayoutModel> for LayoutVariant {
    fn from(model: LayoutModel) -> Self {
        match model {
            LayoutModel::Flow => Self::Flow,
            LayoutModel::Flex => Self::Flex,
            LayoutModel::Recycler => Self::Recycler,
        }
    }
}

/// Whether a box owns its compositing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum RepaintMode {
    /// The box is a repaint boundary: repainting it never repaints its parent.
    SelfRepaint,
    /// The box paints into its parent's surface.
    ParentRepaint,
}

impl RepaintMode {
    /// `SelfRepaint` when `repaint_self` is set.
    #[must_use]
    pub const fn from_flag(repaint_self: bool) -> Self {
        if repaint_self {
            Self::SelfRepaint
        } else {
            Self::ParentRepaint
        }
    }
}

/// The shape of a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BoxKind {
    /// Leaf content with an inherent size (media, embedded content).
    Intrinsic,
    /// A container box laid out by `LayoutVariant`.
    Layout(LayoutVariant),
    /// A zero-content marker holding an out-of-flow element's flow slot.
    Placeholder {
        /// The out-of-flow element this placeholder stands in for.
        shadow: NodeId,
    },
}

impl BoxKind {
    /// The layout variant, for container boxes.
    #[must_use]
    pub const fn variant(self) -> Option<LayoutVariant> {
        match self {
            Self::Layout(variant) => Some(variant),
            _ => None,
        }
    }

    /// Whether this box can host child boxes.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Layout(_))
    }
}

/// How far a change reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Invalidation {
    /// Nothing to redo.
    #[default]
    None,
    /// Repaint only; geometry is unchanged.
    Paint,
    /// Geometry may change.
    Layout,
}

/// What a flex item contributes to its container.
///
/// [CSS Flexbox § 7 Flexibility](https://www.w3.org/TR/css-flexbox-1/#flexibility)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexItemData {
    /// "flex-grow ... determines how much the flex item will grow relative to
    /// the rest of the flex items."
    pub grow: f32,
    /// "flex-shrink ... determines how much the flex item will shrink."
    pub shrink: f32,
    /// "flex-basis ... specifies the initial main size of the flex item."
    pub basis: Option<f32>,
    /// Cross-axis alignment override.
    pub align_self: Option<String>,
    /// Reordering key.
    pub order: i32,
}

impl Default for FlexItemData {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: None,
            align_self: None,
            order: 0,
        }
    }
}

/// Decoration and sizing state every box variant shares.
///
/// Converting a box to another variant or repaint mode carries this over
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStyle {
    /// The computed display.
    pub display: DisplayValue,
    /// The computed position.
    pub position: PositionType,
    /// `top`/`right`/`bottom`/`left`.
    pub offsets: BoxOffsets,
    /// `z-index`, `None` for `auto`.
    pub z_index: Option<i32>,
    /// Preferred content width.
    pub width: Option<f32>,
    /// Preferred content height.
    pub height: Option<f32>,
    /// `min-width`.
    pub min_width: Option<f32>,
    /// `min-height`.
    pub min_height: Option<f32>,
    /// `max-width`.
    pub max_width: Option<f32>,
    /// `max-height`.
    pub max_height: Option<f32>,
    /// Padding edges.
    pub padding: EdgeSizes,
    /// Margin edges.
    pub margin: EdgeSizes,
    /// Border widths.
    pub border: EdgeSizes,
    /// Horizontal overflow.
    pub overflow_x: Overflow,
    /// Vertical overflow.
    pub overflow_y: Overflow,
    /// `opacity` in `[0, 1]`.
    pub opacity: f32,
    /// `visibility` is not `hidden`/`collapse`.
    pub visible: bool,
    /// `content-visibility` is not `hidden`.
    pub content_visible: bool,
    /// `text-align`.
    pub text_align: Option<String>,
    /// `transform`, `None` when absent or `none`.
    pub transform: Option<String>,
    /// `transform-origin`.
    pub transform_origin: Option<String>,
    /// The committed `transition` value.
    pub transition: Option<String>,
    /// `filter`.
    pub filter: Option<String>,
    /// Paint-only decorations by property name.
    pub paint: BTreeMap<String, String>,
    /// Inherited text values applied to this box.
    pub text: BTreeMap<String, String>,
    /// Flex item data.
    pub flex_item: FlexItemData,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            display: DisplayValue::Block,
            position: PositionType::Static,
            offsets: BoxOffsets::default(),
            z_index: None,
            width: None,
            height: None,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            padding: EdgeSizes::default(),
            margin: EdgeSizes::default(),
            border: EdgeSizes::default(),
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            opacity: 1.0,
            visible: true,
            content_visible: true,
            text_align: None,
            transform: None,
            transform_origin: None,
            transition: None,
            filter: None,
            paint: BTreeMap::new(),
            text: BTreeMap::new(),
            flex_item: FlexItemData::default(),
        }
    }
}

impl BoxStyle {
    /// The overflow along `axis`.
    #[must_use]
    pub const fn overflow(&self, axis: Axis) -> Overflow {
        match axis {
            Axis::Vertical => self.overflow_y,
            Axis::Horizontal => self.overflow_x,
        }
    }

    /// Whether the box scrolls on either axis.
    #[must_use]
    pub const fn is_scroll_container(&self) -> bool {
        self.overflow_x.is_scrollable() || self.overflow_y.is_scrollable()
    }
}

/// [CSS Flexbox § 5](https://www.w3.org/TR/css-flexbox-1/#flow-order)
///
/// Flex container parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexContainerState {
    /// Main axis: `Horizontal` for `row`, `Vertical` for `column`.
    pub main_axis: Axis,
    /// Whether the main axis runs backwards.
    pub reverse: bool,
    /// `flex-wrap` is not `nowrap`.
    pub wrap: bool,
    /// `justify-content`.
    pub justify_content: String,
    /// `align-items`.
    pub align_items: String,
    /// `align-content`.
    pub align_content: String,
}

impl Default for FlexContainerState {
    fn default() -> Self {
        Self {
            main_axis: Axis::Horizontal,
            reverse: false,
            wrap: false,
            justify_content: "flex-start".to_string(),
            align_items: "stretch".to_string(),
            align_content: "normal".to_string(),
        }
    }
}

/// State that only one layout variant understands. Never migrated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VariantState {
    /// Leaves and placeholders.
    Leaf,
    /// Flow containers.
    Flow,
    /// Flex containers.
    Flex(FlexContainerState),
    /// Recycler lists scroll along one axis.
    Recycler {
        /// The list axis.
        axis: Axis,
    },
}

impl VariantState {
    /// Fresh state for a box kind.
    #[must_use]
    pub fn for_kind(kind: BoxKind) -> Self {
        match kind {
            BoxKind::Layout(LayoutVariant::Flow) => Self::Flow,
            BoxKind::Layout(LayoutVariant::Flex) => Self::Flex(FlexContainerState::default()),
            BoxKind::Layout(LayoutVariant::Recycler) => Self::Recycler {
                axis: Axis::Vertical,
            },
            BoxKind::Intrinsic | BoxKind::Placeholder { .. } => Self::Leaf,
        }
    }
}

/// A node in the render tree.
#[derive(Debug, Clone)]
pub struct RenderBox {
    /// The box's shape.
    pub kind: BoxKind,
    /// Whether the box is a repaint boundary.
    pub repaint: RepaintMode,
    /// The generating element, resolved through the document.
    pub owner: Option<NodeId>,
    /// Shared decoration state.
    pub style: BoxStyle,
    /// Variant-specific state.
    pub variant: VariantState,
    /// The box currently housing this one.
    pub parent: Option<BoxId>,
    /// Child boxes in paint order.
    pub children: Vec<BoxId>,
    /// Housed here as an absolute/fixed box rather than as a flow child.
    pub out_of_flow: bool,
    /// Layout offset of the border box within the parent's border box.
    pub offset: Point,
    /// Border-box size from the last layout.
    pub size: Size,
    /// Preferred content size for leaves and placeholders.
    pub preferred: Size,
    /// Paint-time override of `offset` applied by sticky positioning.
    pub sticky_offset: Option<Point>,
    /// Scroll position of this box's content.
    pub scroll: Point,
    /// Whether at least one layout pass completed.
    pub laid_out: bool,
    /// Geometry must be recomputed.
    pub needs_layout: bool,
    /// Pixels must be regenerated.
    pub needs_paint: bool,
}

impl RenderBox {
    /// A fresh, unattached box.
    #[must_use]
    pub fn new(kind: BoxKind, repaint: RepaintMode, owner: Option<NodeId>) -> Self {
        Self {
            kind,
            repaint,
            owner,
            style: BoxStyle::default(),
            variant: VariantState::for_kind(kind),
            parent: None,
            children: Vec::new(),
            out_of_flow: false,
            offset: Point::ZERO,
            size: Size::ZERO,
            preferred: Size::ZERO,
            sticky_offset: None,
            scroll: Point::ZERO,
            laid_out: false,
            needs_layout: true,
            needs_paint: true,
        }
    }

    /// A placeholder shadowing `shadow`, sized to `preferred`.
    #[must_use]
    pub fn placeholder(shadow: NodeId, preferred: Size) -> Self {
        let mut placeholder = Self::new(
            BoxKind::Placeholder { shadow },
            RepaintMode::ParentRepaint,
            None,
        );
        placeholder.preferred = preferred;
        placeholder
    }

    /// Where the box paints: the sticky override if any, else the layout offset.
    #[must_use]
    pub fn paint_offset(&self) -> Point {
        self.sticky_offset.unwrap_or(self.offset)
    }

    /// The layout variant, for container boxes.
    #[must_use]
    pub const fn layout_variant(&self) -> Option<LayoutVariant> {
        self.kind.variant()
    }

    /// Whether this box is a placeholder.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.kind, BoxKind::Placeholder { .. })
    }

    /// Size of the padding box (border box minus borders).
    #[must_use]
    pub fn client_size(&self) -> Size {
        Size {
            width: (self.size.width - self.style.border.horizontal()).max(0.0),
            height: (self.size.height - self.style.border.vertical()).max(0.0),
        }
    }
}
