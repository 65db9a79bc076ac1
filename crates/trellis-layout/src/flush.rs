//! Layout flush: settle every pending box size and offset on demand.
//!
//! Real layout algorithms are supplied by the embedder through
//! [`LayoutFlush`]. [`StackLayout`] is the reference implementation: it
//! stacks flow children vertically, lays flex rows out horizontally with
//! equal shares, and places out-of-flow boxes against their containing
//! block's padding box. It exists so geometry queries have something settled
//! to report.

use trellis_common::{Axis, EdgeSizes, Point, Size};
use trellis_style::PositionType;

use crate::render_box::{BoxId, BoxKind, RenderBox, VariantState};
use crate::tree::RenderTree;

/// Synchronously complete all pending layout below `root`.
///
/// Implementations must be safe to call when nothing is pending.
pub trait LayoutFlush {
    /// Lay out the tree rooted at `root` inside `viewport`.
    fn flush(&mut self, tree: &mut RenderTree, root: BoxId, viewport: Size);
}

/// Reference block-stacking layout.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    passes: usize,
}

impl StackLayout {
    /// A layout with no completed passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full passes performed so far.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }
}

impl LayoutFlush for StackLayout {
    fn flush(&mut self, tree: &mut RenderTree, root: BoxId, viewport: Size) {
        let Some(root_box) = tree.get(root) else {
            return;
        };
        if root_box.laid_out && !root_box.needs_layout {
            return;
        }

        self.passes += 1;
        log::debug!("layout pass {} from {root:?}", self.passes);
        let size = layout_box(tree, root, viewport.width);
        if let Some(root_box) = tree.get_mut(root) {
            root_box.offset = Point::ZERO;
            // [§ 10.1](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
            // "The containing block in which the root element lives is a
            // rectangle called the initial containing block."
            root_box.size = Size::new(size.width, size.height.max(viewport.height));
        }
    }
}

/// Box metrics copied out of the tree so children can be laid out while
/// the parent's values are still at hand.
#[derive(Debug, Clone, Copy)]
struct Frame {
    padding: EdgeSizes,
    border: EdgeSizes,
}

impl Frame {
    fn of(render_box: &RenderBox) -> Self {
        Self {
            padding: render_box.style.padding,
            border: render_box.style.border,
        }
    }

    fn horizontal(self) -> f32 {
        self.padding.horizontal() + self.border.horizontal()
    }

    fn vertical(self) -> f32 {
        self.padding.vertical() + self.border.vertical()
    }

    fn content_origin(self) -> Point {
        Point::new(
            self.border.left + self.padding.left,
            self.border.top + self.padding.top,
        )
    }
}

fn clamp(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let value = max.map_or(value, |max| value.min(max));
    min.map_or(value, |min| value.max(min)).max(0.0)
}

fn stack_axis(render_box: &RenderBox) -> Axis {
    match &render_box.variant {
        VariantState::Flex(state) => state.main_axis,
        VariantState::Recycler { axis } => *axis,
        VariantState::Flow | VariantState::Leaf => Axis::Vertical,
    }
}

/// Lay out `id` given the width its parent offers. Returns the border-box size.
fn layout_box(tree: &mut RenderTree, id: BoxId, available_width: f32) -> Size {
    let Some(render_box) = tree.get(id) else {
        return Size::ZERO;
    };
    if render_box.style.display.is_none() {
        collapse(tree, id);
        return Size::ZERO;
    }

    let frame = Frame::of(render_box);
    let style = render_box.style.clone();
    let axis = stack_axis(render_box);
    let preferred = render_box.preferred;
    let kind = render_box.kind;
    let size = match kind {
        BoxKind::Placeholder { .. } => preferred,
        BoxKind::Intrinsic => Size::new(
            preferred.width + frame.horizontal(),
            preferred.height + frame.vertical(),
        ),
        BoxKind::Layout(_) => {
            let content_width = clamp(
                style
                    .width
                    .unwrap_or(available_width - frame.horizontal()),
                style.min_width,
                style.max_width,
            );
            let extent = layout_in_flow(tree, id, axis, frame.content_origin(), content_width);
            let content_height = clamp(
                style.height.unwrap_or(extent),
                style.min_height,
                style.max_height,
            );
            let size = Size::new(
                content_width + frame.horizontal(),
                content_height + frame.vertical(),
            );
            layout_out_of_flow(tree, id, frame, size);
            size
        }
    };

    if let Some(render_box) = tree.get_mut(id) {
        render_box.size = size;
        render_box.laid_out = true;
        render_box.needs_layout = false;
    }
    size
}

/// Stack the in-flow children of `id` along `axis`. Returns the content
/// height they occupy.
fn layout_in_flow(
    tree: &mut RenderTree,
    id: BoxId,
    axis: Axis,
    origin: Point,
    content_width: f32,
) -> f32 {
    let children: Vec<BoxId> = tree
        .children(id)
        .iter()
        .copied()
        .filter(|&child| {
            tree.get(child)
                .is_some_and(|b| !b.out_of_flow && !b.style.display.is_none())
        })
        .collect();
    for child in tree.children(id).to_vec() {
        if tree.get(child).is_some_and(|b| b.style.display.is_none()) {
            collapse(tree, child);
        }
    }

    match axis {
        Axis::Vertical => {
            let mut cursor = 0.0;
            for child in children {
                let margin = margin_of(tree, child);
                let size = layout_box(tree, child, content_width - margin.horizontal());
                let offset = Point::new(origin.x + margin.left, origin.y + cursor + margin.top);
                place(tree, child, offset);
                cursor += margin.vertical() + size.height;
            }
            cursor
        }
        // [CSS Flexbox § 9.7](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
        // Flexible lengths are not resolved; each item gets an equal share.
        Axis::Horizontal => {
            #[allow(clippy::cast_precision_loss)]
            let share = content_width / children.len().max(1) as f32;
            let mut cursor = 0.0;
            let mut tallest: f32 = 0.0;
            for child in children {
                let margin = margin_of(tree, child);
                let size = layout_box(tree, child, share - margin.horizontal());
                let offset = Point::new(origin.x + cursor + margin.left, origin.y + margin.top);
                place(tree, child, offset);
                cursor += margin.horizontal() + size.width;
                tallest = tallest.max(size.height + margin.vertical());
            }
            tallest
        }
    }
}

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// "the containing block is formed by the padding edge of the ancestor."
fn layout_out_of_flow(tree: &mut RenderTree, id: BoxId, frame: Frame, size: Size) {
    let padding_box = Size::new(
        size.width - frame.border.horizontal(),
        size.height - frame.border.vertical(),
    );
    let children: Vec<BoxId> = tree
        .children(id)
        .iter()
        .copied()
        .filter(|&child| tree.get(child).is_some_and(|b| b.out_of_flow))
        .collect();

    for child in children {
        let Some(child_box) = tree.get(child) else {
            continue;
        };
        let offsets = child_box.style.offsets;
        let margin = child_box.style.margin;
        let child_size = layout_box(tree, child, padding_box.width - margin.horizontal());

        let x = match (offsets.left, offsets.right) {
            (Some(left), _) => frame.border.left + left + margin.left,
            (None, Some(right)) => {
                frame.border.left + padding_box.width - right - margin.right - child_size.width
            }
            // Static position: the top-left of the content box.
            (None, None) => frame.content_origin().x + margin.left,
        };
        let y = match (offsets.top, offsets.bottom) {
            (Some(top), _) => frame.border.top + top + margin.top,
            (None, Some(bottom)) => {
                frame.border.top + padding_box.height - bottom - margin.bottom - child_size.height
            }
            (None, None) => frame.content_origin().y + margin.top,
        };
        if let Some(child_box) = tree.get_mut(child) {
            child_box.offset = Point::new(x, y);
        }
    }
}

fn margin_of(tree: &RenderTree, id: BoxId) -> EdgeSizes {
    tree.get(id).map(|b| b.style.margin).unwrap_or_default()
}

/// Set the in-flow offset of `id`, shifted when it is relatively positioned.
fn place(tree: &mut RenderTree, id: BoxId, offset: Point) {
    if let Some(render_box) = tree.get_mut(id) {
        render_box.offset = if render_box.style.position == PositionType::Relative {
            offset.offset_by(render_box.style.offsets.relative_shift())
        } else {
            offset
        };
    }
}

/// [§ 9.2.4](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
///
/// "none: This value causes an element to not appear in the formatting
/// structure (i.e., in visual media the element generates no boxes and has
/// no effect on layout). Descendant elements do not generate any boxes
/// either."
fn collapse(tree: &mut RenderTree, id: BoxId) {
    let children = tree.children(id).to_vec();
    if let Some(render_box) = tree.get_mut(id) {
        render_box.offset = Point::ZERO;
        render_box.size = Size::ZERO;
        render_box.laid_out = true;
        render_box.needs_layout = false;
    }
    for child in children {
        collapse(tree, child);
    }
}
