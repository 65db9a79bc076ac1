//! Scroll-linked sticky positioning.
//!
//! [CSS Positioned Layout 3 § 3.4 Sticky positioning](https://www.w3.org/TR/css-position-3/#stickypos-insets)
//!
//! "For each side of the box, if the corresponding inset property is not
//! auto, and the corresponding border edge of the box would be outside the
//! corresponding edge of the sticky view rectangle, then the box must be
//! visually shifted (as for relative positioning) to be inward of that
//! sticky view rectangle edge, insofar as it can while its position box
//! remains contained within its containing block."
//!
//! Sticky boxes are laid out in flow. Scrolling only moves where they paint,
//! so every update here raises `needs_paint` and never `needs_layout`.

use serde::Serialize;
use strum_macros::Display;
use trellis_common::{Axis, Point};
use trellis_dom::NodeId;
use trellis_style::{BoxOffsets, PositionType, is_scroll_container};

use crate::Document;

/// Geometry snapshots taken the first time an element is made sticky after
/// being attached. Reset on detach.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StickyCache {
    /// Position relative to the scroll container's content origin,
    /// independent of how far the container is scrolled.
    pub offset_to_container: Option<Point>,
    /// In-flow offset within the parent box.
    pub original_offset: Option<Point>,
}

/// Whether a sticky element is currently held at its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StickyStatus {
    /// At its flow position.
    #[default]
    Relative,
    /// Shifted to stay inside the scrollport.
    Fixed,
}

impl Document {
    /// Handle `container` scrolling to `scroll_offset` along `axis`.
    ///
    /// Stores the offset on the container's box and updates every sticky
    /// descendant with an inset on that axis. Nested scroll containers are
    /// not entered: their own scroll events position their sticky children.
    pub fn on_scroll(&mut self, container: NodeId, scroll_offset: f32, axis: Axis) {
        let Some(container_box) = self.box_of(container) else {
            return;
        };
        if let Some(scroller) = self.boxes.get_mut(container_box) {
            scroller.scroll = scroller.scroll.with(axis, scroll_offset);
        }
        self.boxes.mark_needs_paint(container_box);
        log::trace!("{container} scrolled to {scroll_offset} ({axis})");

        for element in self.sticky_descendants(container, axis) {
            self.apply_sticky(element, container, axis);
        }
    }

    /// The sticky cache of `element`.
    #[must_use]
    pub fn sticky_cache(&self, element: NodeId) -> Option<StickyCache> {
        self.states.get(&element).map(|s| s.sticky)
    }

    /// The sticky status of `element`.
    #[must_use]
    pub fn sticky_status(&self, element: NodeId) -> Option<StickyStatus> {
        self.states.get(&element).map(|s| s.sticky_status)
    }

    /// The nearest ancestor that scrolls, else the root.
    #[must_use]
    pub fn scroll_container_of(&self, element: NodeId) -> NodeId {
        self.elements
            .ancestors(element)
            .find(|&ancestor| {
                self.elements
                    .get(ancestor)
                    .is_some_and(|node| is_scroll_container(&node.style))
            })
            .unwrap_or_else(|| self.root())
    }

    /// Position a freshly attached or re-styled sticky element against its
    /// scroll container on both axes.
    ///
    /// Offsets need settled sizes, so pending layout is flushed first. The
    /// flush returns at once when nothing under the root is dirty.
    pub(crate) fn layout_sticky(&mut self, element: NodeId) {
        let render_box = self.state(element).render_box;
        self.flush_layout();

        // Start from the flow position; axes without an inset stay there.
        if let Some(sticky) = self.boxes.get_mut(render_box) {
            sticky.sticky_offset = None;
        }
        let container = self.scroll_container_of(element);
        let offsets = self.offsets_of(element);
        for axis in [Axis::Vertical, Axis::Horizontal] {
            if offsets.has_edge(axis) {
                self.apply_sticky(element, container, axis);
            }
        }
    }

    /// Forget everything the sticky engine knows about `element`.
    pub(crate) fn clear_sticky(&mut self, element: NodeId) {
        let state = self.state_mut(element);
        state.sticky = StickyCache::default();
        state.sticky_status = StickyStatus::Relative;
        let render_box = state.render_box;
        if let Some(sticky) = self.boxes.get_mut(render_box)
            && sticky.sticky_offset.take().is_some()
        {
            self.boxes.mark_needs_paint(render_box);
        }
    }

    fn offsets_of(&self, element: NodeId) -> BoxOffsets {
        self.elements
            .get(element)
            .map(|node| BoxOffsets::from_style(&node.style))
            .unwrap_or_default()
    }

    fn sticky_descendants(&self, container: NodeId, axis: Axis) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.elements.children(container).iter().rev().copied().collect();
        while let Some(candidate) = stack.pop() {
            let Some(node) = self.elements.get(candidate) else {
                continue;
            };
            if self.is_attached(candidate)
                && PositionType::of(&node.style) == PositionType::Sticky
                && BoxOffsets::from_style(&node.style).has_edge(axis)
            {
                found.push(candidate);
            }
            if !is_scroll_container(&node.style) {
                stack.extend(self.elements.children(candidate).iter().rev().copied());
            }
        }
        found
    }

    /// Recompute `element`'s paint offset along `axis`.
    fn apply_sticky(&mut self, element: NodeId, container: NodeId, axis: Axis) {
        let render_box = self.state(element).render_box;
        let container_box = self.state(container).render_box;
        let (Some(sticky), Some(scroller)) = (self.boxes.get(render_box), self.boxes.get(container_box))
        else {
            return;
        };

        // Snapshot both geometries the first time; they survive until detach.
        let cache = self.state(element).sticky;
        let offset_to_container = cache.offset_to_container.unwrap_or_else(|| {
            self.boxes
                .global_position(render_box)
                .minus(self.boxes.global_position(container_box))
                .offset_by(scroller.scroll)
        });
        let original_offset = cache.original_offset.unwrap_or(sticky.offset);

        let offsets = self.offsets_of(element);
        let scroll = scroller.scroll.along(axis);
        let padding = scroller.style.padding;
        let scrollport = scroller.client_size().along(axis);
        let size = sticky.size.along(axis);
        let parent_size = sticky
            .parent
            .and_then(|parent| self.boxes.get(parent))
            .map_or(0.0, |parent| parent.size.along(axis));
        let raw = offset_to_container.along(axis) - scroll;
        let origin = original_offset.along(axis);

        // `top`/`left` win over `bottom`/`right`.
        let shifted = if let Some(start) = offsets.start(axis) {
            let threshold = start + padding.start(axis);
            (raw < threshold).then(|| origin + (threshold - raw))
        } else if let Some(end) = offsets.end(axis) {
            let threshold = scrollport - padding.end(axis) - end - size;
            (raw > threshold).then(|| origin + (threshold - raw))
        } else {
            return;
        };

        let (offset, status) = match shifted {
            Some(offset) => (
                offset.clamp(0.0, (parent_size - size).max(0.0)),
                StickyStatus::Fixed,
            ),
            None => (origin, StickyStatus::Relative),
        };

        let state = self.state_mut(element);
        state.sticky = StickyCache {
            offset_to_container: Some(offset_to_container),
            original_offset: Some(original_offset),
        };
        if state.sticky_status != status {
            log::debug!("sticky {element} is now {status} on {axis}");
            state.sticky_status = status;
        }
        if let Some(sticky) = self.boxes.get_mut(render_box) {
            sticky.sticky_offset = Some(sticky.paint_offset().with(axis, offset));
        }
        self.boxes.mark_needs_paint(render_box);
    }
}
