//! Geometry queries and element properties.
//!
//! [CSSOM View § 6 Extensions to the Element Interface](https://drafts.csswg.org/cssom-view/#extension-to-the-element-interface)
//!
//! Every read flushes pending layout first so it reports settled geometry.
//! Elements that are not connected, or whose box is not housed, report zero.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};
use trellis_common::warning::warn_once;
use trellis_common::{Axis, Point, Rect, Size};
use trellis_dom::{NodeId, PropertyValue, TreeError};
use trellis_layout::{BoxId, RenderBox};
use trellis_style::PositionType;

use crate::{Document, DocumentError};

/// Computed geometry exposed as element properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Metric {
    /// Top border edge relative to the offset parent's padding edge.
    OffsetTop,
    /// Left border edge relative to the offset parent's padding edge.
    OffsetLeft,
    /// Border-box width.
    OffsetWidth,
    /// Border-box height.
    OffsetHeight,
    /// Padding-box width.
    ClientWidth,
    /// Padding-box height.
    ClientHeight,
    /// Left border width.
    ClientLeft,
    /// Top border width.
    ClientTop,
    /// Vertical scroll position.
    ScrollTop,
    /// Horizontal scroll position.
    ScrollLeft,
    /// Width of the scrollable content.
    ScrollWidth,
    /// Height of the scrollable content.
    ScrollHeight,
}

impl Metric {
    /// The scroll axis a writable metric controls.
    #[must_use]
    pub const fn scroll_axis(self) -> Option<Axis> {
        match self {
            Self::ScrollTop => Some(Axis::Vertical),
            Self::ScrollLeft => Some(Axis::Horizontal),
            _ => None,
        }
    }
}

impl Document {
    /// Run the layout flush over the whole render tree.
    pub fn flush_layout(&mut self) {
        let root = self.root_box();
        let viewport = self.config.viewport;
        self.flusher.flush(&mut self.boxes, root, viewport);
    }

    /// The border box of `element` in viewport coordinates.
    ///
    /// [CSSOM View § 6.1 getBoundingClientRect()](https://drafts.csswg.org/cssom-view/#dom-element-getboundingclientrect)
    #[must_use = "the query flushes layout; use flush_layout to only settle it"]
    pub fn bounding_client_rect(&mut self, element: NodeId) -> Rect {
        self.settled_box(element)
            .map(|render_box| self.boxes.global_rect(render_box))
            .unwrap_or_default()
    }

    /// Read a property. Geometry keys are computed; any other key reads the
    /// element's property bag.
    #[must_use = "the query flushes layout; use flush_layout to only settle it"]
    pub fn get_property(&mut self, element: NodeId, key: &str) -> Option<PropertyValue> {
        if !self.elements.contains(element) {
            return None;
        }
        if let Ok(metric) = Metric::from_str(key) {
            return Some(PropertyValue::from(self.metric(element, metric)));
        }
        self.elements
            .get(element)
            .and_then(|node| node.properties.get(key).cloned())
    }

    /// Write a property.
    ///
    /// `scrollTop`/`scrollLeft` scroll the element, clamped to its scroll
    /// range, and reposition sticky descendants. Other geometry keys are
    /// read-only and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Disposed`] if `element` is gone.
    pub fn set_property(
        &mut self,
        element: NodeId,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), DocumentError> {
        let value = value.into();
        if !self.elements.contains(element) {
            return Err(TreeError::Disposed(element).into());
        }
        if let Ok(metric) = Metric::from_str(key) {
            match metric.scroll_axis() {
                Some(axis) => self.scroll_to(element, axis, &value),
                None => warn_once("Document", &format!("ignored write to read-only {metric}")),
            }
            return Ok(());
        }
        if let Some(node) = self.elements.get_mut(element) {
            let _ = node.properties.set(key, value);
        }
        Ok(())
    }

    /// Remove a property from the element's bag. Geometry keys cannot be
    /// removed.
    pub fn remove_property(&mut self, element: NodeId, key: &str) -> Option<PropertyValue> {
        if Metric::from_str(key).is_ok() {
            warn_once("Document", &format!("ignored removal of computed {key}"));
            return None;
        }
        self.elements
            .get_mut(element)
            .and_then(|node| node.properties.remove(key))
    }

    /// Dispatch a synthetic click at the center of `element`.
    ///
    /// The click is delivered to `element` and then to each structural
    /// ancestor while that ancestor's box still contains the point, stopping
    /// after the root. Returns the elements that received it, target first.
    pub fn click(&mut self, element: NodeId) -> Vec<NodeId> {
        let Some(render_box) = self.settled_box(element) else {
            return Vec::new();
        };
        let point = self.boxes.global_rect(render_box).center();
        let mut delivered = vec![element];
        for ancestor in self.elements.ancestors(element) {
            let hit = self
                .box_of(ancestor)
                .is_some_and(|ancestor_box| self.boxes.hit_test(ancestor_box, point));
            if !hit {
                break;
            }
            delivered.push(ancestor);
        }
        log::debug!("click on {element} at ({}, {}) reached {delivered:?}", point.x, point.y);
        delivered
    }

    /// A pretty-printed JSON dump of the settled render tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Snapshot`] if serialization fails.
    pub fn render_tree_snapshot(&mut self) -> Result<String, DocumentError> {
        self.flush_layout();
        let snapshot = self.boxes.snapshot(self.root_box());
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// The box of `element` with layout flushed, or `None` when the element
    /// has no place in the rendered tree.
    fn settled_box(&mut self, element: NodeId) -> Option<BoxId> {
        if !self.elements.is_connected(element) || !self.is_attached(element) {
            return None;
        }
        self.flush_layout();
        self.box_of(element)
    }

    fn metric(&mut self, element: NodeId, metric: Metric) -> f32 {
        let Some(render_box) = self.settled_box(element) else {
            return 0.0;
        };
        let Some(target) = self.boxes.get(render_box) else {
            return 0.0;
        };
        match metric {
            Metric::OffsetTop => self.offset_from_parent(element, render_box).y,
            Metric::OffsetLeft => self.offset_from_parent(element, render_box).x,
            Metric::OffsetWidth => target.size.width,
            Metric::OffsetHeight => target.size.height,
            Metric::ClientWidth => target.client_size().width,
            Metric::ClientHeight => target.client_size().height,
            Metric::ClientLeft => target.style.border.left,
            Metric::ClientTop => target.style.border.top,
            Metric::ScrollTop => target.scroll.y,
            Metric::ScrollLeft => target.scroll.x,
            Metric::ScrollWidth => self.scroll_extent(target).width,
            Metric::ScrollHeight => self.scroll_extent(target).height,
        }
    }

    /// [CSSOM View § 6 offsetParent](https://drafts.csswg.org/cssom-view/#dom-htmlelement-offsetparent)
    ///
    /// The nearest positioned ancestor, else the root.
    fn offset_parent(&self, element: NodeId) -> NodeId {
        self.elements
            .ancestors(element)
            .find(|&ancestor| {
                self.elements
                    .get(ancestor)
                    .is_some_and(|node| PositionType::of(&node.style).is_positioned())
            })
            .unwrap_or_else(|| self.root())
    }

    fn offset_from_parent(&self, element: NodeId, render_box: BoxId) -> Point {
        let position = self.boxes.global_position(render_box);
        if element == self.root() {
            return position;
        }
        let Some(parent_box) = self.box_of(self.offset_parent(element)) else {
            return position;
        };
        let border = self
            .boxes
            .get(parent_box)
            .map(|b| b.style.border)
            .unwrap_or_default();
        position
            .minus(self.boxes.global_position(parent_box))
            .minus(Point::new(border.left, border.top))
    }

    /// The padding box, grown to cover every child box.
    fn scroll_extent(&self, target: &RenderBox) -> Size {
        let client = target.client_size();
        let border = target.style.border;
        let padding = target.style.padding;
        target
            .children
            .iter()
            .filter_map(|&child| self.boxes.get(child))
            .fold(client, |extent, child| Size {
                width: extent
                    .width
                    .max(child.offset.x + child.size.width - border.left + padding.right),
                height: extent
                    .height
                    .max(child.offset.y + child.size.height - border.top + padding.bottom),
            })
    }

    #[allow(clippy::cast_possible_truncation)]
    fn scroll_to(&mut self, element: NodeId, axis: Axis, value: &PropertyValue) {
        let requested = match value {
            PropertyValue::Number(n) => Some(*n as f32),
            PropertyValue::Str(s) => s.trim().parse::<f32>().ok(),
            PropertyValue::Bool(_) => None,
        };
        let Some(requested) = requested else {
            warn_once("Document", &format!("ignored non-numeric scroll position {value}"));
            return;
        };
        let Some(render_box) = self.settled_box(element) else {
            return;
        };
        let Some(target) = self.boxes.get(render_box) else {
            return;
        };
        let range = (self.scroll_extent(target).along(axis) - target.client_size().along(axis)).max(0.0);
        self.on_scroll(element, requested.clamp(0.0, range), axis);
    }
}
