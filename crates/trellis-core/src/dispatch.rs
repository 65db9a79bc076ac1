//! Style-change dispatch.
//!
//! Every committed style write arrives here once. The property name picks one
//! [`PropertyCategory`]; the category picks the narrowest handler. Inherited
//! text properties additionally fan out to descendant text, so a single write
//! runs at most two handlers.

use trellis_dom::{NodeId, StyleChange};
use trellis_layout::capability::{self, Capability, Sizing, TextInherit};
use trellis_layout::{BoxId, Invalidation};
use trellis_style::{PositionType, PropertyCategory, fans_out_to_text, is_transform_value};

use crate::Document;
use crate::frame::DeferredTask;

impl Document {
    /// Route one committed style write.
    pub(crate) fn on_property_changed(&mut self, element: NodeId, change: &StyleChange) {
        log::trace!(
            "{element}: {} '{}' -> '{}'{}",
            change.name,
            change.old,
            change.new,
            if change.is_animation { " (animated)" } else { "" }
        );
        let Some(category) = PropertyCategory::classify(&change.name) else {
            return;
        };

        match category {
            PropertyCategory::Display => self.on_display_changed(element),
            PropertyCategory::Transition => {
                self.frames.schedule(DeferredTask::CommitTransition { element });
            }
            // The text fan-out below starts at the element itself.
            PropertyCategory::TextInheritable => {}
            _ => {
                self.apply_capability(element, category, change);
                match category {
                    PropertyCategory::Position if change.name == "position" => {
                        self.on_position_changed(element);
                    }
                    PropertyCategory::Offset => self.on_offset_changed(element),
                    PropertyCategory::Overflow => self.rebuild_box(element),
                    PropertyCategory::Transform if change.name == "transform" => {
                        self.on_transform_changed(element, change);
                    }
                    PropertyCategory::Size => self.refresh_placeholder(element),
                    _ => {}
                }
            }
        }

        if fans_out_to_text(&change.name) {
            self.fan_out_text(element, change);
        }
    }

    fn apply_capability(&mut self, element: NodeId, category: PropertyCategory, change: &StyleChange) {
        let Some(capability) = capability::for_category(category) else {
            return;
        };
        let Some(render_box) = self.box_of(element) else {
            return;
        };
        let (Some(node), Some(target)) = (self.elements.get(element), self.boxes.get_mut(render_box))
        else {
            return;
        };
        let invalidation = capability.apply(target, &node.style, &change.name, &change.new);
        self.invalidate(render_box, invalidation);
    }

    fn invalidate(&mut self, render_box: BoxId, invalidation: Invalidation) {
        match invalidation {
            Invalidation::Layout => self.boxes.mark_needs_layout(render_box),
            Invalidation::Paint => self.boxes.mark_needs_paint(render_box),
            Invalidation::None => {}
        }
    }

    /// A display change may swap the box; the new box then needs the size
    /// effects re-applied before any geometry is read.
    fn on_display_changed(&mut self, element: NodeId) {
        self.rebuild_box(element);
        let Some(render_box) = self.box_of(element) else {
            return;
        };
        if let (Some(node), Some(target)) = (self.elements.get(element), self.boxes.get_mut(render_box)) {
            for (name, value) in node.style.iter() {
                if matches!(
                    PropertyCategory::classify(name),
                    Some(PropertyCategory::Size | PropertyCategory::Padding | PropertyCategory::Margin)
                ) {
                    let _ = Sizing.apply(target, &node.style, name, value);
                }
            }
        }
        self.boxes.mark_needs_layout(render_box);
        self.refresh_placeholder(element);
    }

    /// Position changes may flip the repaint mode (fixed boxes repaint
    /// themselves) and always re-home the element.
    fn on_position_changed(&mut self, element: NodeId) {
        let Some(node) = self.elements.get(element) else {
            return;
        };
        let next = PositionType::of(&node.style);
        let previous = self.state(element).position;
        self.rebuild_box(element);
        self.update_position(element, previous, next);
    }

    fn on_offset_changed(&mut self, element: NodeId) {
        if self.is_attached(element) && self.state(element).position == PositionType::Sticky {
            self.layout_sticky(element);
        }
    }

    /// Gaining or losing a transform changes whether the element is a
    /// containing block for its positioned descendants.
    fn on_transform_changed(&mut self, element: NodeId, change: &StyleChange) {
        if is_transform_value(&change.old) != is_transform_value(&change.new)
            && self.is_attached(element)
        {
            self.rehome_descendants(element);
        }
    }

    /// Re-apply an inherited text value to the element and every descendant
    /// that does not declare the property itself.
    fn fan_out_text(&mut self, element: NodeId, change: &StyleChange) {
        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            let Some(node) = self.elements.get(current) else {
                continue;
            };
            if current != element && node.style.contains(&change.name) {
                continue;
            }
            stack.extend(node.children.iter().rev().copied());
            let Some(render_box) = self.states.get(&current).map(|s| s.render_box) else {
                continue;
            };
            let Some(target) = self.boxes.get_mut(render_box) else {
                continue;
            };
            let invalidation = TextInherit.apply(target, &node.style, &change.name, &change.new);
            self.invalidate(render_box, invalidation);
        }
    }
}
