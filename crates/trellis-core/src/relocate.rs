//! Housing element boxes in the render tree.
//!
//! [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
//!
//! Static, relative and sticky boxes live in their structural parent's box.
//! Absolute and fixed boxes live in their containing block's box, and a
//! placeholder keeps their slot in the parent's box so the flow position can
//! still be measured.

use trellis_common::Size;
use trellis_dom::NodeId;
use trellis_layout::{BoxId, BoxKind, RenderBox};
use trellis_style::{PositionType, computed_display, length_property};

use crate::Document;

impl Document {
    /// House `element`'s box under `parent`, after `after_sibling`'s flow
    /// slot (first when `None`), then attach its structural children.
    ///
    /// # Panics
    ///
    /// Panics if `element` was never initialised or is already attached, if
    /// `parent`'s box cannot host children, or if a sticky element does not
    /// own a layout box.
    pub fn attach(&mut self, element: NodeId, parent: NodeId, after_sibling: Option<NodeId>) {
        let Some(state) = self.states.get(&element) else {
            panic!("cannot attach element {element}: it was never initialised");
        };
        assert!(!state.attached, "element {element} is already attached");

        let position = self
            .elements
            .get(element)
            .map_or(PositionType::Static, |node| PositionType::of(&node.style));
        self.house(element, parent, after_sibling, position);
        let state = self.state_mut(element);
        state.position = position;
        state.attached = true;
        log::debug!("attached {element} ({position}) under {parent}");

        let children = self.elements.children(element).to_vec();
        let mut previous = None;
        for child in children {
            if self.states.get(&child).is_some_and(|s| !s.attached) {
                self.attach(child, element, previous);
            }
            previous = Some(child);
        }

        if position == PositionType::Sticky {
            self.layout_sticky(element);
        }
    }

    /// Take `element`'s subtree out of the render tree. Structural children
    /// are detached first. The element keeps its box for a later attach.
    ///
    /// Detaching an element that is not attached does nothing.
    ///
    /// # Panics
    ///
    /// Panics for the root element.
    pub fn detach(&mut self, element: NodeId) {
        assert!(element != self.root(), "the root element cannot be detached");
        if !self.is_attached(element) {
            log::trace!("detach of {element} ignored: not attached");
            return;
        }

        for child in self.elements.children(element).to_vec() {
            self.detach(child);
        }

        let state = self.state(element);
        let (render_box, placeholder) = (state.render_box, state.placeholder);
        let _ = self.boxes.remove(render_box);
        if let Some(placeholder) = placeholder {
            let _ = self.boxes.remove(placeholder);
            self.boxes.destroy(placeholder);
        }
        self.clear_sticky(element);

        let state = self.state_mut(element);
        state.placeholder = None;
        state.attached = false;
        log::debug!("detached {element}");
    }

    /// Re-home an attached element whose position changed from `previous` to
    /// `next`, then re-home every absolute descendant whose containing block
    /// moved.
    ///
    /// # Panics
    ///
    /// Panics if the element becomes sticky without a layout box, or if an
    /// out-of-flow element lost its placeholder.
    pub fn update_position(&mut self, element: NodeId, previous: PositionType, next: PositionType) {
        self.state_mut(element).position = next;
        if previous == next || !self.is_attached(element) {
            return;
        }
        log::debug!("{element} moves from {previous} to {next}");

        let render_box = self.state(element).render_box;
        match (previous.is_out_of_flow(), next.is_out_of_flow()) {
            (true, true) => {
                let _ = self.boxes.remove(render_box);
                self.house_out_of_flow(element);
            }
            (true, false) => {
                let Some(placeholder) = self.state_mut(element).placeholder.take() else {
                    panic!("out-of-flow element {element} has no placeholder");
                };
                let _ = self.boxes.remove(render_box);
                self.boxes.replace(placeholder, render_box);
                self.boxes.destroy(placeholder);
            }
            (false, true) => {
                let placeholder = self.new_placeholder(element);
                self.boxes.replace(render_box, placeholder);
                self.house_out_of_flow(element);
                self.state_mut(element).placeholder = Some(placeholder);
            }
            (false, false) => {}
        }

        if previous == PositionType::Sticky {
            self.clear_sticky(element);
        }
        if next == PositionType::Sticky {
            self.expect_layout_box(element);
            self.layout_sticky(element);
        }
        self.rehome_descendants(element);
    }

    /// Move every attached absolute descendant of `element` whose box is not
    /// housed by its containing block's box.
    pub(crate) fn rehome_descendants(&mut self, element: NodeId) {
        for descendant in self.elements.descendants(element) {
            let Some(state) = self.states.get(&descendant) else {
                continue;
            };
            if !state.attached || state.position != PositionType::Absolute {
                continue;
            }
            let render_box = state.render_box;
            let containing_block = self.find_containing_block(descendant);
            let housing = self.state(containing_block).render_box;
            if self.boxes.parent(render_box) != Some(housing) {
                let _ = self.boxes.remove(render_box);
                self.boxes.append(housing, render_box);
                self.mark_out_of_flow(render_box);
                log::debug!("re-homed {descendant} under containing block {containing_block}");
            }
        }
    }

    /// Refresh the placeholder size after `width`/`height`/`display` changed.
    pub(crate) fn refresh_placeholder(&mut self, element: NodeId) {
        let Some(placeholder) = self.placeholder_of(element) else {
            return;
        };
        let size = self.placeholder_size(element);
        if let Some(placeholder_box) = self.boxes.get_mut(placeholder) {
            placeholder_box.preferred = size;
        }
        self.boxes.mark_needs_layout(placeholder);
    }

    /// The box representing `sibling` in its parent's flow: its placeholder
    /// while out of flow, otherwise its own box.
    fn anchor_of(&self, sibling: NodeId) -> Option<BoxId> {
        let state = self.states.get(&sibling)?;
        if !state.attached {
            return None;
        }
        state.placeholder.or(Some(state.render_box))
    }

    /// The flow anchor of `after_sibling` or the nearest attached sibling
    /// before it, provided it is housed in `housing`.
    pub(crate) fn flow_anchor(&self, housing: BoxId, after_sibling: Option<NodeId>) -> Option<BoxId> {
        let mut candidate = after_sibling;
        while let Some(sibling) = candidate {
            if let Some(anchor) = self.anchor_of(sibling)
                && self.boxes.parent(anchor) == Some(housing)
            {
                return Some(anchor);
            }
            candidate = self.elements.prev_sibling(sibling);
        }
        None
    }

    fn house(
        &mut self,
        element: NodeId,
        parent: NodeId,
        after_sibling: Option<NodeId>,
        position: PositionType,
    ) {
        let render_box = self.state(element).render_box;
        let parent_box = self.state(parent).render_box;
        let anchor = self.flow_anchor(parent_box, after_sibling);

        match position {
            PositionType::Static | PositionType::Relative => {
                self.boxes.insert_after(parent_box, render_box, anchor);
            }
            // Sticky boxes stay in flow; the scroll engine only shifts where
            // they paint.
            PositionType::Sticky => {
                self.expect_layout_box(element);
                self.boxes.insert_after(parent_box, render_box, anchor);
            }
            PositionType::Absolute | PositionType::Fixed => {
                let placeholder = self.new_placeholder(element);
                self.boxes.insert_after(parent_box, placeholder, anchor);
                self.state_mut(element).placeholder = Some(placeholder);
                self.house_out_of_flow(element);
            }
        }
    }

    fn house_out_of_flow(&mut self, element: NodeId) {
        let containing_block = self.find_containing_block(element);
        let housing = self.state(containing_block).render_box;
        let render_box = self.state(element).render_box;
        self.boxes.append(housing, render_box);
        self.mark_out_of_flow(render_box);
    }

    fn mark_out_of_flow(&mut self, render_box: BoxId) {
        if let Some(housed) = self.boxes.get_mut(render_box) {
            housed.out_of_flow = true;
        }
    }

    fn new_placeholder(&mut self, element: NodeId) -> BoxId {
        let size = self.placeholder_size(element);
        self.boxes.alloc(RenderBox::placeholder(element, size))
    }

    /// The preferred size snapshot for `element`'s placeholder: its declared
    /// width and height, zero when unset, and always zero for inline boxes.
    fn placeholder_size(&self, element: NodeId) -> Size {
        let Some(node) = self.elements.get(element) else {
            return Size::ZERO;
        };
        let inline = computed_display(&node.style, &node.tag_name).is_ok_and(|d| d.is_inline());
        if inline {
            return Size::ZERO;
        }
        Size::new(
            length_property(&node.style, "width").unwrap_or(0.0),
            length_property(&node.style, "height").unwrap_or(0.0),
        )
    }

    /// # Panics
    ///
    /// Panics unless `element` owns a layout box.
    fn expect_layout_box(&self, element: NodeId) {
        let kind = self.boxes.get(self.state(element).render_box).map(|b| b.kind);
        assert!(
            matches!(kind, Some(BoxKind::Layout(_))),
            "sticky element {element} needs a layout box, found {kind:?}"
        );
    }
}
