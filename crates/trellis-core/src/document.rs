//! The document: element tree, render tree, and the bindings between them.
//!
//! A [`Document`] is the tree context every operation runs against. It owns
//! the element arena, the render-box arena, and one [`ElementState`] per
//! element recording which box the element currently owns. Boxes name their
//! element by [`NodeId`]; elements find their box through the state table.

use std::collections::HashMap;

use trellis_common::Size;
use trellis_dom::{ElementTree, NodeId, StyleDeclaration, TreeError};
use trellis_layout::{
    BoxFactory, BoxId, BoxRequest, DefaultBoxFactory, LayoutFlush, RenderTree, RepaintMode,
    StackLayout, sync_box,
};
use trellis_style::{PositionType, is_scroll_container};

use crate::DocumentError;
use crate::frame::FrameScheduler;
use crate::sticky::{StickyCache, StickyStatus};

/// Document-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    /// Size of the initial containing block.
    pub viewport: Size,
    /// Tag name of the root element.
    pub root_tag: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            root_tag: "html".to_string(),
        }
    }
}

/// Per-element render binding.
#[derive(Debug, Clone)]
pub(crate) struct ElementState {
    /// The box the element currently owns.
    pub(crate) render_box: BoxId,
    /// Flow-slot marker while the element is absolute or fixed.
    pub(crate) placeholder: Option<BoxId>,
    /// The position the element was last housed for.
    pub(crate) position: PositionType,
    /// Whether the box is housed in the render tree.
    pub(crate) attached: bool,
    pub(crate) sticky: StickyCache,
    pub(crate) sticky_status: StickyStatus,
}

impl ElementState {
    fn new(render_box: BoxId) -> Self {
        Self {
            render_box,
            placeholder: None,
            position: PositionType::Static,
            attached: false,
            sticky: StickyCache::default(),
            sticky_status: StickyStatus::default(),
        }
    }
}

/// A document instance.
pub struct Document {
    pub(crate) elements: ElementTree,
    pub(crate) boxes: RenderTree,
    pub(crate) factory: Box<dyn BoxFactory>,
    pub(crate) flusher: Box<dyn LayoutFlush>,
    pub(crate) frames: FrameScheduler,
    pub(crate) states: HashMap<NodeId, ElementState>,
    pub(crate) config: DocumentConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

impl Document {
    /// A document with the default box factory and the reference layout.
    #[must_use]
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(DefaultBoxFactory),
            Box::new(StackLayout::new()),
        )
    }

    /// A document using the given box factory and layout flush.
    #[must_use]
    pub fn with_parts(
        config: DocumentConfig,
        factory: Box<dyn BoxFactory>,
        flusher: Box<dyn LayoutFlush>,
    ) -> Self {
        let mut document = Self {
            elements: ElementTree::new(&config.root_tag),
            boxes: RenderTree::new(),
            factory,
            flusher,
            frames: FrameScheduler::default(),
            states: HashMap::new(),
            config,
        };
        let root = document.elements.root();
        let root_box = document.build_box(root, RepaintMode::SelfRepaint);
        let mut state = ElementState::new(root_box);
        state.attached = true;
        let _ = document.states.insert(root, state);
        log::debug!("created document with root box {root_box:?}");
        document
    }

    /// The configuration the document was built with.
    #[must_use]
    pub const fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The element tree.
    #[must_use]
    pub const fn elements(&self) -> &ElementTree {
        &self.elements
    }

    /// The render tree.
    #[must_use]
    pub const fn boxes(&self) -> &RenderTree {
        &self.boxes
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.elements.root()
    }

    /// The root element's box.
    ///
    /// # Panics
    ///
    /// Panics if the root binding is missing, which cannot happen for a
    /// document built through [`Document::new`].
    #[must_use]
    pub fn root_box(&self) -> BoxId {
        self.state(self.root()).render_box
    }

    /// Create a disconnected element with a fresh box.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let id = self.elements.alloc(tag_name);
        let render_box = self.build_box(id, RepaintMode::ParentRepaint);
        let _ = self.states.insert(id, ElementState::new(render_box));
        id
    }

    /// Dispose of `element` and its whole subtree.
    ///
    /// The element is detached and unlinked first. Queued edits elsewhere
    /// that still name a disposed element are dropped when replayed.
    ///
    /// # Errors
    ///
    /// Fails for the root element and for elements already disposed.
    pub fn dispose(&mut self, element: NodeId) -> Result<(), DocumentError> {
        if element == self.root() {
            return Err(TreeError::RootImmovable.into());
        }
        if !self.elements.contains(element) {
            return Err(TreeError::Disposed(element).into());
        }

        self.detach(element);
        if let Some(parent) = self.elements.parent(element) {
            self.elements.unlink_child(parent, element)?;
        }

        let mut subtree = vec![element];
        subtree.extend(self.elements.descendants(element));
        for id in subtree.into_iter().rev() {
            if let Some(state) = self.states.remove(&id)
                && self.boxes.contains(state.render_box)
            {
                self.boxes.destroy(state.render_box);
            }
            let _ = self.elements.free(id)?;
        }
        log::debug!("disposed element {element}");
        Ok(())
    }

    /// The box `element` currently owns.
    #[must_use]
    pub fn box_of(&self, element: NodeId) -> Option<BoxId> {
        self.states.get(&element).map(|s| s.render_box)
    }

    /// The placeholder holding `element`'s flow slot, while it is out of flow.
    #[must_use]
    pub fn placeholder_of(&self, element: NodeId) -> Option<BoxId> {
        self.states.get(&element).and_then(|s| s.placeholder)
    }

    /// Whether `element`'s box is housed in the render tree.
    #[must_use]
    pub fn is_attached(&self, element: NodeId) -> bool {
        self.states.get(&element).is_some_and(|s| s.attached)
    }

    /// The element's inline style.
    #[must_use]
    pub fn style(&self, element: NodeId) -> Option<&StyleDeclaration> {
        self.elements.get(element).map(|n| &n.style)
    }

    /// The position `element` is currently housed for.
    #[must_use]
    pub fn position_of(&self, element: NodeId) -> Option<PositionType> {
        self.states.get(&element).map(|s| s.position)
    }

    /// Set an author style property and dispatch the change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Disposed`] if `element` is gone.
    pub fn set_style(&mut self, element: NodeId, name: &str, value: &str) -> Result<(), DocumentError> {
        let node = self
            .elements
            .get_mut(element)
            .ok_or(TreeError::Disposed(element))?;
        if let Some(change) = node.style.set(name, value) {
            self.on_property_changed(element, &change);
        }
        Ok(())
    }

    /// Set a style property from an animation and dispatch the change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Disposed`] if `element` is gone.
    pub fn set_animated_style(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        let node = self
            .elements
            .get_mut(element)
            .ok_or(TreeError::Disposed(element))?;
        if let Some(change) = node.style.set_animated(name, value) {
            self.on_property_changed(element, &change);
        }
        Ok(())
    }

    /// Remove a style property and dispatch the change.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Disposed`] if `element` is gone.
    pub fn remove_style(&mut self, element: NodeId, name: &str) -> Result<(), DocumentError> {
        let node = self
            .elements
            .get_mut(element)
            .ok_or(TreeError::Disposed(element))?;
        if let Some(change) = node.style.remove(name) {
            self.on_property_changed(element, &change);
        }
        Ok(())
    }

    /// The binding of `element`.
    ///
    /// # Panics
    ///
    /// Panics if the element was never initialised or has been disposed.
    pub(crate) fn state(&self, element: NodeId) -> &ElementState {
        match self.states.get(&element) {
            Some(state) => state,
            None => panic!("element {element} was never initialised"),
        }
    }

    pub(crate) fn state_mut(&mut self, element: NodeId) -> &mut ElementState {
        match self.states.get_mut(&element) {
            Some(state) => state,
            None => panic!("element {element} was never initialised"),
        }
    }

    /// The repaint mode `element`'s style asks for: the root, fixed boxes and
    /// scroll containers own their compositing surface.
    pub(crate) fn requested_repaint(&self, element: NodeId) -> RepaintMode {
        if element == self.root() {
            return RepaintMode::SelfRepaint;
        }
        let Some(node) = self.elements.get(element) else {
            return RepaintMode::ParentRepaint;
        };
        RepaintMode::from_flag(
            PositionType::of(&node.style) == PositionType::Fixed
                || is_scroll_container(&node.style),
        )
    }

    fn build_box(&mut self, element: NodeId, repaint: RepaintMode) -> BoxId {
        let Some(node) = self.elements.get(element) else {
            panic!("element {element} was never initialised");
        };
        let request = BoxRequest {
            owner: element,
            element: node.kind,
            tag_name: &node.tag_name,
            repaint,
            style: &node.style,
            placement: None,
        };
        sync_box(&mut self.boxes, self.factory.as_ref(), &request, None)
    }

    /// Re-run the synchronizer for `element` after its display or repaint
    /// mode may have changed. A replacement box takes the old box's slot.
    pub(crate) fn rebuild_box(&mut self, element: NodeId) {
        let repaint = self.requested_repaint(element);
        let previous = self.state(element).render_box;
        let placement = self.replacement_placement(element);
        let Some(node) = self.elements.get(element) else {
            return;
        };
        let request = BoxRequest {
            owner: element,
            element: node.kind,
            tag_name: &node.tag_name,
            repaint,
            style: &node.style,
            placement,
        };
        let render_box = sync_box(&mut self.boxes, self.factory.as_ref(), &request, Some(previous));
        if render_box != previous {
            self.state_mut(element).render_box = render_box;
        }
    }

    /// Where a replacement for `element`'s box goes in its housing box.
    ///
    /// In-flow boxes follow the flow anchor of their nearest preceding
    /// sibling. Out-of-flow boxes keep their position among the boxes of
    /// their containing block.
    fn replacement_placement(&self, element: NodeId) -> Option<BoxId> {
        let state = self.state(element);
        let housing = self.boxes.parent(state.render_box)?;
        if state.placeholder.is_some() {
            let index = self.boxes.index_in_parent(state.render_box)?;
            return index
                .checked_sub(1)
                .and_then(|i| self.boxes.children(housing).get(i).copied());
        }
        self.flow_anchor(housing, self.elements.prev_sibling(element))
    }
}
