//! Arena-based render tree.
//!
//! Boxes are stored in a vector and addressed by [`BoxId`]; a parent box owns
//! the ids in its `children` list. Destroyed slots are never reused.

use serde::Serialize;
use trellis_common::{Point, Rect};
use trellis_dom::NodeId;

use crate::render_box::{BoxId, BoxKind, RenderBox, RepaintMode};

/// Serializable view of a box subtree.
#[derive(Debug, Clone, Serialize)]
pub struct BoxSnapshot {
    /// The box id.
    pub id: BoxId,
    /// The box's shape.
    pub kind: BoxKind,
    /// Its repaint mode.
    pub repaint: RepaintMode,
    /// The generating element.
    pub owner: Option<NodeId>,
    /// Housed as an out-of-flow box.
    pub out_of_flow: bool,
    /// Paint rectangle relative to the parent.
    pub rect: Rect,
    /// Child snapshots.
    pub children: Vec<BoxSnapshot>,
}

/// The render tree.
#[derive(Debug, Clone, Default)]
pub struct RenderTree {
    boxes: Vec<Option<RenderBox>>,
}

impl RenderTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a box and return its id.
    pub fn alloc(&mut self, render_box: RenderBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(Some(render_box));
        id
    }

    /// Get a box.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&RenderBox> {
        self.boxes.get(id.0).and_then(Option::as_ref)
    }

    /// Get a box mutably.
    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut RenderBox> {
        self.boxes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Whether `id` is a live box.
    #[must_use]
    pub fn contains(&self, id: BoxId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether the tree holds no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every live box id.
    pub fn ids(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| BoxId(index))
    }

    /// The housing parent of a box.
    #[must_use]
    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.get(id).and_then(|b| b.parent)
    }

    /// The children of a box.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        self.get(id).map(|b| b.children.as_slice()).unwrap_or(&[])
    }

    /// Position of `child` among its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, child: BoxId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    fn live(&self, id: BoxId) -> &RenderBox {
        match self.get(id) {
            Some(render_box) => render_box,
            None => panic!("render box {id:?} has been destroyed"),
        }
    }

    fn live_mut(&mut self, id: BoxId) -> &mut RenderBox {
        match self.get_mut(id) {
            Some(render_box) => render_box,
            None => panic!("render box {id:?} has been destroyed"),
        }
    }

    /// Insert `child` into `parent` right after `after`, or as the first child.
    ///
    /// # Panics
    ///
    /// Panics if `child` is already housed, if `parent` cannot host children,
    /// or if `after` is not a child of `parent`.
    pub fn insert_after(&mut self, parent: BoxId, child: BoxId, after: Option<BoxId>) {
        let index = match after {
            Some(after) => match self.children(parent).iter().position(|&c| c == after) {
                Some(position) => position + 1,
                None => panic!("{after:?} is not a child of {parent:?}"),
            },
            None => 0,
        };
        self.insert_at(parent, child, index);
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Same preconditions as [`RenderTree::insert_after`].
    pub fn append(&mut self, parent: BoxId, child: BoxId) {
        let index = self.children(parent).len();
        self.insert_at(parent, child, index);
    }

    /// Insert `child` at `index` among `parent`'s children.
    ///
    /// # Panics
    ///
    /// Panics if `child` is already housed or `parent` cannot host children.
    pub fn insert_at(&mut self, parent: BoxId, child: BoxId, index: usize) {
        assert!(
            self.live(parent).kind.is_container(),
            "{parent:?} ({:?}) cannot host child boxes",
            self.live(parent).kind
        );
        if let Some(existing) = self.live(child).parent {
            panic!("{child:?} is already housed in {existing:?}");
        }

        let parent_box = self.live_mut(parent);
        let index = index.min(parent_box.children.len());
        parent_box.children.insert(index, child);
        self.live_mut(child).parent = Some(parent);
        log::trace!("inserted {child:?} into {parent:?} at {index}");
        self.mark_needs_layout(parent);
    }

    /// Detach `child` from the box housing it. Returns the former parent.
    ///
    /// # Panics
    ///
    /// Panics if `child` has no parent: detaching an unhoused box is a
    /// programming error.
    pub fn remove(&mut self, child: BoxId) -> BoxId {
        let Some(parent) = self.live(child).parent else {
            panic!("cannot detach {child:?}: it has no parent box");
        };
        self.live_mut(parent).children.retain(|&c| c != child);
        let child_box = self.live_mut(child);
        child_box.parent = None;
        child_box.out_of_flow = false;
        log::trace!("removed {child:?} from {parent:?}");
        self.mark_needs_layout(parent);
        parent
    }

    /// Put `replacement` where `old` is, detaching `old`.
    ///
    /// The out-of-flow flag moves with the slot.
    ///
    /// # Panics
    ///
    /// Panics if `old` has no parent or `replacement` is already housed.
    pub fn replace(&mut self, old: BoxId, replacement: BoxId) {
        let Some(index) = self.index_in_parent(old) else {
            panic!("cannot replace {old:?}: it has no parent box");
        };
        let out_of_flow = self.live(old).out_of_flow;
        let parent = self.remove(old);
        self.insert_at(parent, replacement, index);
        self.live_mut(replacement).out_of_flow = out_of_flow;
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn migrate_children(&mut self, from: BoxId, to: BoxId) {
        let children = std::mem::take(&mut self.live_mut(from).children);
        for &child in &children {
            self.live_mut(child).parent = Some(to);
        }
        self.live_mut(to).children.extend(children);
        self.mark_needs_layout(to);
    }

    /// Free a single box. It must be unhoused and childless.
    ///
    /// # Panics
    ///
    /// Panics if the box is still housed or still has children.
    pub fn destroy(&mut self, id: BoxId) {
        let render_box = self.live(id);
        assert!(
            render_box.parent.is_none(),
            "{id:?} must be detached before it is destroyed"
        );
        assert!(
            render_box.children.is_empty(),
            "{id:?} must hand over its children before it is destroyed"
        );
        self.boxes[id.0] = None;
        log::trace!("destroyed {id:?}");
    }

    /// Mark `id` and every ancestor as needing layout.
    pub fn mark_needs_layout(&mut self, id: BoxId) {
        let mut current = Some(id);
        while let Some(box_id) = current {
            let Some(render_box) = self.get_mut(box_id) else {
                return;
            };
            render_box.needs_layout = true;
            render_box.needs_paint = true;
            current = render_box.parent;
        }
    }

    /// Mark `id` as needing paint, up to the nearest repaint boundary.
    pub fn mark_needs_paint(&mut self, id: BoxId) {
        let mut current = Some(id);
        while let Some(box_id) = current {
            let Some(render_box) = self.get_mut(box_id) else {
                return;
            };
            render_box.needs_paint = true;
            if render_box.repaint == RepaintMode::SelfRepaint {
                return;
            }
            current = render_box.parent;
        }
    }

    /// Whether any box still waits for layout.
    #[must_use]
    pub fn has_pending_layout(&self) -> bool {
        self.boxes
            .iter()
            .flatten()
            .any(|b| b.needs_layout || !b.laid_out)
    }

    /// The paint position of `id` in root coordinates.
    ///
    /// Each ancestor's scroll position shifts its descendants.
    #[must_use]
    pub fn global_position(&self, id: BoxId) -> Point {
        let mut position = self.get(id).map_or(Point::ZERO, RenderBox::paint_offset);
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            let Some(render_box) = self.get(ancestor) else {
                break;
            };
            position = position
                .offset_by(render_box.paint_offset())
                .minus(render_box.scroll);
            current = render_box.parent;
        }
        position
    }

    /// The paint rectangle of `id` in root coordinates.
    #[must_use]
    pub fn global_rect(&self, id: BoxId) -> Rect {
        let size = self.get(id).map(|b| b.size).unwrap_or_default();
        Rect::from_origin_size(self.global_position(id), size)
    }

    /// Whether the painted border box of `id` contains `point`.
    #[must_use]
    pub fn hit_test(&self, id: BoxId, point: Point) -> bool {
        self.global_rect(id).contains(point)
    }

    /// A serializable view of the subtree at `id`.
    #[must_use]
    pub fn snapshot(&self, id: BoxId) -> Option<BoxSnapshot> {
        let render_box = self.get(id)?;
        Some(BoxSnapshot {
            id,
            kind: render_box.kind,
            repaint: render_box.repaint,
            owner: render_box.owner,
            out_of_flow: render_box.out_of_flow,
            rect: Rect::from_origin_size(render_box.paint_offset(), render_box.size),
            children: render_box
                .children
                .iter()
                .filter_map(|&child| self.snapshot(child))
                .collect(),
        })
    }
}
