//! Element tree for the Trellis render-tree engine.
//!
//! This crate provides an arena-based element tree whose nodes carry a live
//! [`StyleDeclaration`] and a free-form [`PropertyBag`].
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. The
//! render tree refers back to elements by [`NodeId`] only, so neither tree ever
//! owns a node of the other.
//!
//! Structural edits on nodes that are not yet connected to the document are
//! recorded as [`PendingMutation`]s; replaying them is the document's job.

mod error;
mod property;
mod style;

pub use error::TreeError;
pub use property::{PropertyBag, PropertyValue};
pub use style::{StyleChange, StyleDeclaration};

use std::collections::VecDeque;
use std::fmt;

/// A type-safe index into the element tree.
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
/// Ids are never reused while the tree lives, so a stale id resolves to `None`
/// instead of to an unrelated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag classification of an element.
///
/// [HTML § 3.2.5.2.6 Embedded content](https://html.spec.whatwg.org/multipage/dom.html#embedded-content-2)
///
/// "Embedded content is content that imports another resource into the
/// document, or content from another vocabulary that is inserted into the
/// document."
///
/// Embedded (replaced) elements have an intrinsic size and never host child
/// boxes; everything else is a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ElementKind {
    /// A box that lays out child boxes.
    Container,
    /// Leaf content with an inherent size (media and embedded content).
    Replaced,
}

impl ElementKind {
    /// Classify a tag name.
    #[must_use]
    pub fn from_tag_name(tag_name: &str) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "img" | "video" | "canvas" | "iframe" | "audio" | "embed" | "object" | "svg" => {
                Self::Replaced
            }
            _ => Self::Container,
        }
    }
}

/// A structural edit recorded on a node that was not connected when it was
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingMutation {
    /// Append `child` as the last child.
    Append(NodeId),
    /// Insert `child` before `reference`.
    InsertBefore {
        /// The node being inserted.
        child: NodeId,
        /// The existing child it goes in front of.
        reference: NodeId,
    },
    /// Remove `child`.
    Remove(NodeId),
}

/// An element in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element's tag classification.
    pub kind: ElementKind,

    /// The element's local name, lowercased.
    pub tag_name: String,

    /// The inline style declaration.
    pub style: StyleDeclaration,

    /// Arbitrary element properties, disjoint from style.
    pub properties: PropertyBag,

    /// The structural parent (non-owning).
    pub parent: Option<NodeId>,

    /// The ordered children. The parent exclusively owns them.
    pub children: Vec<NodeId>,

    /// Whether the node is reachable from the root.
    pub connected: bool,

    /// Edits requested while the node was disconnected, in call order.
    pub pending: VecDeque<PendingMutation>,
}

impl Node {
    fn new(tag_name: &str) -> Self {
        let tag_name = tag_name.to_ascii_lowercase();
        Self {
            kind: ElementKind::from_tag_name(&tag_name),
            tag_name,
            style: StyleDeclaration::new(),
            properties: PropertyBag::default(),
            parent: None,
            children: Vec::new(),
            connected: false,
            pending: VecDeque::new(),
        }
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// This is the id → element lookup table of a document. The root element
/// lives at [`NodeId::ROOT`] and is connected from the start.
#[derive(Debug, Clone)]
pub struct ElementTree {
    /// All nodes ever allocated, indexed by NodeId. Disposed slots hold `None`.
    nodes: Vec<Option<Node>>,
}

impl ElementTree {
    /// Create a new tree holding only the root element.
    pub fn new(root_tag: &str) -> Self {
        let mut root = Node::new(root_tag);
        root.connected = true;
        Self {
            nodes: vec![Some(root)],
        }
    }

    /// Get the root element ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns `true` if `id` names a live (not disposed) node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Check if the tree is empty (should always have at least the root).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocate a new, disconnected element and return its ID.
    pub fn alloc(&mut self, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag_name)));
        log::trace!("allocated element {id} <{tag_name}>");
        id
    }

    /// Free a node's slot. The node must already be unlinked.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RootImmovable`] for the root and
    /// [`TreeError::Disposed`] for an unknown id.
    pub fn free(&mut self, id: NodeId) -> Result<Node, TreeError> {
        if id == NodeId::ROOT {
            return Err(TreeError::RootImmovable);
        }
        self.nodes
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(TreeError::Disposed(id))
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the next sibling of a node.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    /// Whether the node is connected to the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| n.connected)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// All descendants of `id` in depth-first pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Link `child` under `parent`, before `reference` or at the end.
    ///
    /// Only the structure changes; connection state is left to
    /// [`ElementTree::set_connected`].
    ///
    /// # Errors
    ///
    /// Fails if either node is disposed, if `parent` is replaced content, if
    /// `child` already has a parent, if the edit would make a node its own
    /// ancestor, or if `reference` is not a child of `parent`.
    pub fn link_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError> {
        let Some(parent_node) = self.get(parent) else {
            return Err(TreeError::Disposed(parent));
        };
        if parent_node.kind == ElementKind::Replaced {
            return Err(TreeError::NotAContainer(parent));
        }
        let Some(child_node) = self.get(child) else {
            return Err(TreeError::Disposed(child));
        };
        if child == NodeId::ROOT {
            return Err(TreeError::RootImmovable);
        }
        if let Some(existing) = child_node.parent {
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(TreeError::Cycle { parent, child });
        }

        let index = match reference {
            Some(reference) => self
                .children(parent)
                .iter()
                .position(|&c| c == reference)
                .ok_or(TreeError::NotAChild {
                    parent,
                    child: reference,
                })?,
            None => self.children(parent).len(),
        };

        if let Some(node) = self.get_mut(parent) {
            node.children.insert(index, child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Unlink `child` from `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotAChild`] if `child` is not a child of `parent`.
    pub fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::NotAChild { parent, child })?;
        if let Some(node) = self.get_mut(parent) {
            let _ = node.children.remove(index);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Ok(())
    }

    /// Mark `id` and every structural descendant as connected or not.
    ///
    /// Returns the nodes whose state changed, in pre-order.
    pub fn set_connected(&mut self, id: NodeId, connected: bool) -> Vec<NodeId> {
        let mut changed = Vec::new();
        let mut subtree = vec![id];
        subtree.extend(self.descendants(id));
        for node_id in subtree {
            if let Some(node) = self.get_mut(node_id)
                && node.connected != connected
            {
                node.connected = connected;
                changed.push(node_id);
            }
        }
        changed
    }

    /// Record a structural edit to replay once `id` is connected.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Disposed`] if `id` is not live.
    pub fn enqueue(&mut self, id: NodeId, mutation: PendingMutation) -> Result<(), TreeError> {
        let node = self.get_mut(id).ok_or(TreeError::Disposed(id))?;
        log::trace!("queued {mutation:?} on disconnected element {id}");
        node.pending.push_back(mutation);
        Ok(())
    }

    /// Take every queued edit of `id`, oldest first.
    pub fn take_pending(&mut self, id: NodeId) -> VecDeque<PendingMutation> {
        self.get_mut(id)
            .map(|n| std::mem::take(&mut n.pending))
            .unwrap_or_default()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a ElementTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}
