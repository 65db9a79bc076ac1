//! Structural mutation entry points.
//!
//! [DOM § 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
//!
//! Edits under a connected parent link the element and attach its box at
//! once. Edits under a disconnected parent are queued on that parent and
//! replayed, oldest first, when it becomes connected.

use trellis_common::warning::warn_once;
use trellis_dom::{ElementKind, NodeId, PendingMutation, TreeError};

use crate::{Document, DocumentError};

impl Document {
    /// Append `child` as the last child of `parent`.
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// # Errors
    ///
    /// Fails if either element is disposed, if `parent` is replaced content
    /// (`img`, `video`, ...), if `child` is the root, or if the edit would
    /// create a cycle. A failed edit leaves both trees untouched.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.insert_child(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`.
    ///
    /// # Errors
    ///
    /// As [`Document::append_child`], and also fails if `reference` is not a
    /// child of `parent` once the edit is applied.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), DocumentError> {
        self.insert_child(parent, child, Some(reference))
    }

    /// Remove `child` from `parent`, detaching its subtree.
    ///
    /// # Errors
    ///
    /// Fails if either element is disposed or if `child` is not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.check_live(parent)?;
        self.check_live(child)?;
        if !self.elements.is_connected(parent) {
            self.elements.enqueue(parent, PendingMutation::Remove(child))?;
            return Ok(());
        }
        if self.elements.parent(child) != Some(parent) {
            return Err(TreeError::NotAChild { parent, child }.into());
        }
        self.take_out(child)
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        self.check_live(parent)?;
        self.check_live(child)?;
        if child == self.root() {
            return Err(TreeError::RootImmovable.into());
        }
        if child == parent || self.elements.is_descendant_of(parent, child) {
            return Err(TreeError::Cycle { parent, child }.into());
        }
        if self
            .elements
            .get(parent)
            .is_some_and(|node| node.kind == ElementKind::Replaced)
        {
            return Err(TreeError::NotAContainer(parent).into());
        }

        if !self.elements.is_connected(parent) {
            let mutation = match reference {
                Some(reference) => PendingMutation::InsertBefore { child, reference },
                None => PendingMutation::Append(child),
            };
            self.elements.enqueue(parent, mutation)?;
            return Ok(());
        }

        if let Some(reference) = reference
            && self.elements.parent(reference) != Some(parent)
        {
            return Err(TreeError::NotAChild {
                parent,
                child: reference,
            }
            .into());
        }
        // Inserting a node before itself leaves it where it is.
        if reference == Some(child) {
            return Ok(());
        }

        if self.elements.parent(child).is_some() {
            self.take_out(child)?;
        }
        self.elements.link_child(parent, child, reference)?;
        let connected = self.elements.set_connected(child, true);
        let previous = self.elements.prev_sibling(child);
        self.attach(child, parent, previous);

        for node in connected {
            self.replay_pending(node);
        }
        Ok(())
    }

    /// Detach `child`'s subtree, unlink it, and mark it disconnected.
    fn take_out(&mut self, child: NodeId) -> Result<(), DocumentError> {
        self.detach(child);
        if let Some(parent) = self.elements.parent(child) {
            self.elements.unlink_child(parent, child)?;
        }
        let _ = self.elements.set_connected(child, false);
        Ok(())
    }

    /// Replay the edits queued on `element` while it was disconnected.
    fn replay_pending(&mut self, element: NodeId) {
        let pending = self.elements.take_pending(element);
        if !pending.is_empty() {
            log::debug!("replaying {} queued edit(s) on {element}", pending.len());
        }
        for mutation in pending {
            let (child, result) = match mutation {
                PendingMutation::Append(child) => (child, self.append_child(element, child)),
                PendingMutation::InsertBefore { child, reference } => {
                    (child, self.insert_before(element, child, reference))
                }
                PendingMutation::Remove(child) => (child, self.remove_child(element, child)),
            };
            if let Err(err) = result {
                warn_once(
                    "Document",
                    &format!("skipped queued edit of {child} under {element}: {err}"),
                );
            }
        }
    }

    fn check_live(&self, element: NodeId) -> Result<(), TreeError> {
        if self.elements.contains(element) && self.states.contains_key(&element) {
            Ok(())
        } else {
            Err(TreeError::Disposed(element))
        }
    }
}
