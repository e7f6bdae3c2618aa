//! Structural edits.
//!
//! Every node being attached is first detached from wherever it lives, so a
//! node never sits in two children sequences at once. Edits that would make a
//! node its own ancestor fail before anything changes.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::Node;
use crate::error::{Error, ErrorKind, Result};

impl Node {
    /// Append `child`, creating the children sequence if needed.
    ///
    /// Adopting a leaf is constant time; adopting a node that has children
    /// walks the ancestors of `self` to rule out a cycle.
    pub fn add_child(&self, child: Self) -> Result<()> {
        self.ensure_can_adopt(&child)?;
        child.detach();
        child.set_parent(self);

        let count = {
            let mut data = self.data_mut();
            let children = data.children.get_or_insert_with(Vec::new);
            children.push(child);
            children.len()
        };
        trace!(name = ?self.name(), count, "appended child");
        Ok(())
    }

    /// Insert `child` at `index`. The valid range is `0..=len`, where `len`
    /// is counted after `child` has left its current position.
    pub fn insert_child(&self, index: usize, child: Self) -> Result<()> {
        self.ensure_can_adopt(&child)?;
        let len = self.child_count() - usize::from(child.is_child_of(self));
        if index > len {
            debug!(index, len, "insert index out of range");
            return Err(Error::new(ErrorKind::IndexOutOfRange { index, len }));
        }

        child.detach();
        child.set_parent(self);
        self.data_mut()
            .children
            .get_or_insert_with(Vec::new)
            .insert(index, child);
        trace!(name = ?self.name(), index, "inserted child");
        Ok(())
    }

    /// Insert an ordered batch at `index`, keeping the batch's order
    pub fn insert_children(
        &self,
        index: usize,
        children: impl IntoIterator<Item = Self>,
    ) -> Result<()> {
        let batch: Vec<Self> = children.into_iter().collect();
        self.ensure_can_adopt_all(&batch)?;

        let moving = batch.iter().filter(|child| child.is_child_of(self)).count();
        let len = self.child_count() - moving;
        if index > len {
            debug!(index, len, "insert index out of range");
            return Err(Error::new(ErrorKind::IndexOutOfRange { index, len }));
        }

        for child in &batch {
            child.detach();
            child.set_parent(self);
        }

        let added = batch.len();
        self.data_mut()
            .children
            .get_or_insert_with(Vec::new)
            .splice(index..index, batch);
        trace!(name = ?self.name(), index, added, "inserted children");
        Ok(())
    }

    /// Remove and return the child at `index`, clearing its parent link
    pub fn remove_child(&self, index: usize) -> Result<Self> {
        let removed = {
            let mut data = self.data_mut();
            match data.children.as_mut() {
                Some(children) if index < children.len() => children.remove(index),
                children => {
                    let len = children.map_or(0, |c| c.len());
                    debug!(index, len, "remove index out of range");
                    return Err(Error::new(ErrorKind::IndexOutOfRange { index, len }));
                }
            }
        };

        removed.clear_parent();
        trace!(name = ?self.name(), index, "removed child");
        Ok(removed)
    }

    /// Replace the children sequence.
    ///
    /// Nodes in `children` are re-parented to `self`. Nodes of the previous
    /// sequence that are not in `children` are detached; nodes in both stay
    /// attached. Listing a node twice, or listing `self` or one of its
    /// ancestors, fails without changing anything.
    pub fn set_children(&self, children: impl IntoIterator<Item = Self>) -> Result<()> {
        let incoming: Vec<Self> = children.into_iter().collect();
        self.ensure_can_adopt_all(&incoming)?;

        for child in &incoming {
            if !child.is_child_of(self) {
                child.detach();
                child.set_parent(self);
            }
        }

        let kept: HashSet<Self> = incoming.iter().cloned().collect();
        let count = incoming.len();
        let previous = self.data_mut().children.replace(incoming);

        let mut released = 0usize;
        for old in previous.iter().flatten() {
            if !kept.contains(old) {
                old.clear_parent();
                released += 1;
            }
        }
        debug!(name = ?self.name(), count, released, "replaced children");
        Ok(())
    }

    /// Drop the children sequence entirely, detaching every child. Afterwards
    /// [`Node::children`] returns `None`.
    pub fn clear_children(&self) {
        let previous = self.data_mut().children.take();
        for old in previous.iter().flatten() {
            old.clear_parent();
        }
    }

    /// Remove this node from its parent's children. No-op for a detached node.
    pub fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };

        if let Some(children) = parent.data_mut().children.as_mut() {
            children.retain(|child| child != self);
        }
        self.clear_parent();
    }

    fn is_child_of(&self, parent: &Self) -> bool {
        self.parent().as_ref() == Some(parent)
    }

    // A node without children cannot be an ancestor, so the walk up from
    // `self` only runs when `child` holds a subtree.
    fn ensure_can_adopt(&self, child: &Self) -> Result<()> {
        if child == self || (child.has_children() && child.is_ancestor_of(self)) {
            debug!(name = ?self.name(), child = ?child.name(), "rejected cyclic adoption");
            return Err(Error::new(ErrorKind::CycleDetected));
        }
        Ok(())
    }

    fn ensure_can_adopt_all(&self, children: &[Self]) -> Result<()> {
        let mut seen = HashSet::with_capacity(children.len());
        for child in children {
            if !seen.insert(child) {
                debug!(name = ?self.name(), child = ?child.name(), "rejected duplicate child");
                return Err(Error::new(ErrorKind::DuplicateChild));
            }
            self.ensure_can_adopt(child)?;
        }
        Ok(())
    }
}
