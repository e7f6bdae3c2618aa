//! Index-path addressing.
//!
//! An index path is a sequence of sibling positions leading from a node down
//! to one of its descendants. `[]` addresses the node itself, `[0, 2]` the
//! third child of its first child.

use tracing::debug;

use super::Node;
use crate::error::{Error, ErrorKind, Result};

/// Depth-first iterator over a node's descendants in document order
#[derive(Debug, Clone)]
pub struct Descendants {
    stack: Vec<Node>,
}

impl Iterator for Descendants {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let current = self.stack.pop()?;
        if let Some(children) = current.data().children.as_ref() {
            self.stack.extend(children.iter().rev().cloned());
        }
        Some(current)
    }
}

impl Node {
    /// Read the node at `path`. `None` when any step is out of range.
    pub fn node_at(&self, path: &[usize]) -> Option<Self> {
        path.iter().try_fold(self.clone(), |node, &index| node.child(index))
    }

    /// Write at `path`.
    ///
    /// Every step but the last must address an existing child. At the last
    /// step, `Some(node)` appends when the index equals the child count and
    /// inserts before the current occupant when it is smaller; `None` removes
    /// the child at that index. A node that already sits under the target is
    /// counted after it leaves its current position, as in
    /// [`Node::insert_child`].
    pub fn write_at(&self, path: &[usize], value: Option<Self>) -> Result<()> {
        match value {
            Some(node) => self.insert_at(path, node),
            None => self.remove_at(path).map(drop),
        }
    }

    pub fn insert_at(&self, path: &[usize], node: Self) -> Result<()> {
        let (target, index) = self.resolve_slot(path)?;
        target
            .insert_child(index, node)
            .map_err(|err| at_step(err, path.len() - 1))
    }

    /// Remove and return the node at `path`
    pub fn remove_at(&self, path: &[usize]) -> Result<Self> {
        let (target, index) = self.resolve_slot(path)?;
        target
            .remove_child(index)
            .map_err(|err| at_step(err, path.len() - 1))
    }

    /// Every descendant in document order: each child followed by its own
    /// flattened children. `None` when this node has no children sequence.
    pub fn flattened_children(&self) -> Option<Vec<Self>> {
        if self.data().children.is_none() {
            return None;
        }
        Some(self.descendants().collect())
    }

    pub fn descendants(&self) -> Descendants {
        let stack = self
            .data()
            .children
            .as_ref()
            .map(|children| children.iter().rev().cloned().collect())
            .unwrap_or_default();
        Descendants { stack }
    }

    /// Walk all but the last step of `path`, returning the node that owns the
    /// addressed slot and the slot's index
    fn resolve_slot(&self, path: &[usize]) -> Result<(Self, usize)> {
        let Some((&index, steps)) = path.split_last() else {
            debug!("write with empty index path");
            return Err(Error::new(ErrorKind::EmptyIndexPath));
        };

        let mut current = self.clone();
        for (depth, &step) in steps.iter().enumerate() {
            let next = current.child(step).ok_or_else(|| {
                let len = current.child_count();
                debug!(depth, index = step, len, "index path step out of range");
                Error::addressing(ErrorKind::IndexOutOfRange { index: step, len }, depth)
            })?;
            current = next;
        }

        Ok((current, index))
    }
}

fn at_step(err: Error, depth: usize) -> Error {
    if err.is_addressing() {
        Error::addressing(err.kind().clone(), depth)
    } else {
        err
    }
}
