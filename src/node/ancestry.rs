//! Upward traversal

use super::Node;

/// Iterator over a node's ancestors, nearest first
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<Node>,
}

impl Iterator for Ancestors {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

impl Node {
    /// The node currently holding this one in its children, if any
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.upgrade().map(Self)
    }

    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// The topmost ancestor, or `self` when detached
    pub fn top(&self) -> Self {
        self.ancestors().last().unwrap_or_else(|| self.clone())
    }

    /// The `Document` at the top of this node's tree.
    ///
    /// Only the topmost node counts: a `Document` nested under an element is
    /// not a root document, and a tree topped by an element has none.
    pub fn root_document(&self) -> Option<Self> {
        let top = self.top();
        top.is_document().then_some(top)
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.ancestors().any(|ancestor| ancestor == *self)
    }

    /// Position among the parent's children
    pub fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let data = parent.data();
        data.children.as_ref()?.iter().position(|child| child == self)
    }

    /// Index path from the topmost ancestor down to this node, so that
    /// `node.top().node_at(&node.index_path())` is `node`
    pub fn index_path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.depth());
        let mut current = self.clone();
        while let Some(index) = current.index_in_parent() {
            path.push(index);
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }
}
