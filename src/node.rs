//! Element tree nodes.
//!
//! A [`Node`] is a cheap, clonable handle to a node stored behind an `Rc`.
//! Children are owned through the parent's children sequence; the parent link
//! is a `Weak` back-reference, so a tree never keeps itself alive and a node
//! is reclaimed once neither a parent nor an outside handle holds it.

mod ancestry;
mod index_path;
mod mutation;

pub use ancestry::Ancestors;
pub use index_path::Descendants;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::intern::Name;

/// Node variant. A `Document` marks the root of a tree for
/// [`Node::root_document`]; everything else is an `Element`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
}

struct NodeData {
    kind: NodeKind,
    name: Option<Name>,
    value: Option<String>,
    children: Option<Vec<Node>>,
    parent: Weak<RefCell<NodeData>>,
}

/// Handle to a tree node.
///
/// Cloning the handle does not copy the node; use [`Node::deep_copy`] for an
/// independent subtree. `==` compares identity, [`Node::deep_eq`] compares
/// structure.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            name: None,
            value: None,
            children: None,
            parent: Weak::new(),
        })))
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub fn element(name: impl Into<Name>) -> Self {
        Self::new(NodeKind::Element).with_name(name)
    }

    /// Unnamed element carrying only a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Element).with_value(value)
    }

    #[must_use]
    pub fn with_name(self, name: impl Into<Name>) -> Self {
        self.set_name(name);
        self
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn is_document(&self) -> bool {
        self.kind() == NodeKind::Document
    }

    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    pub fn name(&self) -> Option<Name> {
        self.data().name.clone()
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.data().name.as_deref() == Some(name)
    }

    pub fn set_name(&self, name: impl Into<Name>) {
        self.data_mut().name = Some(name.into());
    }

    pub fn clear_name(&self) {
        self.data_mut().name = None;
    }

    pub fn value(&self) -> Option<String> {
        self.data().value.clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.data_mut().value = Some(value.into());
    }

    pub fn clear_value(&self) {
        self.data_mut().value = None;
    }

    /// Snapshot of the children sequence. `None` when the node has never
    /// held a children sequence, which differs from `Some(vec![])`.
    pub fn children(&self) -> Option<Vec<Self>> {
        self.data().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.data().children.as_ref().map_or(0, Vec::len)
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    pub fn child(&self, index: usize) -> Option<Self> {
        self.data().children.as_ref()?.get(index).cloned()
    }

    pub fn first_child(&self) -> Option<Self> {
        self.data().children.as_ref()?.first().cloned()
    }

    pub fn last_child(&self) -> Option<Self> {
        self.data().children.as_ref()?.last().cloned()
    }

    /// Copy this node and its whole subtree. Every copy keeps its source's
    /// kind, name and value; parent links point at the new copies and the
    /// returned root is detached.
    pub fn deep_copy(&self) -> Self {
        let root = self.shallow_copy();
        let mut pending = vec![(self.clone(), root.clone())];

        while let Some((source, copy)) = pending.pop() {
            let Some(children) = source.children() else {
                continue;
            };
            let copies: Vec<Self> = children.iter().map(Self::shallow_copy).collect();
            for (child, child_copy) in children.into_iter().zip(&copies) {
                child_copy.set_parent(&copy);
                pending.push((child, child_copy.clone()));
            }
            copy.data_mut().children = Some(copies);
        }

        root
    }

    /// Structural equality: same kind, name, value and children, recursively
    pub fn deep_eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.clone(), other.clone())];

        while let Some((left, right)) = pending.pop() {
            if left == right {
                continue;
            }

            let l = left.data();
            let r = right.data();
            if l.kind != r.kind || l.name != r.name || l.value != r.value {
                return false;
            }

            match (&l.children, &r.children) {
                (None, None) => {}
                (Some(a), Some(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().cloned().zip(b.iter().cloned()));
                }
                _ => return false,
            }
        }

        true
    }

    /// Number of live handles to this node, including the parent's
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    fn shallow_copy(&self) -> Self {
        let data = self.data();
        let copy = Self::new(data.kind);
        {
            let mut copy_data = copy.data_mut();
            copy_data.name.clone_from(&data.name);
            copy_data.value.clone_from(&data.value);
        }
        copy
    }

    fn data(&self) -> Ref<'_, NodeData> {
        self.0.borrow()
    }

    fn data_mut(&self) -> RefMut<'_, NodeData> {
        self.0.borrow_mut()
    }

    fn set_parent(&self, parent: &Self) {
        self.data_mut().parent = Rc::downgrade(&parent.0);
    }

    fn clear_parent(&self) {
        self.data_mut().parent = Weak::new();
    }
}

// Releasing a subtree one level per stack frame overflows on deep trees, so
// children whose last handle goes away are unlinked onto a heap stack first.
impl Drop for NodeData {
    fn drop(&mut self) {
        let Some(mut stack) = self.children.take() else {
            return;
        };

        while let Some(node) = stack.pop() {
            if let Some(cell) = Rc::into_inner(node.0) {
                let mut data = cell.into_inner();
                stack.extend(data.children.take().into_iter().flatten());
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        let mut out = f.debug_struct("Node");
        out.field("kind", &data.kind);
        if let Some(name) = &data.name {
            out.field("name", name);
        }
        if let Some(value) = &data.value {
            out.field("value", value);
        }
        if let Some(children) = &data.children {
            out.field("children", children);
        }
        out.finish()
    }
}
