//! ztree: an in-memory element tree for parsed markup
//!
//! This crate provides:
//! - Ownership-correct structural edits that keep parent links consistent
//! - Root document lookup from any node
//! - A restricted slash-separated path query language
//! - Index-path addressing and a flattened depth-first view
//!
//! # Examples
//! ```
//! use ztree::{Node, Result};
//!
//! # fn main() -> Result<()> {
//! let root = Node::document();
//! let item = Node::element("item");
//! let sub = Node::element("sub").with_value("text");
//! root.add_child(item.clone())?;
//! item.add_child(sub.clone())?;
//!
//! assert_eq!(root.nodes_for_path("item/sub")?, vec![sub.clone()]);
//! assert_eq!(sub.nodes_for_path("/item")?, vec![item.clone()]);
//! assert_eq!(root.node_at(&[0, 0]), Some(sub));
//!
//! root.write_at(&[0, 0], None)?;
//! assert_eq!(item.child_count(), 0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod intern;
pub mod node;
pub mod query;

// Re-exports
pub use config::{QueryConfig, QueryMode};
pub use error::{Category, Error, ErrorKind, Result};
pub use intern::{intern_name, Name};
pub use node::{Ancestors, Descendants, Node, NodeKind};
pub use query::{NodesExt, PathQuery, Step};
