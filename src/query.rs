//! Restricted path queries.
//!
//! Supported: exact-name segments separated by `/`, a leading `/` to start at
//! the root document, and `..` to step to the parent. Predicates, wildcards
//! and attribute selectors are not part of the language; in the default
//! strict mode they are reported as query errors, in lenient mode they simply
//! match nothing.

mod path;

pub use path::{PathQuery, Step};

use tracing::{debug, instrument};

use crate::config::QueryConfig;
use crate::error::Result;
use crate::node::Node;

impl Node {
    /// Direct children named exactly `name`, in document order
    pub fn children_named(&self, name: &str) -> Vec<Self> {
        self.children()
            .map(|children| children.named(name))
            .unwrap_or_default()
    }

    /// Resolve `path` against this node with the default configuration
    pub fn nodes_for_path(&self, path: &str) -> Result<Vec<Self>> {
        self.nodes_for_path_with_config(path, &QueryConfig::default())
    }

    #[instrument(level = "debug", skip(self, config), fields(mode = ?config.mode))]
    pub fn nodes_for_path_with_config(
        &self,
        path: &str,
        config: &QueryConfig,
    ) -> Result<Vec<Self>> {
        let query = PathQuery::compile_with_config(path, config)
            .inspect_err(|err| debug!(error = %err, "rejected path"))?;

        let matches = query.evaluate(self);
        debug!(count = matches.len(), "resolved path");
        Ok(matches)
    }
}

/// Name filtering for node sequences
pub trait NodesExt {
    /// The nodes named exactly `name`, in order
    fn named(&self, name: &str) -> Vec<Node>;
}

impl NodesExt for [Node] {
    fn named(&self, name: &str) -> Vec<Node> {
        self.iter()
            .filter(|node| node.has_name(name))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn test_children_named() -> Result<()> {
        let root = Node::element("root");
        let a1 = Node::element("a");
        let b = Node::element("b");
        let a2 = Node::element("a");
        root.set_children(vec![a1.clone(), b, a2.clone()])?;

        assert_eq!(root.children_named("a"), vec![a1, a2]);
        assert!(root.children_named("missing").is_empty());
        assert!(Node::element("leaf").children_named("a").is_empty());
        Ok(())
    }

    #[test]
    fn test_named_on_slices() {
        let nodes = vec![Node::element("x"), Node::text("t"), Node::element("x")];
        assert_eq!(nodes.named("x").len(), 2);
        assert!(nodes.named("t").is_empty());
    }

    #[test]
    fn test_nested_matches_keep_order() -> Result<()> {
        let root = Node::document();
        let first = Node::element("a");
        let second = Node::element("a");
        root.set_children(vec![first.clone(), second.clone()])?;
        let b1 = Node::element("b");
        let b2 = Node::element("b");
        let b3 = Node::element("b");
        first.set_children(vec![b1.clone(), b2.clone()])?;
        second.set_children(vec![b3.clone()])?;

        assert_eq!(root.nodes_for_path("a/b")?, vec![b1, b2, b3]);
        Ok(())
    }

    #[test]
    fn test_strict_and_lenient_modes() -> Result<()> {
        let root = Node::element("root");
        root.add_child(Node::element("a"))?;

        assert!(root.nodes_for_path("a[1]").unwrap_err().is_query());
        let lenient = QueryConfig::lenient();
        assert!(root.nodes_for_path_with_config("a[1]", &lenient)?.is_empty());
        assert_eq!(root.nodes_for_path_with_config("a//", &lenient)?.len(), 1);
        Ok(())
    }
}
