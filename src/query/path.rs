//! Path compilation and evaluation.
//!
//! A path compiles to a flat list of steps:
//!
//! - a leading `/` becomes [`Step::Root`]
//! - every `..` segment becomes [`Step::Parent`]
//! - every other segment becomes [`Step::Child`], an exact name match
//!
//! `../x` therefore compiles to `[Parent, Child("x")]` and `a/../b` to
//! `[Child("a"), Parent, Child("b")]`.

use std::fmt;

use tracing::trace;

use crate::config::QueryConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::node::Node;

const UNSUPPORTED_CHARS: &[char] = &['[', ']', '*', '@', '(', ')', '|', '=', '\'', '"', ',', '$'];

/// One compiled path step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Continue from the root document
    Root,
    /// Continue from the parent
    Parent,
    /// Continue from every direct child with this exact name
    Child(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => Ok(()),
            Self::Parent => write!(f, ".."),
            Self::Child(name) => write!(f, "{name}"),
        }
    }
}

/// A compiled path, reusable across context nodes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathQuery {
    steps: Vec<Step>,
}

impl PathQuery {
    /// Compile `path` with the default strict configuration
    pub fn compile(path: &str) -> Result<Self> {
        Self::compile_with_config(path, &QueryConfig::default())
    }

    pub fn compile_with_config(path: &str, config: &QueryConfig) -> Result<Self> {
        config.validate_path_length(path)?;
        let strict = config.is_strict();

        if strict && path.is_empty() {
            return Err(Error::new(ErrorKind::EmptyPath));
        }

        let mut steps = Vec::new();
        let mut rest = path;
        if let Some(relative) = rest.strip_prefix('/') {
            steps.push(Step::Root);
            rest = if strict {
                relative
            } else {
                relative.trim_start_matches('/')
            };
        }

        if !rest.is_empty() {
            for segment in rest.split('/') {
                match segment {
                    "" if strict => return Err(Error::new(ErrorKind::EmptySegment)),
                    "" => continue,
                    ".." => steps.push(Step::Parent),
                    name => {
                        if strict {
                            check_supported(name)?;
                        }
                        steps.push(Step::Child(name.to_string()));
                    }
                }
                config.validate_steps(steps.len())?;
            }
        }

        let query = Self { steps };
        if strict && !query.ends_with_name() {
            return Err(Error::new(ErrorKind::MissingNameSegment));
        }

        trace!(path, steps = %query, "compiled path");
        Ok(query)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_absolute(&self) -> bool {
        self.steps.first() == Some(&Step::Root)
    }

    fn ends_with_name(&self) -> bool {
        matches!(self.steps.last(), Some(Step::Child(_)))
    }

    /// Resolve against `context`. Matches come in document order per
    /// matched parent, then in the order those parents were matched.
    pub fn evaluate(&self, context: &Node) -> Vec<Node> {
        let mut out = Vec::new();
        if self.ends_with_name() {
            resolve(context, &self.steps, &mut out);
        }
        out
    }
}

impl fmt::Display for PathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            match step {
                Step::Root => write!(f, "/")?,
                _ => {
                    if !first {
                        write!(f, "/")?;
                    }
                    write!(f, "{step}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<&str> for PathQuery {
    type Error = Error;

    fn try_from(path: &str) -> Result<Self> {
        Self::compile(path)
    }
}

fn resolve(node: &Node, steps: &[Step], out: &mut Vec<Node>) {
    let Some((step, rest)) = steps.split_first() else {
        out.push(node.clone());
        return;
    };

    match step {
        Step::Root => {
            if let Some(root) = node.root_document() {
                resolve(&root, rest, out);
            }
        }
        Step::Parent => {
            if let Some(parent) = node.parent() {
                resolve(&parent, rest, out);
            }
        }
        Step::Child(name) => {
            for child in node.children_named(name) {
                resolve(&child, rest, out);
            }
        }
    }
}

fn check_supported(segment: &str) -> Result<()> {
    let unsupported = segment == "."
        || segment.contains("::")
        || segment
            .chars()
            .any(|c| UNSUPPORTED_CHARS.contains(&c) || c.is_whitespace());

    if unsupported {
        return Err(Error::new(ErrorKind::UnsupportedSyntax {
            segment: segment.to_string(),
        }));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    fn child(name: &str) -> Step {
        Step::Child(name.to_string())
    }

    fn kind_of(path: &str) -> ErrorKind {
        PathQuery::compile(path).unwrap_err().kind().clone()
    }

    #[test]
    fn test_compile_relative() -> Result<()> {
        let query = PathQuery::compile("item/sub")?;
        assert_eq!(query.steps(), &[child("item"), child("sub")]);
        assert!(!query.is_absolute());
        Ok(())
    }

    #[test]
    fn test_compile_absolute_and_parent() -> Result<()> {
        let query = PathQuery::compile("/a/b")?;
        assert_eq!(query.steps(), &[Step::Root, child("a"), child("b")]);
        assert!(query.is_absolute());

        let query = PathQuery::compile("../../x")?;
        assert_eq!(query.steps(), &[Step::Parent, Step::Parent, child("x")]);

        let query = PathQuery::compile("a/../b")?;
        assert_eq!(query.steps(), &[child("a"), Step::Parent, child("b")]);
        Ok(())
    }

    #[test]
    fn test_namespaced_names_are_plain_names() -> Result<()> {
        let query = PathQuery::compile("dc:title/x-y.z_1")?;
        assert_eq!(query.steps(), &[child("dc:title"), child("x-y.z_1")]);
        Ok(())
    }

    #[test]
    fn test_strict_rejections() {
        assert_eq!(kind_of(""), ErrorKind::EmptyPath);
        assert_eq!(kind_of("/"), ErrorKind::MissingNameSegment);
        assert_eq!(kind_of("a/.."), ErrorKind::MissingNameSegment);
        assert_eq!(kind_of("a//b"), ErrorKind::EmptySegment);
        assert_eq!(kind_of("//a"), ErrorKind::EmptySegment);
        assert_eq!(kind_of("a/"), ErrorKind::EmptySegment);
        for path in ["a[1]", "*", "a/@id", "text()", "a|b", "child::a", ".", "a b"] {
            assert!(
                matches!(kind_of(path), ErrorKind::UnsupportedSyntax { .. }),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_lenient_accepts_everything() -> Result<()> {
        let config = QueryConfig::lenient();
        let query = PathQuery::compile_with_config("//a//b/", &config)?;
        assert_eq!(query.steps(), &[Step::Root, child("a"), child("b")]);

        let query = PathQuery::compile_with_config("a[1]", &config)?;
        assert_eq!(query.steps(), &[child("a[1]")]);

        let query = PathQuery::compile_with_config("", &config)?;
        assert!(query.steps().is_empty());
        assert!(query.evaluate(&Node::element("x")).is_empty());
        Ok(())
    }

    #[test]
    fn test_limits_apply_in_both_modes() {
        let config = QueryConfig {
            max_steps: 2,
            ..QueryConfig::lenient()
        };
        let err = PathQuery::compile_with_config("a/b/c", &config).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MaxStepsExceeded { max: 2 });

        let config = QueryConfig {
            max_path_length: 4,
            ..QueryConfig::strict()
        };
        let err = PathQuery::compile_with_config("abcde", &config).unwrap_err();
        assert!(err.is_query());
    }

    #[test]
    fn test_display() -> Result<()> {
        assert_eq!(PathQuery::compile("/a/../b")?.to_string(), "/a/../b");
        assert_eq!(PathQuery::compile("../x")?.to_string(), "../x");
        Ok(())
    }

    #[test]
    fn test_try_from() {
        assert!(PathQuery::try_from("a/b").is_ok());
        assert!(PathQuery::try_from("a[1]").is_err());
    }
}
