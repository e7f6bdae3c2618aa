//! Error types for ztree

use std::fmt;
use thiserror::Error;

/// Broad error category, used by callers that only care which kind of
/// operation failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// An index path did not address a valid position
    Addressing,
    /// A path query could not be compiled
    Query,
    /// A mutation would break the tree shape
    Hierarchy,
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyIndexPath,
    IndexOutOfRange { index: usize, len: usize },
    EmptyPath,
    EmptySegment,
    UnsupportedSyntax { segment: String },
    MissingNameSegment,
    MaxPathLengthExceeded { max: usize },
    MaxStepsExceeded { max: usize },
    CycleDetected,
    DuplicateChild,
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::EmptyIndexPath | Self::IndexOutOfRange { .. } => Category::Addressing,
            Self::EmptyPath
            | Self::EmptySegment
            | Self::UnsupportedSyntax { .. }
            | Self::MissingNameSegment
            | Self::MaxPathLengthExceeded { .. }
            | Self::MaxStepsExceeded { .. } => Category::Query,
            Self::CycleDetected | Self::DuplicateChild => Category::Hierarchy,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIndexPath => write!(f, "empty index path"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} children")
            }
            Self::EmptyPath => write!(f, "empty path"),
            Self::EmptySegment => write!(f, "empty path segment"),
            Self::UnsupportedSyntax { segment } => {
                write!(f, "unsupported path syntax in segment: {segment}")
            }
            Self::MissingNameSegment => write!(f, "path does not end with a name segment"),
            Self::MaxPathLengthExceeded { max } => write!(f, "max path length exceeded: {max}"),
            Self::MaxStepsExceeded { max } => write!(f, "max path steps exceeded: {max}"),
            Self::CycleDetected => {
                write!(f, "node cannot become a child of itself or its descendant")
            }
            Self::DuplicateChild => write!(f, "node appears more than once in children"),
        }
    }
}

/// Main error type for ztree
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// Addressing failure at `depth` steps into an index path
    pub fn addressing(kind: ErrorKind, depth: usize) -> Self {
        let message = format!("{kind} at index path step {depth}");
        Self { kind, message }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_addressing(&self) -> bool {
        self.category() == Category::Addressing
    }

    pub fn is_query(&self) -> bool {
        self.category() == Category::Query
    }

    pub fn is_hierarchy(&self) -> bool {
        self.category() == Category::Hierarchy
    }
}

/// Result type alias for ztree
pub type Result<T> = std::result::Result<T, Error>;
