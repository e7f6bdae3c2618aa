//! Path query configuration

use crate::error::{Error, ErrorKind, Result};

pub const DEFAULT_MAX_PATH_LENGTH: usize = 4096;
pub const DEFAULT_MAX_STEPS: usize = 256;

/// How the path compiler treats syntax it does not support
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Report predicates, wildcards, attribute selectors, axes and empty
    /// segments as query errors
    #[default]
    Strict,
    /// Accept any path; unsupported syntax matches nothing and empty
    /// segments are skipped
    Lenient,
}

/// Configuration for path query compilation
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub mode: QueryMode,
    /// Maximum path length in bytes
    pub max_path_length: usize,
    /// Maximum number of compiled steps
    pub max_steps: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mode: QueryMode::Strict,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl QueryConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            mode: QueryMode::Lenient,
            ..Self::default()
        }
    }

    pub const fn is_strict(&self) -> bool {
        matches!(self.mode, QueryMode::Strict)
    }

    pub fn validate_path_length(&self, path: &str) -> Result<()> {
        if path.len() > self.max_path_length {
            return Err(Error::new(ErrorKind::MaxPathLengthExceeded {
                max: self.max_path_length,
            }));
        }
        Ok(())
    }

    pub fn validate_steps(&self, count: usize) -> Result<()> {
        if count > self.max_steps {
            return Err(Error::new(ErrorKind::MaxStepsExceeded {
                max: self.max_steps,
            }));
        }
        Ok(())
    }
}
