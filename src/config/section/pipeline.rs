//! `[pipeline]` configuration.
//!
//! # Example
//!
//! ```toml
//! [pipeline]
//! max_depth = 4
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Default bound on nested pipeline runs per store.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Pipeline-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Maximum number of pipeline runs that may be in progress on one store.
    ///
    /// `1` forbids attribute writes from inside a transformer entirely.
    pub max_depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Validation(
                "pipeline.max_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
