//! Transformer configuration, usually read from a `props.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── pipeline   # [pipeline]
//! │   ├── class      # [class]
//! │   ├── style      # [style]
//! │   └── background # [background]
//! ├── error          # ConfigError
//! └── mod.rs         # PropsConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[pipeline]`   | Re-entrancy bound for nested pipeline runs      |
//! | `[class]`      | Attribute -> class derivation                   |
//! | `[style]`      | Inline style and dimension -> style derivation  |
//! | `[background]` | Background color/image derivation               |

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{
    BackgroundConfig, ClassConfig, DEFAULT_MAX_DEPTH, PipelineConfig, StyleConfig,
};

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::debug;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropsConfig {
    /// Pipeline settings
    pub pipeline: PipelineConfig,

    /// Class transformer settings
    pub class: ClassConfig,

    /// Style transformer settings
    pub style: StyleConfig,

    /// Background transformer settings
    pub background: BackgroundConfig,
}

impl PropsConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&content)?;
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        self.class.validate()?;
        self.style.validate()?;
        self.background.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================
