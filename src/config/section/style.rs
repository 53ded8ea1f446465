//! `[style]` configuration for the style transformer.
//!
//! # Example
//!
//! ```toml
//! [style]
//! attribute = "style"
//! dimensions = ["width", "height"]
//! default_unit = "px"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Style derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Attribute holding inline CSS declarations.
    pub attribute: String,

    /// Attributes copied into a same-named style when they hold a CSS length.
    pub dimensions: Vec<String>,

    /// Unit appended to unitless dimension values.
    pub default_unit: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            attribute: "style".into(),
            dimensions: vec!["width".into(), "height".into()],
            default_unit: "px".into(),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute.trim().is_empty() {
            return Err(ConfigError::Validation(
                "style.attribute must not be empty".into(),
            ));
        }
        if self.dimensions.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "style.dimensions must not contain empty names".into(),
            ));
        }
        Ok(())
    }
}
