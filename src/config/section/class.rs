//! `[class]` configuration for the class transformer.
//!
//! # Example
//!
//! ```toml
//! [class]
//! attribute = "class"
//!
//! [class.flags]
//! hidden = "is-hidden"
//!
//! [class.variants]
//! align = "align"   # align="center" -> .align-center
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Class derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassConfig {
    /// Attribute whose whitespace-separated tokens become classes.
    pub attribute: String,

    /// Boolean attributes mapped to the class they switch on.
    pub flags: IndexMap<String, String>,

    /// Valued attributes mapped to a class prefix (`{prefix}-{value}`).
    pub variants: IndexMap<String, String>,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            attribute: "class".into(),
            flags: IndexMap::from([
                ("hidden".into(), "is-hidden".into()),
                ("disabled".into(), "is-disabled".into()),
            ]),
            variants: IndexMap::from([("align".into(), "align".into())]),
        }
    }
}

impl ClassConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attribute.trim().is_empty() {
            return Err(ConfigError::Validation(
                "class.attribute must not be empty".into(),
            ));
        }
        if let Some((attr, _)) = self.flags.iter().find(|(_, class)| class.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "class.flags.{attr} must name a class"
            )));
        }
        if let Some((attr, _)) = self
            .variants
            .iter()
            .find(|(_, prefix)| prefix.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "class.variants.{attr} must name a prefix"
            )));
        }
        Ok(())
    }
}
