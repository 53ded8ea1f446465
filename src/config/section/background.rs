//! `[background]` configuration for the background transformer.
//!
//! # Example
//!
//! ```toml
//! [background]
//! attributes = ["bgcolor", "background"]
//! transparent_class = "no-bg"
//! contrast = true
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Background derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Attributes checked in order; the first present one drives the output.
    pub attributes: Vec<String>,

    /// Class that forces a transparent background when present.
    pub transparent_class: String,

    /// Add `bg-dark` / `bg-light` based on the luminance of hex colors.
    pub contrast: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            attributes: vec!["bgcolor".into(), "background".into()],
            transparent_class: "no-bg".into(),
            contrast: true,
        }
    }
}

impl BackgroundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attributes.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "background.attributes must not contain empty names".into(),
            ));
        }
        Ok(())
    }
}
