//! Style derivation (attributes -> inline styles).
//!
//! - Declarations of the `style` attribute become individual styles
//! - Dimension attributes (`width="120"`) become length styles (`width: 120px`)

use crate::config::StyleConfig;
use crate::debug;
use crate::error::TransformError;
use crate::pipeline::AttributeTransformer;
use crate::props::Properties;
use crate::utils::css::{normalize_length, parse_declarations};

/// Derives inline styles from attributes.
#[derive(Debug, Clone)]
pub struct StyleTransformer {
    attribute: String,
    dimensions: Vec<String>,
    default_unit: String,
}

impl StyleTransformer {
    pub fn new(config: &StyleConfig) -> Self {
        Self {
            attribute: config.attribute.clone(),
            dimensions: config.dimensions.clone(),
            default_unit: config.default_unit.clone(),
        }
    }

    fn apply_inline(&self, props: &mut Properties) {
        let Some(inline) = props.get_attribute(&self.attribute) else {
            return;
        };

        let declarations: Vec<(String, String)> = parse_declarations(inline)
            .map(|(key, value)| (key, value.to_owned()))
            .collect();
        for (key, value) in declarations {
            props.add_style(key, value);
        }
    }

    fn apply_dimensions(&self, props: &mut Properties) {
        for name in &self.dimensions {
            let Some(value) = props.get_attribute(name) else {
                continue;
            };

            match normalize_length(value, &self.default_unit) {
                Some(length) => {
                    props.add_style(name.as_str(), length);
                }
                None => debug!("style"; "ignored invalid {} `{}`", name, value),
            }
        }
    }
}

impl AttributeTransformer for StyleTransformer {
    fn name(&self) -> &'static str {
        "style"
    }

    fn merged_attribute(&self) -> Option<&str> {
        Some(&self.attribute)
    }

    fn transform(&self, props: &mut Properties) -> Result<(), TransformError> {
        self.apply_inline(props);
        self.apply_dimensions(props);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
