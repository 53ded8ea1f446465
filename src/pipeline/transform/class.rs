//! Class derivation (attributes -> classes).
//!
//! - Tokens of the `class` attribute are added as classes
//! - Boolean flags (`hidden`) switch a mapped class (`is-hidden`) on or off
//! - Variants (`align="center"`) keep exactly one derived `{prefix}-{value}` class

use crate::config::ClassConfig;
use crate::error::TransformError;
use crate::pipeline::AttributeTransformer;
use crate::props::Properties;

/// Flag value that switches a flag class off.
const FLAG_OFF: &str = "false";

/// Derives classes from attributes.
#[derive(Debug, Clone)]
pub struct ClassTransformer {
    attribute: String,
    flags: Vec<(String, String)>,
    variants: Vec<(String, String)>,
}

impl ClassTransformer {
    pub fn new(config: &ClassConfig) -> Self {
        Self {
            attribute: config.attribute.clone(),
            flags: config
                .flags
                .iter()
                .map(|(attr, class)| (attr.clone(), class.clone()))
                .collect(),
            variants: config
                .variants
                .iter()
                .map(|(attr, prefix)| (attr.clone(), prefix.clone()))
                .collect(),
        }
    }

    fn apply_tokens(&self, props: &mut Properties) {
        let Some(value) = props.get_attribute(&self.attribute) else {
            return;
        };

        let tokens: Vec<String> = value.split_whitespace().map(str::to_owned).collect();
        for token in tokens {
            props.add_class(token);
        }
    }

    fn apply_flags(&self, props: &mut Properties) {
        for (attr, class) in &self.flags {
            match props.get_attribute(attr) {
                Some(value) if value.trim().eq_ignore_ascii_case(FLAG_OFF) => {
                    props.delete_class(class);
                }
                Some(_) => {
                    props.add_class(class.as_str());
                }
                None => {}
            }
        }
    }

    /// Only the class derived from the previous value is replaced, so tokens
    /// sharing the prefix (`align-self-end`) survive.
    fn apply_variants(&self, props: &mut Properties) {
        for (attr, prefix) in &self.variants {
            let Some(value) = props.get_attribute(attr) else {
                continue;
            };

            let current = variant_class(prefix, value);
            props.swap_derived_class(&format!("{}:{attr}", self.name()), current);
        }
    }
}

/// `{prefix}-{value}` with the value lower-cased and whitespace runs as `-`.
///
/// Returns `None` for a blank value.
fn variant_class(prefix: &str, value: &str) -> Option<String> {
    let slug = value
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    (!slug.is_empty()).then(|| format!("{prefix}-{slug}"))
}

impl AttributeTransformer for ClassTransformer {
    fn name(&self) -> &'static str {
        "class"
    }

    fn merged_attribute(&self) -> Option<&str> {
        Some(&self.attribute)
    }

    fn transform(&self, props: &mut Properties) -> Result<(), TransformError> {
        // Variants first: a replaced variant class that the `class`
        // attribute also lists is restored by the tokens
        self.apply_variants(props);
        self.apply_tokens(props);
        self.apply_flags(props);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
