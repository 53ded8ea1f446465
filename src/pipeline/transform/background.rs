//! Background derivation.
//!
//! Reads the first present background attribute (`bgcolor`, `background`):
//! - colors become `background-color`
//! - anything else is treated as an image and becomes `background-image`
//!
//! The transparent class (default `no-bg`) overrides both. It is usually
//! added by the class transformer earlier in the same run, so this
//! transformer must stay after it in the pipeline.

use crate::config::BackgroundConfig;
use crate::error::TransformError;
use crate::pipeline::AttributeTransformer;
use crate::props::Properties;
use crate::utils::css::{hex_luminance, is_color};

const BG_COLOR: &str = "background-color";
const BG_IMAGE: &str = "background-image";
const CLASS_DARK: &str = "bg-dark";
const CLASS_LIGHT: &str = "bg-light";

/// Luminance below which a background counts as dark.
const DARK_THRESHOLD: f32 = 0.5;

/// Derives background styles and tone classes.
#[derive(Debug, Clone)]
pub struct BackgroundTransformer {
    attributes: Vec<String>,
    transparent_class: String,
    contrast: bool,
}

impl BackgroundTransformer {
    pub fn new(config: &BackgroundConfig) -> Self {
        Self {
            attributes: config.attributes.clone(),
            transparent_class: config.transparent_class.clone(),
            contrast: config.contrast,
        }
    }

    /// First non-blank background attribute value.
    fn source(&self, props: &Properties) -> Option<String> {
        self.attributes
            .iter()
            .filter_map(|attr| props.get_attribute(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    }

    fn apply_tone(&self, props: &mut Properties, color: &str) {
        if !self.contrast {
            return;
        }

        let tone = hex_luminance(color).map(|l| {
            if l < DARK_THRESHOLD {
                (CLASS_DARK, CLASS_LIGHT)
            } else {
                (CLASS_LIGHT, CLASS_DARK)
            }
        });

        // Re-adding an existing class keeps its position
        match tone {
            Some((on, off)) => {
                props.delete_class(off).add_class(on);
            }
            None => {
                props.delete_class(CLASS_DARK).delete_class(CLASS_LIGHT);
            }
        }
    }
}

impl AttributeTransformer for BackgroundTransformer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn transform(&self, props: &mut Properties) -> Result<(), TransformError> {
        if !self.transparent_class.is_empty() && props.has_class(&self.transparent_class) {
            if self.contrast {
                props.delete_class(CLASS_DARK).delete_class(CLASS_LIGHT);
            }
            props
                .add_style(BG_COLOR, "transparent")
                .delete_style(BG_IMAGE);
            return Ok(());
        }

        let Some(value) = self.source(props) else {
            return Ok(());
        };

        if is_color(&value) {
            self.apply_tone(props, &value);
            props.add_style(BG_COLOR, value).delete_style(BG_IMAGE);
        } else {
            self.apply_tone(props, "");
            let url = format!("url(\"{}\")", value.replace('"', "%22"));
            props.add_style(BG_IMAGE, url).delete_style(BG_COLOR);
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
