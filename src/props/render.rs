//! Markup rendering of a [`Properties`] store.
//!
//! Produces the attribute part of a start tag, with values escaped:
//!
//! ```text
//! id="hero" data-x="1" class="card bg-dark" style="background-color: #111"
//! ```
//!
//! The source attributes the pipeline merges (by default `class` and
//! `style`) are not emitted; their content reaches the output through the
//! derived classes and styles instead. Raw `class`/`style` attributes are
//! always skipped so the merged ones are never duplicated.

use super::Properties;
use crate::utils::html::push_attr;

const ATTR_CLASS: &str = "class";
const ATTR_STYLE: &str = "style";

impl Properties {
    /// Render all attributes, classes and styles as escaped markup attributes.
    pub fn render_attrs(&self) -> String {
        let mut out = String::new();

        let merged: Vec<&str> = self.pipeline().merged_attributes().collect();
        for (key, value) in self.attributes() {
            if key == ATTR_CLASS || key == ATTR_STYLE || merged.contains(&key) {
                continue;
            }
            push_attr(&mut out, key, value);
        }

        let classes = self.get_classes();
        if !classes.is_empty() {
            push_attr(&mut out, ATTR_CLASS, &classes);
        }

        let styles = self.get_styles();
        if !styles.is_empty() {
            push_attr(&mut out, ATTR_STYLE, &styles);
        }

        out
    }
}
