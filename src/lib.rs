//! Tola props - presentational state of a single renderable element.
//!
//! A [`Properties`] store holds an element's attributes, CSS classes and
//! inline styles. Every attribute write runs a fixed [`Pipeline`] of
//! [`AttributeTransformer`]s that keep classes and styles derived from the
//! attributes, so a template renderer only has to read three strings:
//!
//! ```ignore
//! use tola_props::Properties;
//!
//! let mut props = Properties::from_pairs([("id", "x"), ("width", "120")])?;
//! props.add_attribute("bgcolor", "#fafafa")?;
//!
//! assert_eq!(props.get_attributes(), r##"id="x" width="120" bgcolor="#fafafa""##);
//! assert_eq!(props.get_classes(), "bg-light");
//! assert_eq!(props.get_styles(), "width: 120px; background-color: #fafafa");
//! ```
//!
//! # Modules
//!
//! - `props`: the store and its serialization
//! - `pipeline`: transformer capability, ordering and the built-in transformers
//! - `config`: `props.toml` settings for the built-in transformers
//! - `logger`: `log!` / `debug!` output

pub mod config;
mod error;
pub mod logger;
pub mod pipeline;
pub mod props;
mod utils;

pub use config::{ConfigError, PropsConfig};
pub use error::TransformError;
pub use pipeline::{
    AttributeTransformer, BackgroundTransformer, ClassTransformer, FnTransformer, Pipeline,
    StyleTransformer, transformer_fn,
};
pub use props::{AttrMap, ClassSet, Properties};
