//! Built-in attribute transformers.
//!
//! Each transformer owns a distinct set of classes/styles and never touches
//! keys owned by another one.
//!
//! # Modules
//!
//! - `class`: `class` tokens, boolean flags and valued variants -> classes
//! - `style`: inline `style` declarations and dimension attributes -> styles
//! - `background`: `bgcolor`/`background` -> background styles and tone classes

mod background;
mod class;
mod style;

pub use background::BackgroundTransformer;
pub use class::ClassTransformer;
pub use style::StyleTransformer;
