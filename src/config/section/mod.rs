//! Configuration section definitions.

mod background;
mod class;
mod pipeline;
mod style;

pub use background::BackgroundConfig;
pub use class::ClassConfig;
pub use pipeline::{DEFAULT_MAX_DEPTH, PipelineConfig};
pub use style::StyleConfig;
