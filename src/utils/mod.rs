//! Utility modules shared by the store and the transformers.

pub mod css;
pub mod html;
