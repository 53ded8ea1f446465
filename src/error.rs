//! Pipeline error types.

use thiserror::Error;

// ============================================================================
// TransformError
// ============================================================================

/// Errors raised while running the transformer pipeline.
///
/// The first error aborts the remaining transformers of that run and is
/// returned to whoever triggered it (construction or `add_attribute`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A transformer wrote an attribute from inside `transform` often enough
    /// that nested pipeline runs reached the configured depth.
    #[error("pipeline re-entered beyond max depth {limit}")]
    RecursionLimit { limit: usize },

    /// A transformer refused the current store state.
    #[error("transformer `{transformer}` failed: {message}")]
    Rejected {
        transformer: &'static str,
        message: String,
    },
}

impl TransformError {
    /// Shorthand for a [`TransformError::Rejected`].
    pub fn rejected(transformer: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            transformer,
            message: message.into(),
        }
    }
}
