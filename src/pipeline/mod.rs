//! Attribute transformer pipeline.
//!
//! Every attribute write on a [`Properties`] runs the whole pipeline against
//! that store, in registration order. Construction runs it once as well.
//!
//! # Architecture
//!
//! ```text
//! add_attribute(k, v)
//!        │
//!        ▼
//! ┌──────────────────────────────────────────┐
//! │   ClassTransformer -> StyleTransformer   │
//! │          -> BackgroundTransformer        │
//! └──────────────────────────────────────────┘
//!        │  (first error aborts the rest)
//!        ▼
//!   classes / styles updated
//! ```
//!
//! The order is load-bearing: a later transformer may read classes or styles
//! an earlier one wrote during the same run.
//!
//! A transformer may call `add_attribute` itself, which starts a nested run.
//! Nesting is bounded by `max_depth`; a run requested beyond it fails with
//! [`TransformError::RecursionLimit`].

pub mod transform;

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::config::{DEFAULT_MAX_DEPTH, PropsConfig};
use crate::debug;
use crate::error::TransformError;
use crate::props::Properties;

pub use transform::{BackgroundTransformer, ClassTransformer, StyleTransformer};

// =============================================================================
// Transformer capability
// =============================================================================

/// A unit of derivation logic run on every attribute write.
///
/// Implementations read the store and write the classes or styles they own.
/// They must be idempotent: the whole pipeline runs again on every write.
pub trait AttributeTransformer: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Derive presentation from the current store state.
    fn transform(&self, props: &mut Properties) -> Result<(), TransformError>;

    /// Attribute whose whole content this transformer folds into the derived
    /// classes or styles. Rendering leaves it out.
    fn merged_attribute(&self) -> Option<&str> {
        None
    }
}

/// Transformer backed by a closure. See [`transformer_fn`].
pub struct FnTransformer<F> {
    name: &'static str,
    f: F,
}

/// Wrap a closure as an [`AttributeTransformer`].
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().pipe(transformer_fn("lang", |props| {
///     if props.has_attribute("lang") {
///         props.add_class("localized");
///     }
///     Ok(())
/// }));
/// ```
pub fn transformer_fn<F>(name: &'static str, f: F) -> FnTransformer<F>
where
    F: Fn(&mut Properties) -> Result<(), TransformError> + Send + Sync,
{
    FnTransformer { name, f }
}

impl<F> AttributeTransformer for FnTransformer<F>
where
    F: Fn(&mut Properties) -> Result<(), TransformError> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn transform(&self, props: &mut Properties) -> Result<(), TransformError> {
        (self.f)(props)
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Default pipeline built from `PropsConfig::default()`.
static STANDARD: LazyLock<Arc<Pipeline>> =
    LazyLock::new(|| Arc::new(Pipeline::from_config(&PropsConfig::default())));

/// Fixed, ordered list of transformers.
///
/// Built once with [`Pipeline::pipe`], then shared read-only (usually behind
/// an `Arc`) by every store that uses it.
pub struct Pipeline {
    transformers: Vec<Box<dyn AttributeTransformer>>,
    max_depth: usize,
}

impl Pipeline {
    /// Empty pipeline with the default depth bound.
    pub fn new() -> Self {
        Self {
            transformers: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Append a transformer; it runs after every transformer piped before it.
    pub fn pipe(mut self, transformer: impl AttributeTransformer + 'static) -> Self {
        self.transformers.push(Box::new(transformer));
        self
    }

    /// Bound nested runs per store. Values below 1 are raised to 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Class -> Style -> Background, configured from `config`.
    pub fn from_config(config: &PropsConfig) -> Self {
        Self::new()
            .with_max_depth(config.pipeline.max_depth)
            .pipe(ClassTransformer::new(&config.class))
            .pipe(StyleTransformer::new(&config.style))
            .pipe(BackgroundTransformer::new(&config.background))
    }

    /// Shared default pipeline.
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Transformer names in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.transformers.iter().map(|t| t.name())
    }

    /// Source attributes rendered through derived classes or styles.
    pub fn merged_attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.transformers.iter().filter_map(|t| t.merged_attribute())
    }

    /// Run every transformer against `props`, in order.
    ///
    /// Fails fast: the first error skips the remaining transformers.
    /// Refuses to start when `props` already has `max_depth` runs in progress.
    pub fn transform(&self, props: &mut Properties) -> Result<(), TransformError> {
        props.enter_run(self.max_depth)?;

        let mut result = Ok(());
        for transformer in &self.transformers {
            debug!("pipeline"; "{} (depth {})", transformer.name(), props.depth());
            if let Err(e) = transformer.transform(props) {
                result = Err(e);
                break;
            }
        }

        props.exit_run();
        result
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("transformers", &self.names().collect::<Vec<_>>())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::AttrMap;
    use std::sync::Mutex;

    fn empty_props(pipeline: Pipeline) -> Properties {
        Properties::with_pipeline(AttrMap::default(), Arc::new(pipeline)).unwrap()
    }

    #[test]
    fn test_standard_order() {
        let pipeline = Pipeline::standard();
        assert_eq!(
            pipeline.names().collect::<Vec<_>>(),
            vec!["class", "style", "background"]
        );
        assert_eq!(pipeline.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_standard_is_shared() {
        assert!(Arc::ptr_eq(&Pipeline::standard(), &Pipeline::standard()));
    }

    #[test]
    fn test_runs_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let (first, second) = (Arc::clone(&order), Arc::clone(&order));

        let pipeline = Pipeline::new()
            .pipe(transformer_fn("first", move |_| {
                first.lock().unwrap().push("first");
                Ok(())
            }))
            .pipe(transformer_fn("second", move |_| {
                second.lock().unwrap().push("second");
                Ok(())
            }));

        let mut props = empty_props(pipeline);
        props.add_attribute("id", "x").unwrap();

        // once at construction, once for the write
        assert_eq!(
            *order.lock().unwrap(),
            vec!["first", "second", "first", "second"]
        );
    }

    #[test]
    fn test_later_transformer_sees_earlier_writes() {
        let pipeline = Pipeline::new()
            .pipe(transformer_fn("mark", |props| {
                if props.has_attribute("featured") {
                    props.add_class("featured");
                }
                Ok(())
            }))
            .pipe(transformer_fn("highlight", |props| {
                if props.has_class("featured") {
                    props.add_style("border-color", "gold");
                }
                Ok(())
            }));

        let mut props = empty_props(pipeline);
        props.add_attribute("featured", "").unwrap();
        assert_eq!(props.get_styles(), "border-color: gold");
    }

    #[test]
    fn test_fail_fast_skips_remaining() {
        let pipeline = Pipeline::new()
            .pipe(transformer_fn("guard", |props| {
                if props.get_attribute("role") == Some("forbidden") {
                    return Err(TransformError::rejected("guard", "forbidden role"));
                }
                Ok(())
            }))
            .pipe(transformer_fn("after", |props| {
                props.add_class("after-ran");
                Ok(())
            }));

        let mut props = empty_props(pipeline);
        props.delete_class("after-ran");

        let err = props.add_attribute("role", "forbidden").unwrap_err();
        assert_eq!(err, TransformError::rejected("guard", "forbidden role"));
        assert!(!props.has_class("after-ran"));
        // The attribute itself was stored before the pipeline ran
        assert_eq!(props.get_attribute("role"), Some("forbidden"));
        assert_eq!(props.depth(), 0);
    }

    #[test]
    fn test_merged_attributes_follow_config() {
        let mut config = PropsConfig::default();
        config.class.attribute = "data-class".into();
        let pipeline = Pipeline::from_config(&config);
        assert_eq!(
            pipeline.merged_attributes().collect::<Vec<_>>(),
            vec!["data-class", "style"]
        );
        assert_eq!(Pipeline::new().merged_attributes().count(), 0);
    }

    #[test]
    fn test_max_depth_floor() {
        assert_eq!(Pipeline::new().with_max_depth(0).max_depth(), 1);
    }

    #[test]
    fn test_debug_lists_names() {
        let debug = format!("{:?}", Pipeline::from_config(&PropsConfig::default()));
        assert!(debug.contains("\"class\""));
        assert!(debug.contains("\"background\""));
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline>();
    }
}
