//! Single-element property store.
//!
//! [`Properties`] owns three containers for one renderable element:
//!
//! | Container    | Semantics                        | Serialized as        |
//! |--------------|----------------------------------|----------------------|
//! | `attributes` | name -> value, insertion order   | `k="v" k2="v2"`      |
//! | `classes`    | token set, insertion order       | `a b c`              |
//! | `styles`     | property -> value, insertion order | `k: v; k2: v2`     |
//!
//! Writing an attribute runs the transformer pipeline against the store, so
//! derived classes and styles follow the attributes. Deleting an attribute
//! does not: whatever was derived from it stays until another write changes it.
//!
//! # Example
//!
//! ```ignore
//! let mut props = Properties::from_pairs([("id", "hero"), ("bgcolor", "#111")])?;
//! props.add_class("card").add_style("margin", "0");
//! props.add_attribute("align", "center")?;
//!
//! assert_eq!(props.get_classes(), "bg-dark card align-center");
//! ```

mod render;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

use crate::error::TransformError;
use crate::log;
use crate::pipeline::Pipeline;

/// Insertion-ordered string map used for attributes and styles.
pub type AttrMap = IndexMap<String, String, FxBuildHasher>;

/// Insertion-ordered class token set.
pub type ClassSet = IndexSet<String, FxBuildHasher>;

// =============================================================================
// Properties
// =============================================================================

/// Presentational state of one element.
#[derive(Debug)]
pub struct Properties {
    attributes: AttrMap,
    classes: ClassSet,
    styles: AttrMap,
    /// Slot -> class a transformer last derived for it.
    derived_classes: AttrMap,
    pipeline: Arc<Pipeline>,
    /// Pipeline runs currently in progress on this store.
    depth: usize,
}

/// A clone is a fresh store: it starts outside any pipeline run.
impl Clone for Properties {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            classes: self.classes.clone(),
            styles: self.styles.clone(),
            derived_classes: self.derived_classes.clone(),
            pipeline: Arc::clone(&self.pipeline),
            depth: 0,
        }
    }
}

impl Properties {
    /// Create a store using the standard pipeline.
    ///
    /// The pipeline runs once over `attributes` before this returns.
    pub fn new(attributes: AttrMap) -> Result<Self, TransformError> {
        Self::with_pipeline(attributes, Pipeline::standard())
    }

    /// Create a store with an explicit pipeline.
    pub fn with_pipeline(
        attributes: AttrMap,
        pipeline: Arc<Pipeline>,
    ) -> Result<Self, TransformError> {
        let mut props = Self {
            attributes,
            classes: ClassSet::default(),
            styles: AttrMap::default(),
            derived_classes: AttrMap::default(),
            pipeline,
            depth: 0,
        };
        props.run_pipeline()?;
        Ok(props)
    }

    /// Create a store from `(name, value)` pairs using the standard pipeline.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, TransformError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(attributes)
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    /// Add a class. Re-adding an existing class changes nothing.
    pub fn add_class(&mut self, name: impl Into<String>) -> &mut Self {
        self.classes.insert(name.into());
        self
    }

    pub fn delete_class(&mut self, name: &str) -> &mut Self {
        self.classes.shift_remove(name);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Class tokens in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Replace the class last derived for `slot` with `class`.
    ///
    /// Only the class previously recorded under `slot` is removed, so classes
    /// added by callers or other sources are left alone. `None` clears the slot.
    pub fn swap_derived_class(&mut self, slot: &str, class: Option<String>) -> &mut Self {
        let previous = match &class {
            Some(class) => self.derived_classes.insert(slot.to_owned(), class.clone()),
            None => self.derived_classes.shift_remove(slot),
        };
        if let Some(previous) = previous.filter(|p| Some(p) != class.as_ref()) {
            self.classes.shift_remove(&previous);
        }
        if let Some(class) = class {
            self.classes.insert(class);
        }
        self
    }

    /// Space-joined class tokens; empty when there are none.
    pub fn get_classes(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    // -------------------------------------------------------------------------
    // Styles
    // -------------------------------------------------------------------------

    /// Add or overwrite a style declaration.
    ///
    /// Overwriting keeps the declaration at its original position.
    pub fn add_style(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    pub fn delete_style(&mut self, key: &str) -> &mut Self {
        self.styles.shift_remove(key);
        self
    }

    pub fn has_style(&self, key: &str) -> bool {
        self.styles.contains_key(key)
    }

    pub fn get_style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Style declarations in insertion order.
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key: value` pairs joined by `"; "`; empty when there are none.
    pub fn get_styles(&self) -> String {
        self.styles()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    /// Add or overwrite an attribute, then run the pipeline.
    ///
    /// The value is stored even when the pipeline fails; the error is the
    /// first one a transformer returned, or [`TransformError::RecursionLimit`]
    /// when this write happened too deep inside nested runs.
    pub fn add_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, TransformError> {
        self.attributes.insert(key.into(), value.into());
        self.run_pipeline()?;
        Ok(self)
    }

    /// Remove an attribute. Does not run the pipeline, so classes and styles
    /// derived from it are kept.
    pub fn delete_attribute(&mut self, key: &str) -> &mut Self {
        self.attributes.shift_remove(key);
        self
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key="value"` pairs joined by spaces, values unescaped.
    pub fn get_attributes(&self) -> String {
        self.attributes()
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    /// Number of pipeline runs currently in progress on this store.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn run_pipeline(&mut self) -> Result<(), TransformError> {
        let pipeline = Arc::clone(&self.pipeline);
        pipeline.transform(self)
    }

    /// Mark the start of a pipeline run, refusing it beyond `limit`.
    pub(crate) fn enter_run(&mut self, limit: usize) -> Result<(), TransformError> {
        if self.depth >= limit {
            log!("error"; "pipeline re-entered {} levels deep, refusing nested run", self.depth);
            return Err(TransformError::RecursionLimit { limit });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_run(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::transformer_fn;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Pipeline whose single transformer counts its runs.
    fn counting() -> (Arc<Pipeline>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let pipeline = Pipeline::new().pipe(transformer_fn("count", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        (Arc::new(pipeline), runs)
    }

    fn attrs(pairs: &[(&str, &str)]) -> AttrMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Classes / styles
    // -------------------------------------------------------------------------

    #[test]
    fn test_class_add_delete() {
        let (pipeline, _) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();

        props.add_class("card");
        assert!(props.has_class("card"));

        props.delete_class("card");
        assert!(!props.has_class("card"));

        // Absent class is a no-op
        props.delete_class("missing");
        assert_eq!(props.get_classes(), "");
    }

    #[test]
    fn test_class_added_twice_appears_once() {
        let (pipeline, _) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();

        props.add_class("a").add_class("b").add_class("a");
        assert_eq!(props.get_classes(), "a b");
    }

    #[test]
    fn test_swap_derived_class_only_removes_its_own() {
        let (pipeline, _) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();
        props.add_class("size-xl");

        props.swap_derived_class("size", Some("size-sm".into()));
        assert_eq!(props.get_classes(), "size-xl size-sm");

        props.swap_derived_class("size", Some("size-md".into()));
        assert_eq!(props.get_classes(), "size-xl size-md");

        // Same class again keeps its position
        props.add_class("tail");
        props.swap_derived_class("size", Some("size-md".into()));
        assert_eq!(props.get_classes(), "size-xl size-md tail");

        props.swap_derived_class("size", None);
        assert_eq!(props.get_classes(), "size-xl tail");
    }

    #[test]
    fn test_style_overwrite() {
        let (pipeline, _) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();

        props
            .add_style("color", "red")
            .add_style("margin", "0")
            .add_style("color", "blue");
        assert!(props.has_style("color"));
        assert_eq!(props.get_styles(), "color: blue; margin: 0");

        props.delete_style("color");
        assert!(!props.has_style("color"));
        assert_eq!(props.get_styles(), "margin: 0");
    }

    #[test]
    fn test_class_and_style_writes_skip_pipeline() {
        let (pipeline, runs) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        props.add_class("a").add_style("k", "v").delete_class("a");
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_attribute_runs_pipeline() {
        let (pipeline, runs) = counting();
        let mut props = Properties::with_pipeline(AttrMap::default(), pipeline).unwrap();

        props.add_attribute("id", "x").unwrap();
        assert!(props.has_attribute("id"));
        assert_eq!(props.get_attribute("id"), Some("x"));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_delete_attribute_skips_pipeline() {
        let (pipeline, runs) = counting();
        let mut props = Properties::with_pipeline(attrs(&[("id", "x")]), pipeline).unwrap();

        props.delete_attribute("id");
        assert!(!props.has_attribute("id"));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delete_attribute_keeps_derived_state() {
        let mut props = Properties::from_pairs([("align", "center"), ("width", "10")]).unwrap();
        assert!(props.has_class("align-center"));

        props.delete_attribute("align").delete_attribute("width");
        assert!(props.has_class("align-center"));
        assert_eq!(props.get_style("width"), Some("10px"));
    }

    #[test]
    fn test_get_missing_attribute() {
        let props = Properties::new(AttrMap::default()).unwrap();
        assert_eq!(props.get_attribute("nope"), None);
        assert!(!props.has_attribute("nope"));
    }

    #[test]
    fn test_attribute_overwrite_keeps_position() {
        let mut props = Properties::from_pairs([("id", "x"), ("role", "banner")]).unwrap();
        props.add_attribute("id", "y").unwrap();
        assert_eq!(props.get_attributes(), "id=\"y\" role=\"banner\"");
    }

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_construction_runs_pipeline_once() {
        let (pipeline, runs) = counting();
        let _props = Properties::with_pipeline(attrs(&[("a", "1"), ("b", "2")]), pipeline).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    /// Construction from `pairs` must derive what writing them one by one does.
    fn assert_construction_matches(pairs: &[(&str, &str)]) {
        let built = Properties::from_pairs(pairs.iter().copied()).unwrap();

        let mut incremental = Properties::new(AttrMap::default()).unwrap();
        for &(k, v) in pairs {
            incremental.add_attribute(k, v).unwrap();
        }

        let classes = |p: &Properties| {
            let mut classes = p.classes().map(str::to_owned).collect::<Vec<_>>();
            classes.sort();
            classes
        };
        assert_eq!(classes(&built), classes(&incremental), "classes for {pairs:?}");

        let styles = |p: &Properties| {
            p.styles()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect::<BTreeMap<_, _>>()
        };
        assert_eq!(styles(&built), styles(&incremental), "styles for {pairs:?}");
        assert_eq!(built.get_attributes(), incremental.get_attributes());
    }

    #[test]
    fn test_construction_matches_incremental_writes() {
        let pairs = [
            ("class", "card no-bg"),
            ("align", "Center"),
            ("style", "color: red; padding: 4px"),
            ("width", "320"),
            ("bgcolor", "#202020"),
            ("hidden", ""),
        ];
        assert_construction_matches(&pairs);

        let mut reversed = pairs;
        reversed.reverse();
        assert_construction_matches(&reversed);
    }

    #[test]
    fn test_construction_matches_for_order_dependent_backgrounds() {
        // Tone class derived before the transparent class arrives
        assert_construction_matches(&[("bgcolor", "#000"), ("class", "no-bg")]);
        assert_construction_matches(&[("class", "no-bg"), ("bgcolor", "#000")]);
        // Image derived before the transparent class arrives
        assert_construction_matches(&[("background", "/img/a.png"), ("class", "no-bg")]);
        assert_construction_matches(&[("class", "no-bg"), ("background", "/img/a.png")]);
        assert_construction_matches(&[("background", "#fafafa"), ("bgcolor", "#111")]);
    }

    #[test]
    fn test_construction_matches_with_variant_and_class_tokens() {
        assert_construction_matches(&[("class", "align-self-end card"), ("align", "center")]);
        assert_construction_matches(&[("align", "center"), ("class", "align-self-end card")]);
        assert_construction_matches(&[("align", "left"), ("class", "align-left"), ("hidden", "false")]);
    }

    #[test]
    fn test_empty_store_serializes_empty() {
        let props = Properties::new(AttrMap::default()).unwrap();
        assert_eq!(props.get_classes(), "");
        assert_eq!(props.get_styles(), "");
        assert_eq!(props.get_attributes(), "");
    }

    #[test]
    fn test_unrelated_attribute_end_to_end() {
        let props = Properties::from_pairs([("id", "x")]).unwrap();
        assert_eq!(props.get_attributes(), "id=\"x\"");
        assert_eq!(props.get_classes(), "");
        assert_eq!(props.get_styles(), "");
    }

    #[test]
    fn test_standard_pipeline_end_to_end() {
        let mut props =
            Properties::from_pairs([("id", "hero"), ("bgcolor", "#111"), ("class", "card")])
                .unwrap();
        props.add_attribute("align", "center").unwrap();

        assert_eq!(props.get_classes(), "card bg-dark align-center");
        assert_eq!(props.get_styles(), "background-color: #111");
        assert_eq!(
            props.get_attributes(),
            "id=\"hero\" bgcolor=\"#111\" class=\"card\" align=\"center\""
        );
    }

    // -------------------------------------------------------------------------
    // Re-entrancy
    // -------------------------------------------------------------------------

    #[test]
    fn test_nested_attribute_write_is_bounded() {
        // Writes `derived` once; the nested run sees it and stops.
        let pipeline = Pipeline::new().pipe(transformer_fn("derive", |props| {
            if props.has_attribute("source") && !props.has_attribute("derived") {
                props.add_attribute("derived", "yes")?;
            }
            Ok(())
        }));

        let mut props = Properties::with_pipeline(AttrMap::default(), Arc::new(pipeline)).unwrap();
        props.add_attribute("source", "1").unwrap();

        assert_eq!(props.get_attribute("derived"), Some("yes"));
        assert_eq!(props.depth(), 0);
    }

    #[test]
    fn test_runaway_attribute_writes_hit_limit() {
        let pipeline = Pipeline::new()
            .with_max_depth(3)
            .pipe(transformer_fn("runaway", |props| {
                if props.has_attribute("loop") {
                    let next = props.depth().to_string();
                    props.add_attribute("loop", next)?;
                }
                Ok(())
            }));

        let mut props = Properties::with_pipeline(AttrMap::default(), Arc::new(pipeline)).unwrap();
        let err = props.add_attribute("loop", "start").unwrap_err();
        assert_eq!(err, TransformError::RecursionLimit { limit: 3 });
        assert_eq!(props.depth(), 0);

        // The store stays usable after the guard trips
        props.delete_attribute("loop");
        props.add_attribute("id", "x").unwrap();
        assert_eq!(props.get_attribute("id"), Some("x"));
    }

    #[test]
    fn test_depth_one_forbids_nested_writes() {
        let pipeline = Pipeline::new()
            .with_max_depth(1)
            .pipe(transformer_fn("writer", |props| {
                if props.has_attribute("source") && !props.has_attribute("derived") {
                    props.add_attribute("derived", "yes")?;
                }
                Ok(())
            }));

        let mut props = Properties::with_pipeline(AttrMap::default(), Arc::new(pipeline)).unwrap();
        let err = props.add_attribute("source", "1").unwrap_err();
        assert_eq!(err, TransformError::RecursionLimit { limit: 1 });
    }

    #[test]
    fn test_clone_starts_outside_pipeline_run() {
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let inner = Arc::new(AtomicUsize::new(0));
        let (seen_in, inner_in) = (Arc::clone(&seen), Arc::clone(&inner));

        let pipeline = Pipeline::new().pipe(transformer_fn("snapshot", move |props| {
            inner_in.store(props.depth(), Ordering::SeqCst);
            seen_in.store(props.clone().depth(), Ordering::SeqCst);
            Ok(())
        }));

        let props = Properties::with_pipeline(attrs(&[("id", "x")]), Arc::new(pipeline)).unwrap();
        assert_eq!(inner.load(Ordering::SeqCst), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        let copy = props.clone();
        assert_eq!(copy.get_attributes(), props.get_attributes());
        assert!(Arc::ptr_eq(copy.pipeline(), props.pipeline()));
    }

    #[test]
    fn test_clone_keeps_derived_class_ledger() {
        let props = Properties::from_pairs([("align", "center")]).unwrap();
        let mut copy = props.clone();
        copy.add_attribute("align", "left").unwrap();
        assert_eq!(copy.get_classes(), "align-left");
        assert_eq!(props.get_classes(), "align-center");
    }

    #[test]
    fn test_construction_reports_pipeline_error() {
        let pipeline = Pipeline::new().pipe(transformer_fn("strict", |props| {
            if props.has_attribute("onclick") {
                return Err(TransformError::rejected("strict", "inline handlers"));
            }
            Ok(())
        }));

        let err = Properties::with_pipeline(attrs(&[("onclick", "x()")]), Arc::new(pipeline))
            .unwrap_err();
        assert!(matches!(err, TransformError::Rejected { transformer: "strict", .. }));
    }

    #[test]
    fn test_properties_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Properties>();
    }
}
