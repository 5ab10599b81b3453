//! The transformation engine.
//!
//! Walks a data object's schema in order, decides visibility per property,
//! forces the lazies that end up visible and recurses into nested objects
//! and collections with the directives scoped to that property.

use partials_model::{
    DataCollection, DataObject, DeferredKind, DeferredProp, Field, LazyPolicy, Property,
    Transformed, TransformedObject,
};
use tracing::{debug_span, trace};

use crate::config::PartialsConfig;
use crate::directives::DirectiveSet;
use crate::error::{Result, TransformError};
use crate::path::PropertyPath;

/// What to do with lazies created by `Lazy::deferred` and `Lazy::closure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeferredMode {
    /// Emit a wrapper carrying the producer without forcing it.
    #[default]
    Wrap,
    /// Force the producer and emit its value.
    Resolve,
}

/// Options for one transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub deferred: DeferredMode,
    /// Maximum nesting depth of data objects; `None` for no limit.
    pub max_depth: Option<usize>,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for output headed to a JSON body.
    pub fn for_json() -> Self {
        Self::default().with_deferred(DeferredMode::Resolve)
    }

    #[must_use]
    pub fn with_deferred(mut self, mode: DeferredMode) -> Self {
        self.deferred = mode;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Transforms data objects against a configuration.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'c> {
    config: &'c PartialsConfig,
    options: TransformOptions,
}

impl Default for Transformer<'static> {
    fn default() -> Self {
        Self::new(PartialsConfig::empty())
    }
}

impl<'c> Transformer<'c> {
    pub fn new(config: &'c PartialsConfig) -> Self {
        Self {
            config,
            options: TransformOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &'c PartialsConfig {
        self.config
    }

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    /// Transform one data object.
    pub fn transform(
        &self,
        object: &dyn DataObject,
        directives: &DirectiveSet,
    ) -> Result<TransformedObject> {
        self.transform_object(object, directives.clone(), &PropertyPath::root(), 0)
    }

    /// Transform every element of a collection with the same directives.
    pub fn transform_collection(
        &self,
        collection: &DataCollection,
        directives: &DirectiveSet,
    ) -> Result<Transformed> {
        self.transform_each(collection, directives, &PropertyPath::root(), 0)
    }

    pub(crate) fn transform_object(
        &self,
        object: &dyn DataObject,
        mut scope: DirectiveSet,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<TransformedObject> {
        if let Some(max_depth) = self.options.max_depth
            && depth > max_depth
        {
            return Err(TransformError::DepthExceeded {
                path: path.to_string(),
                max_depth,
            });
        }

        let type_name = object.type_name();
        let span = debug_span!("transform_object", type_name, depth, path = %path);
        let _guard = span.enter();

        scope.apply_type_config(self.config.for_object(object), object);
        let active = scope.combined();

        let mut output = TransformedObject::new();
        for (name, property) in object.properties() {
            let visible = active.is_property_visible(name, property);
            trace!(property = name, visible, "visibility decided");
            if !visible {
                continue;
            }

            let property_path = path.property(name);
            let field = match property {
                Property::Eager(field) => field,
                Property::Lazy(lazy) => {
                    if let (LazyPolicy::Deferred(kind), DeferredMode::Wrap) =
                        (lazy.policy(), self.options.deferred)
                    {
                        let prop = DeferredProp::new(lazy.clone());
                        let wrapped = match kind {
                            DeferredKind::Prop => Transformed::Deferred(prop),
                            DeferredKind::Closure => Transformed::Closure(prop.into_closure()),
                        };
                        trace!(property = name, ?kind, "kept deferred lazy unforced");
                        output.insert(name, wrapped);
                        continue;
                    }
                    trace!(property = name, "forcing lazy");
                    lazy.resolve().map_err(|source| TransformError::Resolve {
                        path: property_path.to_string(),
                        source,
                    })?
                }
            };

            if field.is_absent() {
                trace!(property = name, "resolved to absent, omitted");
                continue;
            }

            let value =
                self.transform_field(field, scope.scope_into(name), &property_path, depth)?;
            output.insert(name, value);
        }

        Ok(output)
    }

    fn transform_field(
        &self,
        field: &Field,
        scope: DirectiveSet,
        path: &PropertyPath,
        depth: usize,
    ) -> Result<Transformed> {
        match field {
            Field::Value(value) => Ok(Transformed::Value(value.clone())),
            Field::Data(data) => self
                .transform_object(data.as_ref(), scope, path, depth + 1)
                .map(Transformed::Object),
            Field::Collection(collection) => self.transform_each(collection, &scope, path, depth + 1),
            Field::Absent => Ok(Transformed::Value(serde_json::Value::Null)),
        }
    }
}
