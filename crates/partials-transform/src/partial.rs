//! Fluent builder pairing a target with its directives.
//!
//! ```
//! use partials_model::{Lazy, Property, data_object};
//! use partials_transform::PartialExt;
//!
//! #[derive(Debug)]
//! struct Song {
//!     name: Property,
//!     artist: Property,
//! }
//!
//! data_object!(Song { name, artist });
//!
//! let song = Song {
//!     name: Lazy::create(|| "Never gonna give you up").into(),
//!     artist: "Rick Astley".into(),
//! };
//!
//! let json = song.partial().include("name")?.to_json()?;
//! assert_eq!(json["name"], "Never gonna give you up");
//! # Ok::<(), partials_transform::TransformError>(())
//! ```

use partials_model::{DataCollection, DataObject, Transformed};
use serde_json::Value;

use crate::config::PartialsConfig;
use crate::directives::{DirectiveKind, DirectiveSet};
use crate::engine::{DeferredMode, TransformOptions, Transformer};
use crate::error::{Result, SelectorError};

/// A condition for `*_when` directives: a `bool`, or a closure over the
/// target.
pub trait PartialCondition<T: ?Sized> {
    fn evaluate(self, target: &T) -> bool;
}

impl<T: ?Sized> PartialCondition<T> for bool {
    fn evaluate(self, _target: &T) -> bool {
        self
    }
}

impl<T: ?Sized, F> PartialCondition<T> for F
where
    F: FnOnce(&T) -> bool,
{
    fn evaluate(self, target: &T) -> bool {
        self(target)
    }
}

/// One or more directive strings.
pub trait Selectors {
    fn into_selectors(self) -> Vec<String>;
}

impl Selectors for &str {
    fn into_selectors(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Selectors for String {
    fn into_selectors(self) -> Vec<String> {
        vec![self]
    }
}

impl Selectors for &String {
    fn into_selectors(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>, const N: usize> Selectors for [S; N] {
    fn into_selectors(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> Selectors for Vec<S> {
    fn into_selectors(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> Selectors for &[S] {
    fn into_selectors(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Object(&'a dyn DataObject),
    Collection(&'a DataCollection),
}

/// A data object or collection together with the directives it will be
/// transformed with.
///
/// Directives accumulate across calls and persist across transforms until
/// [`Partial::reset`] clears them.
#[derive(Debug)]
pub struct Partial<'a, T: ?Sized> {
    subject: &'a T,
    target: Target<'a>,
    directives: DirectiveSet,
    config: &'a PartialsConfig,
    options: TransformOptions,
}

impl<T: ?Sized> Clone for Partial<'_, T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject,
            target: self.target,
            directives: self.directives.clone(),
            config: self.config,
            options: self.options,
        }
    }
}

impl<'a, T: DataObject> Partial<'a, T> {
    pub fn new(object: &'a T) -> Self {
        Self::with_target(object, Target::Object(object))
    }
}

impl<'a> Partial<'a, dyn DataObject> {
    pub fn from_dyn(object: &'a dyn DataObject) -> Self {
        Self::with_target(object, Target::Object(object))
    }
}

impl<'a> Partial<'a, DataCollection> {
    pub fn collection(collection: &'a DataCollection) -> Self {
        Self::with_target(collection, Target::Collection(collection))
    }

    /// Element `index`, carrying a copy of this collection's directives.
    pub fn item(&self, index: usize) -> Option<Partial<'a, dyn DataObject>> {
        let item = self.subject.get(index)?;
        Some(Partial {
            subject: item,
            target: Target::Object(item),
            directives: self.directives.clone(),
            config: self.config,
            options: self.options,
        })
    }
}

impl<'a, T: ?Sized> Partial<'a, T> {
    fn with_target(subject: &'a T, target: Target<'a>) -> Self {
        Self {
            subject,
            target,
            directives: DirectiveSet::new(),
            config: PartialsConfig::empty(),
            options: TransformOptions::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: &'a PartialsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the accumulated directives.
    #[must_use]
    pub fn with_directives(mut self, directives: DirectiveSet) -> Self {
        self.directives = directives;
        self
    }

    pub fn subject(&self) -> &'a T {
        self.subject
    }

    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    pub fn directives_mut(&mut self) -> &mut DirectiveSet {
        &mut self.directives
    }

    fn push(mut self, kind: DirectiveKind, selectors: impl Selectors) -> Result<Self, SelectorError> {
        self.directives.add(kind, selectors.into_selectors())?;
        Ok(self)
    }

    fn push_when(
        mut self,
        kind: DirectiveKind,
        path: &str,
        condition: impl PartialCondition<T>,
    ) -> Result<Self, SelectorError> {
        let holds = condition.evaluate(self.subject);
        self.directives.merge_conditional(kind, path, holds)?;
        Ok(self)
    }

    pub fn include(self, selectors: impl Selectors) -> Result<Self, SelectorError> {
        self.push(DirectiveKind::Include, selectors)
    }

    pub fn exclude(self, selectors: impl Selectors) -> Result<Self, SelectorError> {
        self.push(DirectiveKind::Exclude, selectors)
    }

    pub fn only(self, selectors: impl Selectors) -> Result<Self, SelectorError> {
        self.push(DirectiveKind::Only, selectors)
    }

    pub fn except(self, selectors: impl Selectors) -> Result<Self, SelectorError> {
        self.push(DirectiveKind::Except, selectors)
    }

    pub fn include_when(
        self,
        path: &str,
        condition: impl PartialCondition<T>,
    ) -> Result<Self, SelectorError> {
        self.push_when(DirectiveKind::Include, path, condition)
    }

    pub fn exclude_when(
        self,
        path: &str,
        condition: impl PartialCondition<T>,
    ) -> Result<Self, SelectorError> {
        self.push_when(DirectiveKind::Exclude, path, condition)
    }

    pub fn only_when(
        self,
        path: &str,
        condition: impl PartialCondition<T>,
    ) -> Result<Self, SelectorError> {
        self.push_when(DirectiveKind::Only, path, condition)
    }

    pub fn except_when(
        self,
        path: &str,
        condition: impl PartialCondition<T>,
    ) -> Result<Self, SelectorError> {
        self.push_when(DirectiveKind::Except, path, condition)
    }

    /// Clear every accumulated directive.
    pub fn reset(&mut self) {
        self.directives.reset();
    }

    /// Transform with the current options. Deferred lazies stay wrapped
    /// unless the options say otherwise.
    pub fn transform(&self) -> Result<Transformed> {
        self.transform_with(self.options)
    }

    /// Transform with deferred lazies resolved and convert to JSON.
    pub fn to_json(&self) -> Result<Value> {
        let transformed = self.transform_with(self.options.with_deferred(DeferredMode::Resolve))?;
        Ok(transformed.to_json()?)
    }

    fn transform_with(&self, options: TransformOptions) -> Result<Transformed> {
        let transformer = Transformer::new(self.config).with_options(options);
        match self.target {
            Target::Object(object) => transformer
                .transform(object, &self.directives)
                .map(Transformed::Object),
            Target::Collection(collection) => {
                transformer.transform_collection(collection, &self.directives)
            }
        }
    }
}

/// `.partial()` on every data object.
pub trait PartialExt: DataObject + Sized {
    fn partial(&self) -> Partial<'_, Self> {
        Partial::new(self)
    }
}

impl<T: DataObject> PartialExt for T {}
