//! Deferred, memoized property values.
//!
//! A [`Lazy`] wraps a producer closure together with an inclusion policy.
//! The policy tells the transformer whether the value is emitted when no
//! directive mentions it; the producer runs at most once, on first force.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::LazyError;
use crate::property::Field;

type Producer = Box<dyn FnOnce() -> Result<Field, LazyError>>;

/// How a lazy value takes part in a transformation when no directive
/// mentions it.
#[derive(Clone)]
pub enum LazyPolicy {
    /// Hidden unless an include directive reaches the property.
    OmittedByDefault,
    /// Shown unless an exclude directive reaches the property.
    DefaultIncluded,
    /// Shown iff the condition holds at transform time. Include and exclude
    /// directives have no say.
    Conditional(Condition),
    /// Handed to a deferred-transport adapter instead of being forced.
    Deferred(DeferredKind),
}

impl fmt::Debug for LazyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OmittedByDefault => f.write_str("OmittedByDefault"),
            Self::DefaultIncluded => f.write_str("DefaultIncluded"),
            Self::Conditional(_) => f.write_str("Conditional(..)"),
            Self::Deferred(kind) => write!(f, "Deferred({kind:?})"),
        }
    }
}

/// Which deferred adapter a [`LazyPolicy::Deferred`] value is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// A deferred prop object carrying the producer.
    Prop,
    /// A plain deferred callable.
    Closure,
}

/// Zero-argument predicate deciding whether a conditional lazy is shown.
#[derive(Clone)]
pub struct Condition(Rc<dyn Fn() -> bool>);

impl Condition {
    pub fn new(predicate: impl Fn() -> bool + 'static) -> Self {
        Self(Rc::new(predicate))
    }

    pub fn holds(&self) -> bool {
        (self.0)()
    }
}

/// Something that knows which of its relations have been loaded.
///
/// Used by [`Lazy::when_loaded`] to include a relation only when the caller
/// already paid for fetching it.
pub trait LoadedRelations {
    fn relation_loaded(&self, relation: &str) -> bool;
}

struct LazyCell {
    producer: RefCell<Option<Producer>>,
    value: OnceCell<Result<Field, LazyError>>,
}

/// A deferred, memoized computation with an inclusion policy.
///
/// Clones share the same memoized result. Not thread-safe: transform
/// independent instances when working across threads.
#[derive(Clone)]
pub struct Lazy {
    cell: Rc<LazyCell>,
    policy: LazyPolicy,
}

impl Lazy {
    fn with_policy(producer: Producer, policy: LazyPolicy) -> Self {
        Self {
            cell: Rc::new(LazyCell {
                producer: RefCell::new(Some(producer)),
                value: OnceCell::new(),
            }),
            policy,
        }
    }

    /// A lazy value that is omitted unless explicitly included.
    pub fn create<F, V>(producer: F) -> Self
    where
        F: FnOnce() -> V + 'static,
        V: Into<Field>,
    {
        Self::with_policy(
            Box::new(move || Ok(producer().into())),
            LazyPolicy::OmittedByDefault,
        )
    }

    /// Like [`Lazy::create`] for producers that can fail.
    pub fn try_create<F, V, E>(producer: F) -> Self
    where
        F: FnOnce() -> Result<V, E> + 'static,
        V: Into<Field>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::with_policy(
            Box::new(move || producer().map(Into::into).map_err(LazyError::producer)),
            LazyPolicy::OmittedByDefault,
        )
    }

    /// A lazy value shown iff `predicate` holds at transform time.
    pub fn when<P, F, V>(predicate: P, producer: F) -> Self
    where
        P: Fn() -> bool + 'static,
        F: FnOnce() -> V + 'static,
        V: Into<Field>,
    {
        Self::with_policy(
            Box::new(move || Ok(producer().into())),
            LazyPolicy::Conditional(Condition::new(predicate)),
        )
    }

    /// A lazy relation, shown iff `source` reports it as loaded.
    ///
    /// A loaded relation whose producer yields `null` is emitted as `null`.
    pub fn when_loaded<R, F, V>(relation: &str, source: &R, producer: F) -> Self
    where
        R: LoadedRelations + ?Sized,
        F: FnOnce() -> V + 'static,
        V: Into<Field>,
    {
        let loaded = source.relation_loaded(relation);
        Self::when(move || loaded, producer)
    }

    /// A lazy value handed to the deferred prop adapter.
    pub fn deferred<F, V>(producer: F) -> Self
    where
        F: FnOnce() -> V + 'static,
        V: Into<Field>,
    {
        Self::with_policy(
            Box::new(move || Ok(producer().into())),
            LazyPolicy::Deferred(DeferredKind::Prop),
        )
    }

    /// A lazy value handed to the deferred callable adapter.
    pub fn closure<F, V>(producer: F) -> Self
    where
        F: FnOnce() -> V + 'static,
        V: Into<Field>,
    {
        Self::with_policy(
            Box::new(move || Ok(producer().into())),
            LazyPolicy::Deferred(DeferredKind::Closure),
        )
    }

    /// Switch this value to be shown unless excluded.
    #[must_use]
    pub fn default_included(mut self) -> Self {
        self.policy = LazyPolicy::DefaultIncluded;
        self
    }

    pub fn policy(&self) -> &LazyPolicy {
        &self.policy
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.value.get().is_some()
    }

    /// Force the producer (first call only) and return the memoized result,
    /// regardless of policy.
    pub fn resolve(&self) -> Result<&Field, LazyError> {
        let result = self.cell.value.get_or_init(|| {
            let producer = self.cell.producer.borrow_mut().take();
            match producer {
                Some(producer) => producer(),
                None => Err(LazyError::Consumed),
            }
        });
        result.as_ref().map_err(Clone::clone)
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Lazy");
        out.field("policy", &self.policy);
        match self.cell.value.get() {
            Some(Ok(value)) => out.field("value", value),
            Some(Err(error)) => out.field("error", error),
            None => out.field("value", &format_args!("<unresolved>")),
        };
        out.finish()
    }
}
