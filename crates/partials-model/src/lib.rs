//! Data model for partial transformation.
//!
//! - **data**: the [`DataObject`] trait, per-type [`Schema`] and the
//!   [`data_object!`] macro
//! - **property**: property slots ([`Property`]) and resolved values ([`Field`])
//! - **lazy**: deferred, memoized values with an inclusion policy
//! - **collection**: homogeneous and paginated collections of data objects
//! - **output**: the ordered output tree ([`Transformed`])
//! - **deferred**: wrappers handed to deferred-transport adapters

pub mod collection;
pub mod data;
pub mod deferred;
pub mod error;
pub mod lazy;
pub mod output;
pub mod property;

pub use collection::{DataCollection, PageMeta};
pub use data::{DataObject, Schema};
pub use deferred::{DeferredClosure, DeferredProp};
pub use error::{LazyError, ModelError, Result};
pub use lazy::{Condition, DeferredKind, Lazy, LazyPolicy, LoadedRelations};
pub use output::{Transformed, TransformedObject, TransformedPage};
pub use property::{Field, Property};
