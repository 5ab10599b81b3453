//! Partial transformation of data objects.
//!
//! Directives select which properties of a data object are emitted:
//!
//! - **include**: show lazy properties that are hidden by default
//! - **exclude**: hide properties that are shown by default
//! - **only**: keep exactly the listed properties
//! - **except**: drop the listed properties
//!
//! Directive strings are dotted paths into nested objects and collections,
//! with `*` for every property and `{a,b}` for a group:
//! `songs.{name,artist}`.
//!
//! The [`Partial`] builder is the usual entry point; [`Transformer`] is the
//! engine underneath it.

mod collection;
pub mod config;
pub mod defaults;
pub mod directives;
pub mod engine;
pub mod error;
pub mod partial;
pub mod path;
pub mod selector;
pub mod tree;

pub use config::{AllowedDirectives, Allowlist, PartialsConfig, TypeConfig};
pub use defaults::ConditionalDefaults;
pub use directives::{DirectiveKind, DirectiveSet, Directives, UnknownDirectiveKind};
pub use engine::{DeferredMode, TransformOptions, Transformer};
pub use error::{Result, SelectorError, TransformError};
pub use partial::{Partial, PartialCondition, PartialExt, Selectors};
pub use path::{PathSegment, PropertyPath};
pub use selector::{Segment, Selector, split_list};
pub use tree::SelectorTree;
