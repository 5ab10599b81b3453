use std::sync::Arc;

use thiserror::Error;

/// Errors raised while describing data objects and collections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("schema for {type_name} declares property '{property}' twice")]
    DuplicateProperty { type_name: String, property: String },
    #[error("schema for {type_name} has an empty property name")]
    EmptyPropertyName { type_name: String },
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u64),
}

/// Failure of a lazy producer.
///
/// The failure is memoized together with the lazy value, so every later
/// force observes the same error without running the producer again.
#[derive(Debug, Error, Clone)]
pub enum LazyError {
    #[error("lazy producer failed: {0}")]
    Producer(#[source] Arc<dyn std::error::Error + Send + Sync>),
    #[error("lazy producer was consumed without producing a value")]
    Consumed,
}

impl LazyError {
    pub fn producer<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(error))
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
