//! Error types for selector parsing and transformation.

use partials_model::LazyError;
use thiserror::Error;

/// A malformed directive string. Never partially applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("empty segment at offset {position} in selector '{input}'")]
    EmptySegment { input: String, position: usize },
    #[error("unbalanced brace at offset {position} in selector '{input}'")]
    UnbalancedBrace { input: String, position: usize },
    #[error("empty brace group at offset {position} in selector '{input}'")]
    EmptyGroup { input: String, position: usize },
    #[error("unexpected '{character}' at offset {position} in selector '{input}'")]
    InvalidCharacter {
        input: String,
        character: char,
        position: usize,
    },
}

/// Errors aborting a transformation.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to resolve lazy property '{path}'")]
    Resolve {
        path: String,
        #[source]
        source: LazyError,
    },
    #[error("maximum transformation depth of {max_depth} exceeded at '{path}'")]
    DepthExceeded { path: String, max_depth: usize },
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("failed to serialize transformed output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
