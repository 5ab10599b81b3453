//! HTTP plumbing for partial transformation.
//!
//! [`RequestDirectives`] binds `include`, `exclude`, `only` and `except`
//! from a query string. Bound directives are gated per type by the
//! allowlists in [`PartialsConfig`](partials_transform::PartialsConfig);
//! directives set in code are not. [`json_response`] and [`respond`] turn a
//! [`Partial`](partials_transform::Partial) into an `http::Response`.

pub mod error;
pub mod request;
pub mod response;

pub use error::{RequestError, Result};
pub use request::RequestDirectives;
pub use response::{error_response, json_response, respond};
