//! Library components of the `partials` command-line tool.

pub mod document;
pub mod logging;
