use http::StatusCode;
use partials_transform::{DirectiveKind, SelectorError, TransformError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid '{kind}' parameter: {source}")]
    Selector {
        kind: DirectiveKind,
        #[source]
        source: SelectorError,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RequestError {
    /// Status code reported to the client for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Selector { .. } => StatusCode::BAD_REQUEST,
            Self::Transform(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use partials_transform::Selector;

    #[test]
    fn malformed_selectors_are_client_errors() {
        let source = Selector::parse("songs.{name").unwrap_err();
        let error = RequestError::Selector {
            kind: DirectiveKind::Include,
            source,
        };

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().starts_with("invalid 'include' parameter: "));
    }
}
