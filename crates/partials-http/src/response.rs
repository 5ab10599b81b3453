//! JSON responses.

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Request, Response};
use partials_transform::Partial;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{RequestError, Result};
use crate::request::RequestDirectives;

const APPLICATION_JSON: &str = "application/json";

/// Transform `partial` with deferred values resolved and wrap the result in
/// a `200 OK` JSON response. The body is exactly `partial.to_json()`.
pub fn json_response<T: ?Sized>(partial: &Partial<'_, T>) -> Result<Response<String>> {
    let body = partial.to_json()?;
    let mut response = Response::new(serde_json::to_string(&body)?);
    set_json_content_type(&mut response);
    Ok(response)
}

/// Bind the directives of `request` onto `partial` and answer with its JSON.
///
/// Failures become an error response carrying `{ "message": ... }`.
pub fn respond<B, T: ?Sized>(request: &Request<B>, mut partial: Partial<'_, T>) -> Response<String> {
    let outcome = RequestDirectives::from_request(request)
        .and_then(|directives| directives.apply_to(&mut partial))
        .and_then(|()| json_response(&partial));

    match outcome {
        Ok(response) => response,
        Err(error) if error.status().is_server_error() => {
            warn!(uri = %request.uri(), %error, "transform failed");
            error_response(&error)
        }
        Err(error) => {
            debug!(uri = %request.uri(), %error, "rejected request directives");
            error_response(&error)
        }
    }
}

/// JSON response describing `error`, with the matching status code.
pub fn error_response(error: &RequestError) -> Response<String> {
    let body = json!({ "message": error.to_string() });
    let mut response = Response::new(body.to_string());
    *response.status_mut() = error.status();
    set_json_content_type(&mut response);
    response
}

fn set_json_content_type(response: &mut Response<String>) {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
}
