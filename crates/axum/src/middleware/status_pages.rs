//! Status-page translator.
//!
//! Some pipeline stages (routing fallbacks, guard middleware, terse handlers)
//! reply with a bare 4xx/5xx status and no body. This interceptor rewrites
//! those responses into the standard envelope shape, using the protocol
//! reason phrase as the message. Responses that already carry a body, and
//! non-error statuses, pass through untouched.

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use http_body::Body as _;
use manila_core::factory;

/// Middleware function for [`axum::middleware::from_fn`].
///
/// ```ignore
/// let app = Router::new()
///     .route("/items/{id}", get(get_item))
///     .layer(middleware::from_fn(status_pages));
/// ```
pub async fn status_pages(req: Request, next: Next) -> Response {
    translate(next.run(req).await)
}

fn translate(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    // Only bodiless responses are rewritten; a handler that produced its own
    // error body keeps it.
    if response.body().size_hint().exact() != Some(0) {
        return response;
    }

    // Codes outside the IANA registry (e.g. 499) have no reason phrase.
    let reason = status.canonical_reason().unwrap_or_default();
    let envelope = factory::error(status.as_u16(), reason);

    let (mut parts, _) = response.into_parts();
    match serde_json::to_vec(&envelope) {
        Ok(body) => {
            parts.headers.remove(CONTENT_LENGTH);
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Response::from_parts(parts, Body::from(body))
        }
        Err(_) => Response::from_parts(parts, Body::empty()),
    }
}
