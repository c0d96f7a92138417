//! Envelope-to-response binding for handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use manila_core::Envelope;
use serde::Serialize;

/// Turns an [`Envelope`] into an HTTP response.
///
/// The status line comes from `error.code` when the envelope failed,
/// otherwise from the caller-supplied default (200 for
/// [`IntoApiResponse::into_api_response`]). A stored code outside the valid
/// status range falls back to the default.
///
/// ```ignore
/// async fn create_item(/* ... */) -> Response {
///     factory::success_with(item).into_api_response_with(StatusCode::CREATED)
/// }
/// ```
pub trait IntoApiResponse {
    fn into_api_response(self) -> Response;
    fn into_api_response_with(self, default: StatusCode) -> Response;
}

impl<T: Serialize> IntoApiResponse for Envelope<T> {
    fn into_api_response(self) -> Response {
        self.into_api_response_with(StatusCode::OK)
    }

    fn into_api_response_with(self, default: StatusCode) -> Response {
        let status = self
            .error
            .as_ref()
            .and_then(|error| StatusCode::from_u16(error.code).ok())
            .unwrap_or(default);

        (status, Json(self)).into_response()
    }
}
