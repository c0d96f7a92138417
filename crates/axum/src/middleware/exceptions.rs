//! Exception-translation middleware.
//!
//! Wraps a downstream service whose error type converts into [`Failure`].
//! While the downstream succeeds the middleware is pure pass-through; when it
//! fails, the failure is classified and written out as an envelope body with
//! the mapped status code -- unless the response has already begun
//! transmitting, in which case nothing can be rewritten and the failure is
//! returned as the service error so a host-level layer still observes it.
//!
//! The serialized body is handed to the transport as a complete buffer; a
//! client disconnect during the write drops the in-flight future and
//! abandons the write without a secondary error.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use manila_core::{factory, Details, Envelope};
use serde_json::Value;
use tower::{Layer, Service};

use crate::failure::Failure;

/// Per-request flag marking that response bytes have reached the wire.
///
/// The middleware inserts one into the request extensions; a stage that
/// starts streaming its own response marks it so the middleware knows a
/// caught failure can no longer be translated into a body. Extractable in
/// handlers:
///
/// ```ignore
/// async fn stream(started: ResponseStarted) -> Response {
///     started.mark_started();
///     // ...begin writing...
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseStarted(Arc<AtomicBool>);

impl ResponseStarted {
    /// Record that the response has begun transmitting.
    pub fn mark_started(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether the response has begun transmitting.
    pub fn has_started(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl<S> FromRequestParts<S> for ResponseStarted
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A detached flag when the middleware is not installed; marking it is
        // then a no-op.
        Ok(parts
            .extensions
            .get::<ResponseStarted>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Layer applying [`ExceptionTranslation`] to a service.
#[derive(Debug, Clone)]
pub struct ExceptionTranslationLayer {
    expose_source: bool,
}

impl ExceptionTranslationLayer {
    /// A layer that attaches the original failure to 500-response details
    /// under the `"Exception"` key.
    pub fn new() -> Self {
        Self {
            expose_source: true,
        }
    }

    /// Keep the original failure out of response details. Intended for
    /// production-facing deployments where failure chains may carry internal
    /// identifiers or connection strings.
    pub fn redact_source(mut self) -> Self {
        self.expose_source = false;
        self
    }
}

impl Default for ExceptionTranslationLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ExceptionTranslationLayer {
    type Service = ExceptionTranslation<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionTranslation {
            inner,
            expose_source: self.expose_source,
        }
    }
}

/// Middleware translating downstream failures into envelope responses.
#[derive(Debug, Clone)]
pub struct ExceptionTranslation<S> {
    inner: S,
    expose_source: bool,
}

impl<S, B> Service<Request<B>> for ExceptionTranslation<S>
where
    S: Service<Request<B>, Response = Response>,
    S::Error: Into<Failure>,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Failure;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Failure>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let started = ResponseStarted::default();
        req.extensions_mut().insert(started.clone());

        let expose_source = self.expose_source;
        let future = self.inner.call(req);

        Box::pin(async move {
            match future.await {
                Ok(response) => Ok(response),
                Err(error) => {
                    let failure: Failure = error.into();
                    if started.has_started() {
                        // Headers are on the wire; the status line and body
                        // cannot change anymore. Re-raise for the host.
                        return Err(failure);
                    }
                    Ok(render(&failure, expose_source))
                }
            }
        })
    }
}

/// Build the envelope response for a classified failure.
fn render(failure: &Failure, expose_source: bool) -> Response {
    let classification = failure.classify();

    if matches!(failure, Failure::Unhandled(_)) {
        tracing::error!(error = %failure, "unhandled failure reached the response boundary");
    }

    let envelope: Envelope = if classification.attach_source && expose_source {
        let mut details = Details::new();
        details.insert(
            "Exception".to_string(),
            Value::String(format!("{failure:#}")),
        );
        factory::error_with(classification.code, classification.message, details)
    } else {
        factory::error(classification.code, classification.message)
    };

    let status = StatusCode::from_u16(classification.code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(envelope)).into_response()
}
