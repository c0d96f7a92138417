//! Axum/tower binding for the manila response envelope.
//!
//! Exposes the failure taxonomy, the exception-translation middleware that
//! turns in-flight failures into envelope responses, the status-page
//! translator for bare error statuses, the envelope-to-response binding for
//! handlers, and the validation-report adapter.

pub mod failure;
pub mod middleware;
pub mod respond;
pub mod validate;

pub use failure::{Classification, Failure};
pub use middleware::exceptions::{ExceptionTranslation, ExceptionTranslationLayer, ResponseStarted};
pub use middleware::status_pages::status_pages;
pub use respond::IntoApiResponse;
