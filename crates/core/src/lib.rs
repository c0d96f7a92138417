//! Framework-free response envelope model and factory.
//!
//! Every API response, success or failure, is carried in the same
//! [`Envelope`] shape: an optional structured error, an optional typed
//! payload, and an optional free-form diagnostics map. The [`factory`]
//! module builds pre-shaped envelopes for the common outcomes (not found,
//! validation failure, conflict, lock contention, ...), and the HTTP
//! binding lives in the companion `manila-axum` crate.

pub mod envelope;
pub mod error;
pub mod factory;
pub mod status;

pub use envelope::{Details, Diagnostics, Envelope, ErrorInfo};
pub use error::EnvelopeError;
