//! HTTP status codes used throughout the response vocabulary.
//!
//! The same number serves as the HTTP status line for a response and as the
//! machine-readable `code` inside [`crate::ErrorInfo`].

pub const SUCCESS: u16 = 200;
pub const CREATED: u16 = 201;
pub const BAD_REQUEST: u16 = 400;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;
pub const LOCKED: u16 = 423;
/// Non-standard code for requests abandoned by the client (nginx convention).
pub const CANCELED: u16 = 499;
pub const UNHANDLED: u16 = 500;
pub const NOT_IMPLEMENTED: u16 = 501;
