//! Pipeline interceptors producing envelope responses.
//!
//! - [`exceptions`] -- translates failures raised below it into envelope
//!   bodies, or re-raises when the response already started.
//! - [`status_pages`] -- fills in envelope bodies for bare 4xx/5xx statuses
//!   written without one.

pub mod exceptions;
pub mod status_pages;
