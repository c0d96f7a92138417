//! Failure taxonomy for request processing and its mapping to the response
//! envelope.
//!
//! Downstream stages report failures as [`Failure`] values instead of raising
//! through framework-specific channels. [`Failure::classify`] maps each
//! variant to its status code, client-facing message, and whether the
//! original failure should be attached to the error details.

use manila_core::status;

/// A failure raised by a downstream request-processing stage.
///
/// `From<anyhow::Error>` covers the catch-all case, so fallible stages can
/// use `?` on any `anyhow`-compatible error and end up in [`Failure::Unhandled`].
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    AccessDenied(String),

    /// The request was cancelled cooperatively before completion.
    #[error("{0}")]
    Canceled(String),

    /// The requested operation exists in the API surface but has no
    /// implementation yet.
    #[error("{0}")]
    NotImplemented(String),

    /// Anything else that escaped the downstream stage.
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

/// How a [`Failure`] is rendered at the response boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Status code for both the HTTP status line and the envelope error code.
    pub code: u16,
    /// Client-facing message.
    pub message: String,
    /// Whether the original failure belongs in the error details. Only the
    /// catch-all path attaches it; the message alone would otherwise hide
    /// everything useful about an unexpected failure.
    pub attach_source: bool,
}

impl Failure {
    /// Map this failure to its response classification.
    ///
    /// Evaluated most specific first; the catch-all maps to 500 with a fixed
    /// message so internal error text never leaks through the message field.
    pub fn classify(&self) -> Classification {
        match self {
            Failure::AccessDenied(message) => Classification {
                code: status::FORBIDDEN,
                message: message.clone(),
                attach_source: false,
            },
            Failure::Canceled(message) => Classification {
                code: status::CANCELED,
                message: message.clone(),
                attach_source: false,
            },
            Failure::NotImplemented(message) => Classification {
                code: status::NOT_IMPLEMENTED,
                message: message.clone(),
                attach_source: false,
            },
            Failure::Unhandled(_) => Classification {
                code: status::UNHANDLED,
                message: "Unhandled Error".to_string(),
                attach_source: true,
            },
        }
    }
}
