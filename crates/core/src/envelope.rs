//! The response envelope shared by every API outcome.
//!
//! A response either succeeded (`data` may be present) or failed (`error` is
//! present). Success is never stored: [`Envelope::is_success`] is computed
//! from the absence of `error`, so the two can never disagree. When both
//! `error` and `data` are somehow populated, `error` takes precedence and the
//! envelope counts as failed.
//!
//! Wire order is fixed as `error`, `data`, `diagnostics` so a streaming
//! client can detect failure from the first field without deserializing the
//! whole body. Absent fields are omitted entirely, never emitted as `null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EnvelopeError;

/// Structured context attached to an error: validation messages keyed by
/// field, offending identifiers, conflicting problems, and so on.
pub type Details = IndexMap<String, Value>;

/// Free-form instrumentation map attached to an envelope. Not part of its
/// success/failure semantics.
pub type Diagnostics = IndexMap<String, Value>;

/// The error half of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error identifier, also used as the HTTP status code.
    pub code: u16,
    /// Human-readable summary.
    pub message: String,
    /// Structured context for the failure, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

/// Success/failure wrapper for one API response.
///
/// `Envelope` (i.e. `Envelope<()>`) is the untyped form used for failures
/// and empty successes; `Envelope<T>` additionally carries a typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = ()> {
    /// Present iff the outcome failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    /// Present iff the outcome succeeded with a payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Instrumentation bag, mutable until the envelope is serialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl<T> Envelope<T> {
    /// Whether the response succeeded, i.e. `error` is absent.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Update the diagnostics map through a closure, lazily initializing an
    /// empty map when none exists, and return the envelope for chaining.
    pub fn with_diagnostics(mut self, configure: impl FnOnce(&mut Diagnostics)) -> Self {
        configure(self.diagnostics_mut());
        self
    }

    /// Replace the diagnostics map wholesale.
    pub fn set_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Mutable access to the diagnostics map, lazily initializing an empty
    /// map when none exists.
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        self.diagnostics.get_or_insert_with(Diagnostics::new)
    }

    /// Convert a failed envelope into one with a different payload type,
    /// preserving `error` and `diagnostics`. The payload is never fabricated:
    /// `data` is always absent in the result, which is why this conversion is
    /// only valid for failures.
    ///
    /// Returns [`EnvelopeError::Succeeded`] when the envelope has no error.
    pub fn into_typed<U>(self) -> Result<Envelope<U>, EnvelopeError> {
        self.convert(None)
    }

    /// Like [`Envelope::into_typed`], but replaces the diagnostics map with
    /// the given one.
    pub fn into_typed_with<U>(self, diagnostics: Diagnostics) -> Result<Envelope<U>, EnvelopeError> {
        self.convert(Some(diagnostics))
    }

    fn convert<U>(self, diagnostics: Option<Diagnostics>) -> Result<Envelope<U>, EnvelopeError> {
        match self.error {
            None => Err(EnvelopeError::Succeeded),
            Some(error) => Ok(Envelope {
                error: Some(error),
                data: None,
                diagnostics: diagnostics.or(self.diagnostics),
            }),
        }
    }
}
