//! Adapter from `validator` reports to bad-request envelopes.

use indexmap::IndexMap;
use manila_core::{factory, Envelope, EnvelopeError};
use validator::ValidationErrors;

/// Build a 400 envelope from a validation report.
///
/// The report must contain at least one error; callers are expected to check
/// validity first, and handing over a clean report returns
/// [`EnvelopeError::NoValidationErrors`]. Field errors become
/// `field name → ordered messages` details, using each error's message text
/// and falling back to its rule code when no message was configured. Fields
/// are emitted in name order so the wire form is deterministic.
pub fn bad_request_from(report: &ValidationErrors) -> Result<Envelope, EnvelopeError> {
    if report.is_empty() {
        return Err(EnvelopeError::NoValidationErrors);
    }

    let mut fields: Vec<(String, Vec<String>)> = report
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let field_errors: IndexMap<String, Vec<String>> = fields.into_iter().collect();

    Ok(factory::bad_request(field_errors))
}
