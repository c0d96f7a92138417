/// Misuse of an envelope or factory operation.
///
/// These mark caller errors, not runtime failures: both variants mean a
/// precondition the caller is responsible for was not checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// A failure-only conversion was applied to a successful envelope.
    #[error("envelope is successful; only failed envelopes can be converted without data")]
    Succeeded,

    /// A bad-request envelope was requested from a validation report that
    /// contains no errors.
    #[error("validation report contains no errors")]
    NoValidationErrors,
}
