//! Pure construction functions for the common response outcomes.
//!
//! The factory is stateless, so it is a module of free functions rather than
//! an injected object. All functions are total; the only fallible envelope
//! operations are the failure-only conversions on [`Envelope`] itself and
//! the validation adapter in `manila-axum`.

use indexmap::IndexMap;
use serde_json::Value;

use crate::envelope::{Details, Envelope, ErrorInfo};
use crate::status;

/// An empty successful envelope, with no data and no error.
pub fn success() -> Envelope {
    Envelope {
        error: None,
        data: None,
        diagnostics: None,
    }
}

/// A successful envelope carrying `data` as its payload.
pub fn success_with<T>(data: T) -> Envelope<T> {
    Envelope {
        error: None,
        data: Some(data),
        diagnostics: None,
    }
}

/// A failed envelope with the given error code and message.
pub fn error(code: u16, message: impl Into<String>) -> Envelope {
    Envelope {
        error: Some(ErrorInfo {
            code,
            message: message.into(),
            details: None,
        }),
        data: None,
        diagnostics: None,
    }
}

/// A failed envelope with structured error details.
pub fn error_with(code: u16, message: impl Into<String>, details: Details) -> Envelope {
    Envelope {
        error: Some(ErrorInfo {
            code,
            message: message.into(),
            details: Some(details),
        }),
        data: None,
        diagnostics: None,
    }
}

/// A 404 envelope identifying the key that matched nothing.
///
/// The detail key falls back to `"Id"` when `id_name` is `None`; detail keys
/// are never absent.
pub fn not_found(id_name: Option<&str>, id_value: impl Into<Value>) -> Envelope {
    let mut details = Details::new();
    details.insert(id_name.unwrap_or("Id").to_string(), id_value.into());

    not_found_with(details)
}

/// A 404 envelope with one detail entry per key/id that returned no results.
pub fn not_found_with(details: Details) -> Envelope {
    error_with(
        status::NOT_FOUND,
        "The specified resource was not found.",
        details,
    )
}

/// A 400 envelope whose details carry validation messages keyed by field
/// name, each field holding its messages in order.
pub fn bad_request(field_errors: IndexMap<String, Vec<String>>) -> Envelope {
    let details = field_errors
        .into_iter()
        .map(|(field, messages)| (field, Value::from(messages)))
        .collect();

    error_with(status::BAD_REQUEST, "Request validation failed.", details)
}

/// A 409 envelope listing the problems behind the conflict under the
/// `"Problems"` detail key. Problems are collected eagerly so the wire form
/// never depends on a caller's lazy iterator.
pub fn conflict<I, S>(message: impl Into<String>, problems: I) -> Envelope
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let collected: Vec<String> = problems.into_iter().map(Into::into).collect();

    let mut details = Details::new();
    details.insert("Problems".to_string(), Value::from(collected));

    error_with(status::CONFLICT, message, details)
}

/// A 409 envelope for unique-constraint violations.
pub fn duplicate<I, S>(problems: I) -> Envelope
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    conflict("Violation of unique constraints.", problems)
}

/// A 409 envelope for business-rule violations.
pub fn business_rules<I, S>(problems: I) -> Envelope
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    conflict("Violation of business rules.", problems)
}

/// A 423 envelope naming the user who currently holds the edit lock.
pub fn locked(user_id: i64, display_name: impl Into<String>) -> Envelope {
    let mut details = Details::new();
    details.insert("UserId".to_string(), Value::from(user_id));
    details.insert("DisplayName".to_string(), Value::String(display_name.into()));

    error_with(
        status::LOCKED,
        "The resource is currently locked for editing by another user.",
        details,
    )
}

/// A 423 envelope for resources that are immutable by policy rather than
/// held by another user.
pub fn protected() -> Envelope {
    error(
        status::LOCKED,
        "The resource is protected and cannot be modified.",
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn not_found_names_the_missing_key() {
        let envelope = not_found(Some("UserId"), 42);
        let error = envelope.error.unwrap();

        assert_eq!(error.code, status::NOT_FOUND);
        assert_eq!(error.message, "The specified resource was not found.");
        assert_eq!(error.details.unwrap().get("UserId"), Some(&json!(42)));
    }

    #[test]
    fn not_found_defaults_key_to_id() {
        let envelope = not_found(None, "x");
        let details = envelope.error.unwrap().details.unwrap();

        assert_eq!(details.get("Id"), Some(&json!("x")));
        assert_eq!(details.len(), 1);
    }

    #[test]
    fn bad_request_keys_details_by_field() {
        let mut fields = IndexMap::new();
        fields.insert(
            "name".to_string(),
            vec!["required".to_string(), "too short".to_string()],
        );
        fields.insert("age".to_string(), vec!["must be positive".to_string()]);

        let envelope = bad_request(fields);
        let error = envelope.error.unwrap();

        assert_eq!(error.code, status::BAD_REQUEST);
        assert_eq!(error.message, "Request validation failed.");

        let details = error.details.unwrap();
        assert_eq!(details.get("name"), Some(&json!(["required", "too short"])));
        assert_eq!(details.get("age"), Some(&json!(["must be positive"])));
    }

    #[test]
    fn conflict_preserves_problem_order() {
        let envelope = conflict("m", ["a", "b"]);
        let error = envelope.error.unwrap();

        assert_eq!(error.code, status::CONFLICT);
        assert_eq!(error.message, "m");
        assert_eq!(
            error.details.unwrap().get("Problems"),
            Some(&json!(["a", "b"]))
        );
    }

    #[test]
    fn duplicate_and_business_rules_fix_the_conflict_message() {
        let dup = duplicate(["email already taken"]);
        assert_eq!(
            dup.error.as_ref().unwrap().message,
            "Violation of unique constraints."
        );
        assert_eq!(dup.error.unwrap().code, status::CONFLICT);

        let rules = business_rules(["cannot close an open order"]);
        assert_eq!(
            rules.error.as_ref().unwrap().message,
            "Violation of business rules."
        );
        assert_eq!(rules.error.unwrap().code, status::CONFLICT);
    }

    #[test]
    fn locked_identifies_the_lock_holder() {
        let envelope = locked(7, "Alice");
        let error = envelope.error.unwrap();

        assert_eq!(error.code, status::LOCKED);
        let details = error.details.unwrap();
        assert_eq!(details.get("UserId"), Some(&json!(7)));
        assert_eq!(details.get("DisplayName"), Some(&json!("Alice")));
    }

    #[test]
    fn protected_reuses_the_locked_code_without_details() {
        let envelope = protected();
        let error = envelope.error.unwrap();

        assert_eq!(error.code, status::LOCKED);
        assert_eq!(
            error.message,
            "The resource is protected and cannot be modified."
        );
        assert_eq!(error.details, None);
    }
}
