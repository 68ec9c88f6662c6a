use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::error;
use uuid::Uuid;

use crate::error::ApiError;

/// True iff `value` is the canonical lowercase hyphenated rendering of a
/// UUID. The uuid crate also parses simple (hyphen-less), braced and urn
/// forms; comparing against the round-tripped rendering rejects all of them.
pub fn is_valid_uuid(value: &str) -> bool {
    match Uuid::parse_str(value) {
        Ok(parsed) => parsed.as_hyphenated().to_string() == value,
        Err(_) => false,
    }
}

pub fn validate_email(value: &str) -> bool {
    lazy_static! {
        static ref MAIL_RE: Regex = Regex::new(
            r"^[A-Za-z0-9]+([_\-.][A-Za-z0-9]+)*@([A-Za-z0-9-]+\.)+[A-Za-z]{2,6}$"
        )
        .unwrap();
    }
    MAIL_RE.is_match(value)
}

/// 6 to 20 characters with at least one lowercase letter, one uppercase
/// letter and one digit. The regex crate has no lookahead, so the three
/// class checks are done by scanning.
pub fn validate_password(value: &str) -> bool {
    let len = value.chars().count();
    if !(6..=20).contains(&len) {
        return false;
    }
    value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Expected JSON type for a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Bool,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Bool => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Bool => value.is_boolean(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Rejects an absent or non-object request body.
pub fn verify_payload_shape(payload: Option<&Value>) -> Result<&Map<String, Value>, ApiError> {
    let payload = match payload {
        Some(v) if !v.is_null() => v,
        _ => {
            error!("No related data or form not in json.");
            return Err(ApiError::Input(
                "No data in your request(body) or it's form not in json.".into(),
            ));
        }
    };
    payload.as_object().ok_or_else(|| {
        error!("The data of the request must be a JSON object.");
        ApiError::Input("The data of the request must be a JSON object.".into())
    })
}

/// Checks that `data` carries every field of the per-operation template with
/// the declared type. The first missing field (in template order) is named,
/// then the first mistyped one with expected and actual types.
pub fn verify_template(
    template: &[(&str, FieldKind)],
    data: &Map<String, Value>,
) -> Result<(), ApiError> {
    for (field, _) in template {
        if !data.contains_key(*field) {
            error!("'{field}' is missing.");
            return Err(ApiError::Input(format!(
                "You don't provide '{field}'(required)."
            )));
        }
    }
    for (field, kind) in template {
        let value = &data[*field];
        if !kind.matches(value) {
            error!(
                "'{field}' must be a {}, not a {}.",
                kind.name(),
                json_type_name(value)
            );
            return Err(ApiError::Input(format!(
                "'{field}' must be a {}, not a {}.",
                kind.name(),
                json_type_name(value)
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uuid_accepts_canonical_lowercase() {
        assert!(is_valid_uuid("1be9b31c-32c8-4e60-a1ad-a561d7860b24"));
    }

    #[test]
    fn uuid_rejects_hex_only_form() {
        // The same value without hyphens parses, but is not canonical.
        assert!(!is_valid_uuid("1be9b31c32c84e60a1ada561d7860b24"));
    }

    #[test]
    fn uuid_rejects_uppercase_braced_and_garbage() {
        assert!(!is_valid_uuid("1BE9B31C-32C8-4E60-A1AD-A561D7860B24"));
        assert!(!is_valid_uuid("{1be9b31c-32c8-4e60-a1ad-a561d7860b24}"));
        assert!(!is_valid_uuid("urn:uuid:1be9b31c-32c8-4e60-a1ad-a561d7860b24"));
        assert!(!is_valid_uuid("not-a-uuid"));
        assert!(!is_valid_uuid(""));
    }

    #[test]
    fn email_accepts_standard_addresses() {
        assert!(validate_email("jane.doe@example.com"));
        assert!(validate_email("jane_doe-2@sub.example.org"));
        assert!(validate_email("a@b.co"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!validate_email("jane..doe@example.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("jane@"));
        assert!(!validate_email("jane@example"));
        assert!(!validate_email("jane@example.topleveldomain"));
        assert!(!validate_email("jane doe@example.com"));
    }

    #[test]
    fn password_requires_all_three_classes_and_length() {
        assert!(validate_password("Abcde1"));
        assert!(validate_password("Str0ngEnough"));
        assert!(!validate_password("Abc1")); // too short
        assert!(!validate_password("Abcdefghij1234567890X")); // 21 chars
        assert!(!validate_password("alllowercase1"));
        assert!(!validate_password("ALLUPPERCASE1"));
        assert!(!validate_password("NoDigitsHere"));
    }

    #[test]
    fn payload_shape_rejects_missing_and_non_object() {
        assert!(verify_payload_shape(None).is_err());
        assert!(verify_payload_shape(Some(&Value::Null)).is_err());
        assert!(verify_payload_shape(Some(&json!([1, 2]))).is_err());
        assert!(verify_payload_shape(Some(&json!("text"))).is_err());
        assert!(verify_payload_shape(Some(&json!({"a": 1}))).is_ok());
    }

    const TEMPLATE: &[(&str, FieldKind)] = &[
        ("first_name", FieldKind::Str),
        ("password", FieldKind::Str),
        ("is_activated", FieldKind::Bool),
    ];

    #[test]
    fn template_names_first_missing_field_in_order() {
        let data = json!({"is_activated": true});
        let err = verify_template(TEMPLATE, data.as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "You don't provide 'first_name'(required).");

        let data = json!({"first_name": "Jane"});
        let err = verify_template(TEMPLATE, data.as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "You don't provide 'password'(required).");
    }

    #[test]
    fn template_names_mistyped_field_with_both_types() {
        let data = json!({"first_name": "Jane", "password": "Pw1234", "is_activated": "yes"});
        let err = verify_template(TEMPLATE, data.as_object().unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'is_activated' must be a boolean, not a string."
        );
    }

    #[test]
    fn template_accepts_complete_payload_with_extras() {
        let data = json!({
            "first_name": "Jane",
            "password": "Pw1234",
            "is_activated": false,
            "extra": 42
        });
        assert!(verify_template(TEMPLATE, data.as_object().unwrap()).is_ok());
    }
}
