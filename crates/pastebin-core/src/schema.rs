//! Snippet schema: validates inbound JSON and converts it to [`SnippetChanges`].
//!
//! Error messages are keyed by field name so they can be returned verbatim as
//! the body of a 400 response.

use serde_json::{Map, Value};

use pastebin_types::error::ValidationErrors;
use pastebin_types::snippet::{SnippetChanges, TITLE_MAX_LEN, is_language, is_style};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const NOT_BOOLEAN: &str = "Must be a valid boolean.";
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// How strictly required fields are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// POST: required fields must be present.
    Create,
    /// PUT: required fields must be present; absent optional fields keep their value.
    Update,
    /// PATCH: every field is optional.
    Partial,
}

impl ValidationMode {
    fn enforces_required(self) -> bool {
        !matches!(self, ValidationMode::Partial)
    }
}

/// Validate a snippet payload.
///
/// Unknown keys and read-only keys (`id`, `owner`, `created`) are ignored.
pub fn validate_snippet(
    payload: &Value,
    mode: ValidationMode,
) -> Result<SnippetChanges, ValidationErrors> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(payload)
            ),
        ));
    };

    let mut errors = ValidationErrors::new();
    let required = mode.enforces_required();

    let changes = SnippetChanges {
        title: char_field(object, "title", false, true, Some(TITLE_MAX_LEN), &mut errors),
        code: char_field(object, "code", required, false, None, &mut errors),
        linenos: boolean_field(object, "linenos", &mut errors),
        language: choice_field(object, "language", is_language, &mut errors),
        style: choice_field(object, "style", is_style, &mut errors),
    };

    errors.into_result(changes)
}

fn char_field(
    object: &Map<String, Value>,
    name: &str,
    required: bool,
    allow_blank: bool,
    max_len: Option<usize>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = match object.get(name) {
        None => {
            if required {
                errors.add(name, REQUIRED);
            }
            return None;
        }
        Some(value) => value,
    };

    let text = match value {
        Value::Null => {
            errors.add(name, NOT_NULL);
            return None;
        }
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            errors.add(name, NOT_STRING);
            return None;
        }
    };

    if text.is_empty() && !allow_blank {
        errors.add(name, NOT_BLANK);
        return None;
    }

    if let Some(max) = max_len {
        if text.chars().count() > max {
            errors.add(
                name,
                format!("Ensure this field has no more than {max} characters."),
            );
            return None;
        }
    }

    Some(text)
}

fn boolean_field(
    object: &Map<String, Value>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Option<bool> {
    let value = object.get(name)?;
    let parsed = match value {
        Value::Null => {
            errors.add(name, NOT_NULL);
            return None;
        }
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.to_lowercase().as_str() {
            "t" | "y" | "yes" | "true" | "on" | "1" => Some(true),
            "f" | "n" | "no" | "false" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    if parsed.is_none() {
        errors.add(name, NOT_BOOLEAN);
    }
    parsed
}

fn choice_field(
    object: &Map<String, Value>,
    name: &str,
    is_choice: fn(&str) -> bool,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = object.get(name)?;
    let text = match value {
        Value::Null => {
            errors.add(name, NOT_NULL);
            return None;
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if is_choice(&text) {
        Some(text)
    } else {
        errors.add(name, format!("\"{text}\" is not a valid choice."));
        None
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_create_payload() {
        let changes = validate_snippet(&json!({"code": "print(1)"}), ValidationMode::Create).unwrap();
        assert_eq!(changes.code.as_deref(), Some("print(1)"));
        assert!(changes.title.is_none());
        assert!(changes.language.is_none());
    }

    #[test]
    fn test_missing_code_on_create() {
        let errors = validate_snippet(&json!({"title": "x"}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("code"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_missing_code_on_partial_is_fine() {
        let changes = validate_snippet(&json!({"style": "vim"}), ValidationMode::Partial).unwrap();
        assert_eq!(changes.style.as_deref(), Some("vim"));
        assert!(changes.code.is_none());
    }

    #[test]
    fn test_blank_and_null_code() {
        let errors = validate_snippet(&json!({"code": "   "}), ValidationMode::Update).unwrap_err();
        assert_eq!(errors.get("code"), Some(&[NOT_BLANK.to_string()][..]));

        let errors = validate_snippet(&json!({"code": null}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("code"), Some(&[NOT_NULL.to_string()][..]));
    }

    #[test]
    fn test_code_must_be_string() {
        let errors = validate_snippet(&json!({"code": ["a"]}), ValidationMode::Create).unwrap_err();
        assert_eq!(errors.get("code"), Some(&[NOT_STRING.to_string()][..]));
    }

    #[test]
    fn test_numeric_code_is_coerced() {
        let changes = validate_snippet(&json!({"code": 42}), ValidationMode::Create).unwrap();
        assert_eq!(changes.code.as_deref(), Some("42"));
    }

    #[test]
    fn test_title_may_be_blank_but_not_too_long() {
        let changes =
            validate_snippet(&json!({"code": "x", "title": ""}), ValidationMode::Create).unwrap();
        assert_eq!(changes.title.as_deref(), Some(""));

        let long = "t".repeat(TITLE_MAX_LEN + 1);
        let errors =
            validate_snippet(&json!({"code": "x", "title": long}), ValidationMode::Create)
                .unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some(&["Ensure this field has no more than 100 characters.".to_string()][..])
        );
    }

    #[test]
    fn test_invalid_choices() {
        let errors = validate_snippet(
            &json!({"code": "x", "language": "klingon", "style": 3}),
            ValidationMode::Create,
        )
        .unwrap_err();
        assert_eq!(
            errors.get("language"),
            Some(&["\"klingon\" is not a valid choice.".to_string()][..])
        );
        assert_eq!(
            errors.get("style"),
            Some(&["\"3\" is not a valid choice.".to_string()][..])
        );
    }

    #[test]
    fn test_linenos_coercion() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("yes"), true),
            (json!("Off"), false),
            (json!(0), false),
        ] {
            let changes =
                validate_snippet(&json!({"code": "x", "linenos": raw}), ValidationMode::Create)
                    .unwrap();
            assert_eq!(changes.linenos, Some(expected));
        }

        let errors =
            validate_snippet(&json!({"code": "x", "linenos": "maybe"}), ValidationMode::Create)
                .unwrap_err();
        assert_eq!(errors.get("linenos"), Some(&[NOT_BOOLEAN.to_string()][..]));
    }

    #[test]
    fn test_non_object_payload() {
        let errors = validate_snippet(&json!([1, 2]), ValidationMode::Create).unwrap_err();
        assert_eq!(
            errors.get(NON_FIELD_ERRORS),
            Some(&["Invalid data. Expected a dictionary, but got list.".to_string()][..])
        );
    }

    #[test]
    fn test_read_only_and_unknown_keys_ignored() {
        let changes = validate_snippet(
            &json!({"id": 99, "owner": "mallory", "created": "now", "extra": 1, "code": "x"}),
            ValidationMode::Create,
        )
        .unwrap();
        assert_eq!(changes.code.as_deref(), Some("x"));
    }

    #[test]
    fn test_collects_every_field_error() {
        let errors = validate_snippet(
            &json!({"linenos": "?", "language": "?"}),
            ValidationMode::Create,
        )
        .unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["code", "language", "linenos"]);
    }
}
