//! Request schemas.
//!
//! Each schema turns an untyped JSON payload into a typed, validated value or
//! a [`SchemaError`] describing which fields broke which constraint. Parsing
//! never panics and has no side effects; callers branch on the result.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

/// Payload accepted by signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SignupInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub name: Option<String>,
}

/// Payload accepted by signin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SigninInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Payload accepted when creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateBlogInput {
    pub title: String,
    pub content: String,
}

/// Payload accepted when updating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateBlogInput {
    pub title: String,
    pub content: String,
    pub id: String,
}

/// One violated constraint.
///
/// `field` is `None` when the payload as a whole has the wrong shape
/// (missing field, wrong JSON type, not an object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Validation failure listing every issue found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Inputs not correct")]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    fn shape(message: impl Into<String>) -> Self {
        Self {
            issues: vec![SchemaIssue {
                field: None,
                message: message.into(),
            }],
        }
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues: Vec<SchemaIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| SchemaIssue {
                    field: Some(field.clone()),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                })
            })
            .collect();

        issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        Self { issues }
    }
}

/// Parse and validate an untyped JSON payload.
pub fn parse<T>(payload: Value) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Validate,
{
    let value: T =
        serde_json::from_value(payload).map_err(|e| SchemaError::shape(e.to_string()))?;
    value.validate()?;
    Ok(value)
}

/// Parse raw request bytes as JSON, then validate. Malformed JSON is a
/// schema failure like any other.
pub fn parse_slice<T>(body: &[u8]) -> Result<T, SchemaError>
where
    T: DeserializeOwned + Validate,
{
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| SchemaError::shape(format!("Malformed JSON: {e}")))?;
    parse(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_signup_accepts_optional_name() {
        let input: SignupInput = parse(json!({
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .unwrap();

        assert_eq!(input.email, "ada@example.com");
        assert_eq!(input.name, None);
    }

    #[rstest]
    #[case(json!({"email": "not-an-email", "password": "secret1"}), "email")]
    #[case(json!({"email": "ada@example.com", "password": "short"}), "password")]
    fn test_signup_rejects_bad_fields(#[case] payload: Value, #[case] field: &str) {
        let err = parse::<SignupInput>(payload).unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field.as_deref(), Some(field));
    }

    #[test]
    fn test_signin_reports_every_violation_sorted() {
        let err = parse::<SigninInput>(json!({"email": "nope", "password": "123"})).unwrap_err();

        let fields: Vec<_> = err.issues.iter().map(|i| i.field.as_deref()).collect();
        assert_eq!(fields, vec![Some("email"), Some("password")]);
    }

    #[rstest]
    #[case(json!({"content": "C"}))]
    #[case(json!({"title": "T"}))]
    #[case(json!({"title": 5, "content": "C"}))]
    #[case(json!("T"))]
    fn test_create_blog_rejects_wrong_shape(#[case] payload: Value) {
        let err = parse::<CreateBlogInput>(payload).unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].field.is_none());
    }

    #[test]
    fn test_create_blog_ignores_unknown_fields() {
        let input: CreateBlogInput =
            parse(json!({"title": "T", "content": "C", "published": true})).unwrap();

        assert_eq!(input.title, "T");
        assert_eq!(input.content, "C");
    }

    #[rstest]
    #[case(json!({"title": "T", "content": "C"}))]
    #[case(json!({"id": "1", "content": "C"}))]
    #[case(json!({"id": "1", "title": "T"}))]
    fn test_update_blog_requires_all_fields(#[case] payload: Value) {
        assert!(parse::<UpdateBlogInput>(payload).is_err());
    }

    #[test]
    fn test_parse_slice_rejects_malformed_json() {
        let err = parse_slice::<CreateBlogInput>(b"{title:").unwrap_err();

        assert!(err.issues[0].message.starts_with("Malformed JSON"));
    }

    #[test]
    fn test_empty_strings_are_valid_titles() {
        let input: UpdateBlogInput =
            parse_slice(br#"{"id": "", "title": "", "content": ""}"#).unwrap();

        assert_eq!(input.id, "");
    }
}
