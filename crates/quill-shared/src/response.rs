//! The error body every failing request answers with.

use serde::{Deserialize, Serialize};

use crate::schema::SchemaIssue;

/// Structured error body.
///
/// `error` is a stable machine-readable code, `message` is for humans.
/// `issues` lists schema violations and is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SchemaIssue>,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<SchemaIssue>) -> Self {
        self.issues = issues;
        self
    }

    // Common error constructors
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(403, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, "forbidden", message)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(403, "invalid_credentials", "Incorrect email or password")
    }

    /// Schema failures answer 411 for compatibility with existing clients.
    pub fn invalid_input(issues: Vec<SchemaIssue>) -> Self {
        Self::new(411, "invalid_input", "Inputs not correct").with_issues(issues)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, "conflict", message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "internal_error", "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_omitted_when_empty() {
        let body =
            serde_json::to_value(ErrorResponse::unauthorized("You are not logged in")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "error": "unauthorized",
                "message": "You are not logged in",
                "status": 403
            })
        );
    }

    #[test]
    fn test_invalid_input_carries_issues() {
        let issue = SchemaIssue {
            field: Some("title".to_string()),
            message: "missing".to_string(),
        };

        let body = serde_json::to_value(ErrorResponse::invalid_input(vec![issue])).unwrap();

        assert_eq!(body["status"], 411);
        assert_eq!(body["issues"][0]["field"], "title");
    }
}
