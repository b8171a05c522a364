//! Error handling - every failure renders the same `ErrorResponse` body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;
use quill_shared::{ErrorResponse, SchemaError};

/// Application-level error type returned by handlers and the auth gate.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(#[from] SchemaError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) | AppError::Forbidden(_) | AppError::InvalidCredentials => {
                StatusCode::FORBIDDEN
            }
            AppError::Validation(_) => StatusCode::LENGTH_REQUIRED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::InvalidCredentials => ErrorResponse::invalid_credentials(),
            AppError::Validation(err) => ErrorResponse::invalid_input(err.issues.clone()),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingAuth => AppError::Unauthorized("You are not logged in".to_string()),
            AuthError::TokenExpired => {
                AppError::Unauthorized("Your token has expired. Please sign in again.".to_string())
            }
            AuthError::InvalidToken(msg) => AppError::Unauthorized(msg),
            AuthError::MissingClaim(claim) => {
                AppError::Unauthorized(format!("Token is missing the `{claim}` claim"))
            }
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::from(AuthError::MissingAuth).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Validation(SchemaError { issues: vec![] }).status_code().as_u16(),
            411
        );
        assert_eq!(
            AppError::from(RepoError::Query("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(DomainError::Forbidden("nope".into())).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_missing_claim_renders_unauthorized() {
        let body = body_of(AppError::from(AuthError::MissingClaim("id"))).await;

        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["status"], 403);
    }

    #[actix_web::test]
    async fn test_duplicate_renders_conflict() {
        let err = AppError::from(DomainError::Duplicate("Email already registered".into()));

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = body_of(err).await;
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "Email already registered");
    }

    #[actix_web::test]
    async fn test_internal_errors_hide_detail() {
        let body = body_of(AppError::from(RepoError::Connection("secret dsn".into()))).await;

        assert_eq!(body["error"], "internal_error");
        assert!(!body.to_string().contains("secret dsn"));
    }
}
