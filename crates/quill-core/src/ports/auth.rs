//! Authentication ports.

use uuid::Uuid;

/// Verified claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    pub user_id: Uuid,
    pub issued_at: Option<i64>,
    pub expires_at: i64,
}

/// Token service trait for issuing and verifying bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed token identifying `user_id`.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify a token and decode its claims.
    fn verify(&self, token: &str) -> Result<AuthClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token is missing the `{0}` claim")]
    MissingClaim(&'static str),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
