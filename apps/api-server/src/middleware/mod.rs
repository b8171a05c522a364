//! Middleware and request extractors.

pub mod auth;
pub mod error;

pub use auth::{AuthGate, AuthUser};
pub use error::{AppError, AppResult};
