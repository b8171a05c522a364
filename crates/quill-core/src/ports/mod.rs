//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthClaims, AuthError, PasswordService, TokenService};
pub use repository::{BaseRepository, PostRepository, UserRepository};
