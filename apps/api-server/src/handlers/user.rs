//! Signup and signin.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quill_shared::dto::TokenResponse;
use quill_shared::schema::{self, SigninInput, SignupInput};

use crate::middleware::{AppError, AppResult};
use crate::state::AppState;

/// Argon2 is CPU bound; keep it off the async workers.
async fn hash_password(
    passwords: Arc<dyn PasswordService>,
    password: String,
) -> AppResult<String> {
    web::block(move || passwords.hash(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(Into::into)
}

async fn verify_password(
    passwords: Arc<dyn PasswordService>,
    password: String,
    hash: String,
) -> AppResult<bool> {
    web::block(move || passwords.verify(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(Into::into)
}

fn email_taken() -> DomainError {
    DomainError::Duplicate("Email already registered".to_string())
}

/// POST /api/v1/user/signup
pub async fn signup(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let input: SignupInput = schema::parse_slice(&body)?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(email_taken().into());
    }

    let password_hash = hash_password(state.passwords.clone(), input.password).await?;
    let user = state
        .users
        .insert(User::new(input.email, password_hash, input.name))
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same email
            RepoError::Constraint(_) => AppError::from(email_taken()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User signed up");

    let jwt = state.tokens.issue(user.id)?;
    Ok(HttpResponse::Ok().json(TokenResponse { jwt }))
}

/// POST /api/v1/user/signin
pub async fn signin(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let input: SigninInput = schema::parse_slice(&body)?;

    let Some(user) = state.users.find_by_email(&input.email).await? else {
        // Unknown emails cost one Argon2 run, like a wrong password
        hash_password(state.passwords.clone(), input.password).await?;
        return Err(AppError::InvalidCredentials);
    };

    let valid = verify_password(
        state.passwords.clone(),
        input.password,
        user.password_hash.clone(),
    )
    .await?;

    if !valid {
        tracing::debug!(user_id = %user.id, "Rejected signin with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let jwt = state.tokens.issue(user.id)?;
    Ok(HttpResponse::Ok().json(TokenResponse { jwt }))
}
