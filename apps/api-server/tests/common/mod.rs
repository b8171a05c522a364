#![allow(dead_code)]

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;
use uuid::Uuid;

use quill_api::AppState;
use quill_core::domain::{Post, User};
use quill_core::ports::{BaseRepository, TokenService};
use quill_infra::{JwtConfig, JwtTokenService};

pub const SECRET: &str = "integration-test-secret";
pub const ISSUER: &str = "quill-test";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        expiration_hours: 1,
        issuer: ISSUER.to_string(),
    }
}

/// Fresh in-memory state with a real token service.
pub fn test_state() -> AppState {
    AppState::in_memory(Arc::new(JwtTokenService::new(jwt_config())))
}

/// Store a user directly and return its id with a valid token.
pub async fn register(state: &AppState, email: &str, name: Option<&str>) -> (Uuid, String) {
    let user = User::new(
        email.to_string(),
        "not-a-real-hash".to_string(),
        name.map(str::to_string),
    );
    let user = state.users.insert(user).await.unwrap();
    let token = state.tokens.issue(user.id).unwrap();

    (user.id, token)
}

/// Store a post directly and return its id.
pub async fn publish(state: &AppState, author_id: Uuid, title: &str, content: &str) -> Uuid {
    let post = Post::new(author_id, title.to_string(), content.to_string());

    state.posts.insert(post).await.unwrap().id
}

/// Sign arbitrary claims with the test secret.
pub fn sign(claims: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub trait WithBearer {
    fn bearer(self, token: &str) -> Self;
}

impl WithBearer for TestRequest {
    fn bearer(self, token: &str) -> Self {
        self.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
    }
}
