//! Data Transfer Objects - response bodies for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returned by signup and signin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub jwt: String,
}

/// Returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostIdResponse {
    pub id: Uuid,
}

/// Public projection of a post's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub name: Option<String>,
}

/// Public projection of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorView,
}

/// `GET /bulk` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogView>,
}

/// `GET /{id}` body. `blog` is `null` when no post matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogResponse {
    pub blog: Option<BlogView>,
}
