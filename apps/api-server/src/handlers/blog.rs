//! Blog post handlers. All of them run behind the auth gate.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Post, PostWithAuthor};
use quill_core::ports::{BaseRepository, PostRepository};
use quill_shared::dto::{AuthorView, BlogListResponse, BlogResponse, BlogView, PostIdResponse};
use quill_shared::schema::{self, CreateBlogInput, UpdateBlogInput};

use crate::middleware::{AppError, AppResult, AuthUser};
use crate::state::AppState;

fn to_view(post: PostWithAuthor) -> BlogView {
    BlogView {
        id: post.id,
        title: post.title,
        content: post.content,
        author: AuthorView {
            name: post.author_name,
        },
    }
}

/// POST /api/v1/blog
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let input: CreateBlogInput = schema::parse_slice(&body)?;

    let post = state
        .posts
        .insert(Post::new(user.user_id, input.title, input.content))
        .await?;

    tracing::info!(post_id = %post.id, author_id = %user.user_id, "Post created");
    Ok(HttpResponse::Ok().json(PostIdResponse { id: post.id }))
}

/// PUT /api/v1/blog
///
/// Only the author may update a post.
pub async fn update_post(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let input: UpdateBlogInput = schema::parse_slice(&body)?;

    // A non-UUID id cannot name any stored post
    let id = Uuid::parse_str(&input.id)
        .map_err(|_| AppError::NotFound(format!("Post with id {} not found", input.id)))?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "Post",
            id,
        })?;

    post.ensure_owned_by(user.user_id)?;
    post.revise(input.title, input.content);
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(PostIdResponse { id: post.id }))
}

/// GET /api/v1/blog/bulk
pub async fn list_posts(state: web::Data<AppState>, _user: AuthUser) -> AppResult<HttpResponse> {
    let blogs = state
        .posts
        .list_with_authors()
        .await?
        .into_iter()
        .map(to_view)
        .collect();

    Ok(HttpResponse::Ok().json(BlogListResponse { blogs }))
}

/// GET /api/v1/blog/{id}
///
/// A missing post answers 200 with `{"blog": null}`.
pub async fn get_post(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let blog = match Uuid::parse_str(&path) {
        Ok(id) => state.posts.find_with_author(id).await?.map(to_view),
        Err(_) => None,
    };

    Ok(HttpResponse::Ok().json(BlogResponse { blog }))
}
