use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post with its author's name, oldest first.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// A single post with its author's name.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;
}
