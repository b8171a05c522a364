//! In-memory repositories - used when no database is configured and in tests.
//!
//! Both repositories share one set of tables so that post projections can
//! resolve author names, and so that the email uniqueness and author foreign
//! key rules match the SQL schema. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: Vec<Post>,
}

impl Tables {
    fn author_name(&self, author_id: Uuid) -> Option<String> {
        self.users.get(&author_id).and_then(|u| u.name.clone())
    }

    fn project(&self, post: &Post) -> PostWithAuthor {
        PostWithAuthor::new(post.clone(), self.author_name(post.author_id))
    }
}

/// Shared storage handing out user and post repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        if tables.users.contains_key(&user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;

        *slot = user.clone();
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;

        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;

        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("posts_author_id_fkey".to_string()));
        }
        if tables.posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("posts_pkey".to_string()));
        }

        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;

        *slot = post.clone();
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<&Post> = tables.posts.iter().collect();
        posts.sort_by_key(|p| p.created_at);

        Ok(posts.into_iter().map(|p| tables.project(p)).collect())
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.tables.read().await;

        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.project(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, name: Option<&str>) -> User {
        User::new(
            email.to_string(),
            "hash".to_string(),
            name.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        let users = store.users();

        users.insert(user("ada@example.com", None)).await.unwrap();
        let result = users.insert(user("ada@example.com", None)).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = InMemoryStore::new();
        let saved = store.users().insert(user("ada@example.com", None)).await.unwrap();

        let found = store.users().find_by_email("ada@example.com").await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(saved.id));
        assert!(store.users().find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryStore::new();
        let post = Post::new(Uuid::new_v4(), "T".to_string(), "C".to_string());

        let result = store.posts().insert(post).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_projection_carries_author_name() {
        let store = InMemoryStore::new();
        let author = store.users().insert(user("ada@example.com", Some("Ada"))).await.unwrap();
        let post = store
            .posts()
            .insert(Post::new(author.id, "T".to_string(), "C".to_string()))
            .await
            .unwrap();

        let view = store.posts().find_with_author(post.id).await.unwrap().unwrap();

        assert_eq!(
            view,
            PostWithAuthor {
                id: post.id,
                title: "T".to_string(),
                content: "C".to_string(),
                author_name: Some("Ada".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_list_is_empty_without_posts() {
        let store = InMemoryStore::new();

        assert!(store.posts().list_with_authors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_post_is_not_found() {
        let store = InMemoryStore::new();
        let post = Post::new(Uuid::new_v4(), "T".to_string(), "C".to_string());

        let result = store.posts().update(post).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
