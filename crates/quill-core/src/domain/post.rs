use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a blog entry owned by exactly one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post attributed to `author_id`.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fails unless `user_id` authored this post.
    pub fn ensure_owned_by(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.author_id == user_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "Only the author can modify this post".to_string(),
            ))
        }
    }

    /// Replace title and content. The author never changes.
    pub fn revise(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// Read model: a post joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_name: Option<String>,
}

impl PostWithAuthor {
    pub fn new(post: Post, author_name: Option<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_attributed_to_author() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "T".to_string(), "C".to_string());

        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, post.updated_at);
        assert!(post.ensure_owned_by(author).is_ok());
    }

    #[test]
    fn test_ensure_owned_by_rejects_other_users() {
        let post = Post::new(Uuid::new_v4(), "T".to_string(), "C".to_string());

        let result = post.ensure_owned_by(Uuid::new_v4());

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
    }

    #[test]
    fn test_revise_keeps_author() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "old".to_string(), "old body".to_string());

        post.revise("new".to_string(), "new body".to_string());

        assert_eq!(post.title, "new");
        assert_eq!(post.content, "new body");
        assert_eq!(post.author_id, author);
        assert!(post.updated_at >= post.created_at);
    }
}
