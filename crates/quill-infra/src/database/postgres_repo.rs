//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use uuid::Uuid;

use quill_core::domain::{PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, read_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Row shape of the post projection: the author is reduced to a name.
#[derive(Debug, FromQueryResult)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    author_name: Option<String>,
}

impl From<PostRow> for PostWithAuthor {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author_name: row.author_name,
        }
    }
}

/// `SELECT posts.id, posts.title, posts.content, users.name AS author_name`
/// with the author left-joined.
fn projection() -> Select<PostEntity> {
    PostEntity::find()
        .select_only()
        .column(post::Column::Id)
        .column(post::Column::Title)
        .column(post::Column::Content)
        .column_as(user::Column::Name, "author_name")
        .join(JoinType::LeftJoin, post::Relation::Author.def())
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = projection()
            .order_by_asc(post::Column::CreatedAt)
            .into_model::<PostRow>()
            .all(&self.db)
            .await
            .map_err(read_error)?;

        tracing::debug!(count = rows.len(), "Listed posts");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = projection()
            .filter(post::Column::Id.eq(id))
            .into_model::<PostRow>()
            .one(&self.db)
            .await
            .map_err(read_error)?;

        Ok(row.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ada@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }
}
