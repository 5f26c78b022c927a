use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::FOREIGN_KEY_VIOLATION;
use crate::data::post_repository::{
    NewPost, Pagination, PostPatch, PostRepository, PostWithVotes, RankingRecord,
};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct PostWithVotesRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    vote_count: i64,
}

#[derive(FromRow)]
struct RankingRow {
    id: i64,
    created_at: Option<DateTime<Utc>>,
    vote_count: Option<i64>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<PostWithVotes>, DomainError> {
        let row = sqlx::query_as::<_, PostWithVotesRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.author_id,
                p.created_at,
                p.updated_at,
                COUNT(v.id) AS vote_count
            FROM posts p
            LEFT JOIN votes v ON v.post_id = p.id
            WHERE p.id = $1
            GROUP BY p.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post_with_votes).transpose()
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $3,
                content = $4,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(&patch.title)
        .bind(&patch.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_recent(&self, pagination: Pagination) -> Result<Vec<PostWithVotes>, DomainError> {
        let rows = sqlx::query_as::<_, PostWithVotesRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.author_id,
                p.created_at,
                p.updated_at,
                COUNT(v.id) AS vote_count
            FROM posts p
            LEFT JOIN votes v ON v.post_id = p.id
            GROUP BY p.id
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post_with_votes).collect()
    }

    async fn list_ranking_records(&self) -> Result<Vec<RankingRecord>, DomainError> {
        let rows = sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT
                p.id,
                p.created_at,
                COUNT(v.id) AS vote_count
            FROM posts p
            LEFT JOIN votes v ON v.post_id = p.id
            GROUP BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| RankingRecord {
                id: row.id,
                created_at: row.created_at,
                vote_count: row.vote_count,
            })
            .collect())
    }

    async fn get_posts_by_ids(&self, ids: &[i64]) -> Result<Vec<Post>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                author_id,
                created_at,
                updated_at
            FROM posts
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.author_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_post_with_votes(row: PostWithVotesRow) -> Result<PostWithVotes, DomainError> {
    let post = Post::new(
        row.id,
        row.title,
        row.content,
        row.author_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(PostWithVotes {
        post,
        vote_count: row.vote_count,
    })
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
