//! Repository for the `content_blocks` table (editable site text keyed by slug).

use sqlx::PgPool;

use crate::models::content::{ContentBlock, UpsertContentBlock};

const COLUMNS: &str = "id, slug, title, body, created_at, updated_at";

pub struct ContentRepo;

impl ContentRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<ContentBlock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_blocks ORDER BY slug");
        sqlx::query_as::<_, ContentBlock>(&query).fetch_all(pool).await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<ContentBlock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_blocks WHERE slug = $1");
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Create the block or replace its title and body.
    pub async fn upsert(
        pool: &PgPool,
        slug: &str,
        input: &UpsertContentBlock,
    ) -> Result<ContentBlock, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_blocks (slug, title, body) VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_content_blocks_slug
             DO UPDATE SET title = EXCLUDED.title, body = EXCLUDED.body
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentBlock>(&query)
            .bind(slug)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_blocks WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
