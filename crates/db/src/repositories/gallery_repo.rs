//! Repository for gallery categories, albums and images.

use parish_core::error::CoreError;
use parish_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::gallery::{
    CreateGalleryAlbum, CreateGalleryCategory, GalleryAlbum, GalleryCategory, GalleryImage,
    UpdateGalleryAlbum, UpdateGalleryCategory,
};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

const ALBUM_SELECT: &str = "SELECT a.id, a.category_id, a.title, a.description, a.cover_url, \
                            a.event_date, \
                            (SELECT COUNT(*) FROM gallery_images i WHERE i.album_id = a.id) AS image_count, \
                            a.created_at, a.updated_at \
                            FROM gallery_albums a";

const IMAGE_COLUMNS: &str = "id, album_id, url, caption, created_at, updated_at";

pub struct GalleryRepo;

impl GalleryRepo {
    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    pub async fn create_category(
        pool: &PgPool,
        input: &CreateGalleryCategory,
    ) -> Result<GalleryCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_categories (name, description) VALUES ($1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn list_categories(pool: &PgPool) -> Result<Vec<GalleryCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM gallery_categories ORDER BY LOWER(name), id");
        sqlx::query_as::<_, GalleryCategory>(&query).fetch_all(pool).await
    }

    pub async fn update_category(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryCategory,
    ) -> Result<Option<GalleryCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, GalleryCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Albums in the category are kept and become uncategorised.
    pub async fn delete_category(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Albums
    // -----------------------------------------------------------------------

    pub async fn create_album(
        pool: &PgPool,
        input: &CreateGalleryAlbum,
    ) -> Result<GalleryAlbum, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO gallery_albums (category_id, title, description, cover_url, event_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.category_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.cover_url)
        .bind(input.event_date)
        .fetch_one(pool)
        .await?;

        Self::find_album(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_album(pool: &PgPool, id: DbId) -> Result<Option<GalleryAlbum>, sqlx::Error> {
        let query = format!("{ALBUM_SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, GalleryAlbum>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Albums newest first, optionally limited to one category.
    pub async fn list_albums(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<GalleryAlbum>, sqlx::Error> {
        let query = format!(
            "{ALBUM_SELECT}
             WHERE $1::BIGINT IS NULL OR a.category_id = $1
             ORDER BY a.event_date DESC NULLS LAST, a.id DESC"
        );
        sqlx::query_as::<_, GalleryAlbum>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update_album(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryAlbum,
    ) -> Result<Option<GalleryAlbum>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE gallery_albums SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                cover_url = COALESCE($5, cover_url),
                event_date = COALESCE($6, event_date)
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.category_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.cover_url)
        .bind(input.event_date)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_album(pool, id).await
    }

    /// Deletes the album and its image rows. Stored files are left in place.
    pub async fn delete_album(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_albums WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    pub async fn list_images(pool: &PgPool, album_id: DbId) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!("SELECT {IMAGE_COLUMNS} FROM gallery_images WHERE album_id = $1 ORDER BY id");
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(album_id)
            .fetch_all(pool)
            .await
    }

    /// Link already uploaded image URLs to an album in a single statement.
    pub async fn link_images(
        pool: &PgPool,
        album_id: DbId,
        urls: &[String],
    ) -> Result<Vec<GalleryImage>, RepoError> {
        if Self::find_album(pool, album_id).await?.is_none() {
            return Err(CoreError::not_found("GalleryAlbum", album_id).into());
        }

        let query = format!(
            "INSERT INTO gallery_images (album_id, url)
             SELECT $1, url FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS t(url, ord)
             ORDER BY ord
             RETURNING {IMAGE_COLUMNS}"
        );
        let images = sqlx::query_as::<_, GalleryImage>(&query)
            .bind(album_id)
            .bind(urls)
            .fetch_all(pool)
            .await?;

        tracing::info!(album_id, count = images.len(), "Images linked to album");
        Ok(images)
    }

    pub async fn delete_image(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
