//! Repository for the `sacraments` table.

use parish_core::sacrament::SacramentType;
use parish_core::types::DbId;
use sqlx::PgPool;

use crate::models::sacrament::{CreateSacrament, Sacrament, UpdateSacrament};

/// Select list joined with `members m` for the display name.
const SELECT: &str = "SELECT s.id, s.member_id, m.first_name || ' ' || m.last_name AS member_name, \
                      s.sacrament_type, s.date, s.place, s.officiant, s.notes, \
                      s.created_at, s.updated_at \
                      FROM sacraments s JOIN members m ON m.id = s.member_id";

pub struct SacramentRepo;

impl SacramentRepo {
    pub async fn create(pool: &PgPool, input: &CreateSacrament) -> Result<Sacrament, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO sacraments (member_id, sacrament_type, date, place, officiant, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(input.member_id)
        .bind(input.sacrament_type.as_str())
        .bind(input.date)
        .bind(&input.place)
        .bind(&input.officiant)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sacrament>, sqlx::Error> {
        let query = format!("{SELECT} WHERE s.id = $1");
        sqlx::query_as::<_, Sacrament>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sacrament records, most recent first, optionally filtered by
    /// member and/or type.
    pub async fn list(
        pool: &PgPool,
        member_id: Option<DbId>,
        sacrament_type: Option<SacramentType>,
    ) -> Result<Vec<Sacrament>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BIGINT IS NULL OR s.member_id = $1)
               AND ($2::TEXT IS NULL OR s.sacrament_type = $2)
             ORDER BY s.date DESC, s.id DESC"
        );
        sqlx::query_as::<_, Sacrament>(&query)
            .bind(member_id)
            .bind(sacrament_type.map(SacramentType::as_str))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSacrament,
    ) -> Result<Option<Sacrament>, sqlx::Error> {
        let updated = sqlx::query(
            "UPDATE sacraments SET
                sacrament_type = COALESCE($2, sacrament_type),
                date = COALESCE($3, date),
                place = COALESCE($4, place),
                officiant = COALESCE($5, officiant),
                notes = COALESCE($6, notes)
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.sacrament_type.map(SacramentType::as_str))
        .bind(input.date)
        .bind(&input.place)
        .bind(&input.officiant)
        .bind(&input.notes)
        .execute(pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sacraments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
