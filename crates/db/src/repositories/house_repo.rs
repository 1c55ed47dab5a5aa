//! Repository for the `houses` table.

use parish_core::error::CoreError;
use parish_core::household::validate_house_head;
use parish_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::house::{CreateHouse, House, UpdateHouse};

const COLUMNS: &str = "id, family_id, name, address, head_member_id, created_at, updated_at";

/// Provides CRUD and head assignment for houses.
pub struct HouseRepo;

impl HouseRepo {
    /// Insert a house under an existing family.
    ///
    /// Returns `NotFound` when the family does not exist.
    pub async fn create(pool: &PgPool, input: &CreateHouse) -> Result<House, RepoError> {
        let family: Option<DbId> = sqlx::query_scalar("SELECT id FROM families WHERE id = $1")
            .bind(input.family_id)
            .fetch_optional(pool)
            .await?;
        if family.is_none() {
            return Err(CoreError::not_found("Family", input.family_id).into());
        }

        let query = format!(
            "INSERT INTO houses (family_id, name, address)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let house = sqlx::query_as::<_, House>(&query)
            .bind(input.family_id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_one(pool)
            .await?;
        Ok(house)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<House>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM houses WHERE id = $1");
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_family(pool: &PgPool, family_id: DbId) -> Result<Vec<House>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM houses WHERE family_id = $1 ORDER BY LOWER(name), id"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHouse,
    ) -> Result<Option<House>, sqlx::Error> {
        let query = format!(
            "UPDATE houses SET
                name = COALESCE($2, name),
                address = COALESCE($3, address)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Delete a house. Its members stay in the family but lose the house.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE members SET house_id = NULL WHERE house_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the head of a house. A head must live in the house.
    pub async fn set_head(
        pool: &PgPool,
        id: DbId,
        member_id: Option<DbId>,
    ) -> Result<House, RepoError> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM houses WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(CoreError::not_found("House", id).into());
        }

        if let Some(member_id) = member_id {
            let member_house: Option<Option<DbId>> =
                sqlx::query_scalar("SELECT house_id FROM members WHERE id = $1 FOR SHARE")
                    .bind(member_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            let member_house = member_house.ok_or_else(|| CoreError::not_found("Member", member_id))?;
            validate_house_head(id, member_id, member_house)?;
        }

        let query = format!("UPDATE houses SET head_member_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let house = sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(member_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(house)
    }
}
