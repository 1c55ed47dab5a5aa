//! Repository for the `families` and `family_relations` tables.

use parish_core::error::CoreError;
use parish_core::household::related_family_pair;
use parish_core::types::DbId;
use sqlx::PgPool;

use crate::error::RepoError;
use crate::models::family::{CreateFamily, Family, FamilySummary, FamilyTree, HouseBranch, UpdateFamily};
use crate::repositories::{HouseRepo, MemberRepo};

const COLUMNS: &str = "id, name, address, phone, house_name, created_at, updated_at";

/// Provides CRUD, related-family links and the household tree for families.
pub struct FamilyRepo;

impl FamilyRepo {
    pub async fn create(pool: &PgPool, input: &CreateFamily) -> Result<Family, sqlx::Error> {
        let query = format!(
            "INSERT INTO families (name, address, phone, house_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.house_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Family>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM families WHERE id = $1");
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List families with their member and house counts, ordered by name.
    ///
    /// `search` is an already escaped ILIKE pattern matched against the
    /// family name and its house name.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<FamilySummary>, sqlx::Error> {
        sqlx::query_as::<_, FamilySummary>(
            "SELECT f.id, f.name, f.address, f.phone, f.house_name,
                    (SELECT COUNT(*) FROM members m WHERE m.family_id = f.id) AS member_count,
                    (SELECT COUNT(*) FROM houses h WHERE h.family_id = f.id) AS house_count,
                    f.created_at, f.updated_at
             FROM families f
             WHERE $1::TEXT IS NULL OR f.name ILIKE $1 OR f.house_name ILIKE $1
             ORDER BY LOWER(f.name), f.id",
        )
        .bind(search)
        .fetch_all(pool)
        .await
    }

    /// Update a family. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFamily,
    ) -> Result<Option<Family>, sqlx::Error> {
        let query = format!(
            "UPDATE families SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                phone = COALESCE($4, phone),
                house_name = COALESCE($5, house_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.house_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a family together with its houses and relation links.
    ///
    /// Members are kept. Their placement is cleared first, in the same
    /// transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let released = sqlx::query(
            "UPDATE members SET
                family_id = NULL,
                house_id = NULL,
                family_role = NULL,
                head_of_family = FALSE
             WHERE family_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let result = sqlx::query("DELETE FROM families WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(family_id = id, members_released = released, "Family deleted");
        }
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Related families
    // -----------------------------------------------------------------------

    /// Link two families. The link is symmetric and stored once.
    pub async fn link_related(pool: &PgPool, family_id: DbId, related_id: DbId) -> Result<(), RepoError> {
        let (low, high) = related_family_pair(family_id, related_id)?;

        for id in [family_id, related_id] {
            if Self::find_by_id(pool, id).await?.is_none() {
                return Err(CoreError::not_found("Family", id).into());
            }
        }

        let inserted = sqlx::query(
            "INSERT INTO family_relations (family_id, related_family_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_family_relations_pair DO NOTHING",
        )
        .bind(low)
        .bind(high)
        .execute(pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(CoreError::conflict(format!(
                "Families {family_id} and {related_id} are already related"
            ))
            .into());
        }
        Ok(())
    }

    /// Remove a link between two families, whichever side it was created from.
    pub async fn unlink_related(pool: &PgPool, family_id: DbId, related_id: DbId) -> Result<(), RepoError> {
        let (low, high) = related_family_pair(family_id, related_id)?;

        let removed = sqlx::query(
            "DELETE FROM family_relations WHERE family_id = $1 AND related_family_id = $2",
        )
        .bind(low)
        .bind(high)
        .execute(pool)
        .await?
        .rows_affected();

        if removed == 0 {
            return Err(CoreError::NotFound {
                entity: "FamilyRelation",
                id: related_id,
            }
            .into());
        }
        Ok(())
    }

    /// Families related to `family_id`, seen from either side of the link.
    pub async fn list_related(pool: &PgPool, family_id: DbId) -> Result<Vec<Family>, sqlx::Error> {
        sqlx::query_as::<_, Family>(
            "SELECT f.id, f.name, f.address, f.phone, f.house_name, f.created_at, f.updated_at
             FROM family_relations r
             JOIN families f
               ON f.id = CASE WHEN r.family_id = $1 THEN r.related_family_id ELSE r.family_id END
             WHERE r.family_id = $1 OR r.related_family_id = $1
             ORDER BY LOWER(f.name), f.id",
        )
        .bind(family_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Household tree
    // -----------------------------------------------------------------------

    /// Assemble the family, its houses with their members, the members not in
    /// any house, and the related families.
    pub async fn tree(pool: &PgPool, id: DbId) -> Result<Option<FamilyTree>, sqlx::Error> {
        let Some(family) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let houses = HouseRepo::list_by_family(pool, id).await?;
        let mut members = MemberRepo::list_by_family(pool, id).await?;

        let branches: Vec<HouseBranch> = houses
            .into_iter()
            .map(|house| {
                let (inside, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut members)
                    .into_iter()
                    .partition(|m| m.house_id == Some(house.id));
                members = rest;
                HouseBranch {
                    house,
                    members: inside,
                }
            })
            .collect();

        let related_families = Self::list_related(pool, id).await?;

        Ok(Some(FamilyTree {
            family,
            houses: branches,
            unhoused_members: members,
            related_families,
        }))
    }
}
