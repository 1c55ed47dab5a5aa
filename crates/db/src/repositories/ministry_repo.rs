//! Repository for the `ministries` and `ministry_members` tables.

use parish_core::ministry::MinistryRole;
use parish_core::types::DbId;
use sqlx::PgPool;

use crate::models::ministry::{
    AddMinistryMember, CreateMinistry, Ministry, MinistryMember, MinistrySummary, UpdateMinistry,
};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

const MEMBER_COLUMNS: &str = "mm.id, mm.ministry_id, mm.member_id, mm.role, \
                              m.first_name, m.last_name, mm.created_at";

pub struct MinistryRepo;

impl MinistryRepo {
    pub async fn create(pool: &PgPool, input: &CreateMinistry) -> Result<Ministry, sqlx::Error> {
        let query = format!(
            "INSERT INTO ministries (name, description) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ministry>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ministry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ministries WHERE id = $1");
        sqlx::query_as::<_, Ministry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List ministries with member counts and the names of their leaders.
    pub async fn list(pool: &PgPool) -> Result<Vec<MinistrySummary>, sqlx::Error> {
        sqlx::query_as::<_, MinistrySummary>(
            "SELECT mi.id, mi.name, mi.description,
                    COUNT(mm.id) AS member_count,
                    COALESCE(
                        ARRAY_AGG(m.first_name || ' ' || m.last_name ORDER BY m.first_name)
                            FILTER (WHERE mm.role = 'LEADER'),
                        '{}'
                    ) AS leaders,
                    mi.created_at, mi.updated_at
             FROM ministries mi
             LEFT JOIN ministry_members mm ON mm.ministry_id = mi.id
             LEFT JOIN members m ON m.id = mm.member_id
             GROUP BY mi.id
             ORDER BY LOWER(mi.name), mi.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMinistry,
    ) -> Result<Option<Ministry>, sqlx::Error> {
        let query = format!(
            "UPDATE ministries SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ministry>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ministries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    pub async fn list_members(pool: &PgPool, ministry_id: DbId) -> Result<Vec<MinistryMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS}
             FROM ministry_members mm
             JOIN members m ON m.id = mm.member_id
             WHERE mm.ministry_id = $1
             ORDER BY mm.role, LOWER(m.first_name), mm.id"
        );
        sqlx::query_as::<_, MinistryMember>(&query)
            .bind(ministry_id)
            .fetch_all(pool)
            .await
    }

    /// Add a member to a ministry. Adding an existing membership is a unique
    /// violation on `uq_ministry_members_pair`.
    pub async fn add_member(
        pool: &PgPool,
        ministry_id: DbId,
        input: &AddMinistryMember,
    ) -> Result<MinistryMember, sqlx::Error> {
        let query = format!(
            "WITH mm AS (
                INSERT INTO ministry_members (ministry_id, member_id, role)
                VALUES ($1, $2, $3)
                RETURNING id, ministry_id, member_id, role, created_at
             )
             SELECT {MEMBER_COLUMNS} FROM mm JOIN members m ON m.id = mm.member_id"
        );
        sqlx::query_as::<_, MinistryMember>(&query)
            .bind(ministry_id)
            .bind(input.member_id)
            .bind(input.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Make a member a leader of the ministry, adding the membership if needed.
    /// Existing leaders keep their role.
    pub async fn set_leader(
        pool: &PgPool,
        ministry_id: DbId,
        member_id: DbId,
    ) -> Result<MinistryMember, sqlx::Error> {
        let query = format!(
            "WITH mm AS (
                INSERT INTO ministry_members (ministry_id, member_id, role)
                VALUES ($1, $2, $3)
                ON CONFLICT ON CONSTRAINT uq_ministry_members_pair
                DO UPDATE SET role = EXCLUDED.role
                RETURNING id, ministry_id, member_id, role, created_at
             )
             SELECT {MEMBER_COLUMNS} FROM mm JOIN members m ON m.id = mm.member_id"
        );
        sqlx::query_as::<_, MinistryMember>(&query)
            .bind(ministry_id)
            .bind(member_id)
            .bind(MinistryRole::Leader.as_str())
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if the membership existed.
    pub async fn remove_member(
        pool: &PgPool,
        ministry_id: DbId,
        member_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM ministry_members WHERE ministry_id = $1 AND member_id = $2")
                .bind(ministry_id)
                .bind(member_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
