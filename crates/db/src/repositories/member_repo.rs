//! Repository for the `members` table.
//!
//! Besides plain CRUD this owns the household placement operations
//! (assign, remove, role, spouse) and the approval workflow. Those run in a
//! transaction that locks the member row first, so concurrent assignments of
//! the same member serialize.

use parish_core::directory::DirectoryQuery;
use parish_core::error::CoreError;
use parish_core::household::{plan_assignment, validate_spouse};
use parish_core::member::{validate_approval, validate_status_transition, FamilyRole, MemberStatus};
use parish_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::member::{AssignFamily, CreateMember, Member, MemberListItem, UpdateMember};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, email, phone, date_of_birth, gender, address, \
                       photo_url, status, family_id, house_id, family_role, head_of_family, \
                       spouse_id, created_at, updated_at";

/// Directory columns; `m` = members, `f` = families, `h` = houses.
const LIST_COLUMNS: &str = "m.id, m.first_name, m.last_name, m.email, m.phone, m.photo_url, \
                            m.status, m.family_id, f.name AS family_name, m.house_id, \
                            h.name AS house_name, m.family_role, m.head_of_family, m.created_at";

/// Provides CRUD, directory search, placement and approval for members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    ///
    /// If `status` is `None`, the member starts as `PENDING_APPROVAL`.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert on any executor so registration can create the member inside
    /// its own transaction.
    pub(crate) async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members
                (first_name, last_name, email, phone, date_of_birth, gender, address, photo_url, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'PENDING_APPROVAL'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.address)
            .bind(&input.photo_url)
            .bind(input.status.map(MemberStatus::as_str))
            .fetch_one(executor)
            .await
    }

    /// Find a member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Members of a family (housed or not), heads first, then by name.
    pub async fn list_by_family(pool: &PgPool, family_id: DbId) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE family_id = $1
             ORDER BY head_of_family DESC, LOWER(first_name), id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(family_id)
            .fetch_all(pool)
            .await
    }

    /// Members placed in a house, heads first, then by name.
    pub async fn list_by_house(pool: &PgPool, house_id: DbId) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE house_id = $1
             ORDER BY head_of_family DESC, LOWER(first_name), id"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(house_id)
            .fetch_all(pool)
            .await
    }

    /// Run a directory query, returning one page of rows and the total count
    /// matching the filters (independent of page and limit).
    pub async fn search(
        pool: &PgPool,
        params: &DirectoryQuery,
    ) -> Result<(Vec<MemberListItem>, i64), sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.pattern.is_some() {
            conditions.push(format!(
                "(m.first_name ILIKE ${bind_idx} \
                  OR m.last_name ILIKE ${bind_idx} \
                  OR (m.first_name || ' ' || m.last_name) ILIKE ${bind_idx} \
                  OR m.email ILIKE ${bind_idx} \
                  OR m.phone ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if params.status.status().is_some() {
            conditions.push(format!("m.status = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM members m {where_clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(ref pattern) = params.pattern {
            count = count.bind(pattern);
        }
        if let Some(status) = params.status.status() {
            count = count.bind(status.as_str());
        }
        let total = count.fetch_one(pool).await?;

        let order_by = parish_core::directory::order_by_clause(params.sort, params.order);
        let list_query = format!(
            "SELECT {LIST_COLUMNS}
             FROM members m
             LEFT JOIN families f ON f.id = m.family_id
             LEFT JOIN houses h ON h.id = m.house_id
             {where_clause}
             {order_by}
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, MemberListItem>(&list_query);

        // Bind dynamic parameters in the same order as the conditions.
        if let Some(ref pattern) = params.pattern {
            q = q.bind(pattern);
        }
        if let Some(status) = params.status.status() {
            q = q.bind(status.as_str());
        }

        q = q.bind(params.limit).bind(params.offset());
        let rows = q.fetch_all(pool).await?;

        Ok((rows, total))
    }

    /// Update personal details. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                date_of_birth = COALESCE($6, date_of_birth),
                gender = COALESCE($7, gender),
                address = COALESCE($8, address),
                photo_url = COALESCE($9, photo_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.gender)
            .bind(&input.address)
            .bind(&input.photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a member. Returns `true` if a row was removed.
    ///
    /// Spouse links, house heads and user links pointing at the member are
    /// nulled by the foreign keys; sacraments and ministry memberships go
    /// with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Approval workflow
    // -----------------------------------------------------------------------

    /// Approve a pending member (`PENDING_APPROVAL -> ACTIVE`).
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Member, RepoError> {
        let mut tx = pool.begin().await?;
        let member = Self::lock(&mut tx, id).await?;

        validate_approval(MemberStatus::parse(&member.status)?)?;

        let updated = Self::write_status(&mut tx, id, MemberStatus::Active).await?;
        tx.commit().await?;
        tracing::info!(member_id = id, "Member approved");
        Ok(updated)
    }

    /// Manually change a member's status, following the approval state machine.
    pub async fn change_status(
        pool: &PgPool,
        id: DbId,
        status: MemberStatus,
    ) -> Result<Member, RepoError> {
        let mut tx = pool.begin().await?;
        let member = Self::lock(&mut tx, id).await?;

        validate_status_transition(MemberStatus::parse(&member.status)?, status)?;

        let updated = Self::write_status(&mut tx, id, status).await?;
        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Household placement
    // -----------------------------------------------------------------------

    /// Place a member in a family and, optionally, one of its houses.
    ///
    /// The house must belong to the family. Moving to another family clears
    /// the spouse link and, unless a new role is given, the family role.
    /// Leaving a house also drops the member as that house's head.
    pub async fn assign_to_family(
        pool: &PgPool,
        id: DbId,
        input: &AssignFamily,
    ) -> Result<Member, RepoError> {
        let mut tx = pool.begin().await?;
        let member = Self::lock(&mut tx, id).await?;

        let family_exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM families WHERE id = $1 FOR SHARE")
                .bind(input.family_id)
                .fetch_optional(&mut *tx)
                .await?;
        if family_exists.is_none() {
            return Err(CoreError::not_found("Family", input.family_id).into());
        }

        let house_family_id = match input.house_id {
            Some(house_id) => {
                let owner: Option<DbId> =
                    sqlx::query_scalar("SELECT family_id FROM houses WHERE id = $1 FOR SHARE")
                        .bind(house_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                Some(owner.ok_or_else(|| CoreError::not_found("House", house_id))?)
            }
            None => None,
        };

        let plan = plan_assignment(&member.placement(), input.family_id, input.house_id, house_family_id)?;
        let family_changes = member.family_id != Some(plan.family_id);

        let role: Option<String> = match (input.family_role, family_changes) {
            (Some(role), _) => Some(role.as_str().to_string()),
            (None, true) => None,
            (None, false) => member.family_role.clone(),
        };
        let is_head = role.as_deref() == Some(FamilyRole::Head.as_str());

        Self::drop_house_headship(&mut tx, id, plan.house_id).await?;

        let query = format!(
            "UPDATE members SET
                family_id = $2,
                house_id = $3,
                family_role = $4,
                head_of_family = $5,
                spouse_id = CASE WHEN $6 THEN NULL ELSE spouse_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(plan.family_id)
            .bind(plan.house_id)
            .bind(role)
            .bind(is_head)
            .bind(plan.clear_spouse)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            member_id = id,
            family_id = plan.family_id,
            house_id = ?plan.house_id,
            spouse_cleared = plan.clear_spouse,
            "Member assigned to family"
        );
        Ok(updated)
    }

    /// Take a member out of its family: clears family, house and family role
    /// together. The member itself is kept.
    pub async fn remove_from_family(pool: &PgPool, id: DbId) -> Result<Member, RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock(&mut tx, id).await?;
        Self::drop_house_headship(&mut tx, id, None).await?;

        let query = format!(
            "UPDATE members SET
                family_id = NULL,
                house_id = NULL,
                family_role = NULL,
                head_of_family = FALSE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(member_id = id, "Member removed from family");
        Ok(updated)
    }

    /// Change a member's role in its family. Several members may hold `HEAD`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn change_family_role(
        pool: &PgPool,
        id: DbId,
        role: FamilyRole,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET family_role = $2, head_of_family = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(role.as_str())
            .bind(role.is_head())
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the spouse link. Only this member's side is written.
    pub async fn set_spouse(
        pool: &PgPool,
        id: DbId,
        spouse_id: Option<DbId>,
    ) -> Result<Member, RepoError> {
        validate_spouse(id, spouse_id)?;

        let mut tx = pool.begin().await?;
        Self::lock(&mut tx, id).await?;

        if let Some(spouse_id) = spouse_id {
            let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM members WHERE id = $1")
                .bind(spouse_id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Err(CoreError::not_found("Member", spouse_id).into());
            }
        }

        let query = format!("UPDATE members SET spouse_id = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(spouse_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Lock a member row for the rest of the transaction.
    async fn lock(tx: &mut Transaction<'_, Postgres>, id: DbId) -> Result<Member, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| CoreError::not_found("Member", id).into())
    }

    async fn write_status(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        status: MemberStatus,
    ) -> Result<Member, sqlx::Error> {
        let query = format!("UPDATE members SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Clear `head_member_id` on any house the member heads, except `keep_house`.
    async fn drop_house_headship(
        tx: &mut Transaction<'_, Postgres>,
        member_id: DbId,
        keep_house: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE houses SET head_member_id = NULL
             WHERE head_member_id = $1 AND id IS DISTINCT FROM $2",
        )
        .bind(member_id)
        .bind(keep_house)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
