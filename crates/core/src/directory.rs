//! Member directory query helpers: search terms, sort columns, paging.
//!
//! Lives in `core` so both the repository (SQL generation) and the client
//! (query building) agree on names and defaults.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::member::MemberStatus;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for the member directory.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided 1-based page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset for a 1-based page. Saturates instead of overflowing, so an
/// absurd page number just reads past the end.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(0))
}

/// Number of pages needed to show `total` rows, at least 1.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 1;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Status filter as offered by the directory (`ALL` disables filtering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MemberStatus),
}

impl StatusFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") | Some("ALL") => Ok(StatusFilter::All),
            Some(other) => MemberStatus::parse(other).map(StatusFilter::Only),
        }
    }

    pub fn status(self) -> Option<MemberStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

/// Normalise a free-text search into an `ILIKE` pattern.
///
/// Returns `None` for empty or whitespace-only input (no filtering). `%`, `_`
/// and `\` are escaped so they match literally.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search?.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns the directory can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    FirstName,
    LastName,
    Email,
    Status,
    #[default]
    CreatedAt,
    /// Sorted through the joined `families` row, not a member column.
    FamilyName,
}

impl SortColumn {
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") => Ok(SortColumn::default()),
            Some("first_name") | Some("firstName") => Ok(SortColumn::FirstName),
            Some("last_name") | Some("lastName") => Ok(SortColumn::LastName),
            Some("email") => Ok(SortColumn::Email),
            Some("status") => Ok(SortColumn::Status),
            Some("created_at") | Some("createdAt") => Ok(SortColumn::CreatedAt),
            Some("family_name") | Some("familyName") | Some("family") => {
                Ok(SortColumn::FamilyName)
            }
            Some(other) => Err(CoreError::Validation(format!(
                "Cannot sort members by '{other}'"
            ))),
        }
    }

    /// Query-string name accepted by [`SortColumn::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::FirstName => "first_name",
            SortColumn::LastName => "last_name",
            SortColumn::Email => "email",
            SortColumn::Status => "status",
            SortColumn::CreatedAt => "created_at",
            SortColumn::FamilyName => "family_name",
        }
    }

    /// SQL expression used in `ORDER BY`. Aliases match the directory query
    /// (`m` = members, `f` = families).
    pub fn sql_expr(self) -> &'static str {
        match self {
            SortColumn::FirstName => "LOWER(m.first_name)",
            SortColumn::LastName => "LOWER(m.last_name)",
            SortColumn::Email => "LOWER(m.email)",
            SortColumn::Status => "m.status",
            SortColumn::CreatedAt => "m.created_at",
            SortColumn::FamilyName => "LOWER(f.name)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Ok(SortOrder::default()),
            Some("asc") => Ok(SortOrder::Asc),
            Some("desc") => Ok(SortOrder::Desc),
            Some(other) => Err(CoreError::Validation(format!(
                "Sort order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Build the `ORDER BY` clause. `id` is always the tiebreaker so pages are
/// stable; nulls (members without a family) sort last.
pub fn order_by_clause(column: SortColumn, order: SortOrder) -> String {
    format!(
        "ORDER BY {} {} NULLS LAST, m.id {}",
        column.sql_expr(),
        order.sql(),
        order.sql()
    )
}

// ---------------------------------------------------------------------------
// Parsed query
// ---------------------------------------------------------------------------

/// A validated directory query, ready for the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub pattern: Option<String>,
    pub status: StatusFilter,
    pub sort: SortColumn,
    pub order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl DirectoryQuery {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.limit)
    }
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            pattern: None,
            status: StatusFilter::All,
            sort: SortColumn::default(),
            order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}
