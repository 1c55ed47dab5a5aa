//! Shared query parameter types for API handlers.

use parish_core::directory::{
    clamp_limit, clamp_page, search_pattern, DirectoryQuery, SortColumn, SortOrder, StatusFilter,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use parish_core::error::CoreError;
use serde::Deserialize;

/// Generic pagination parameters (`?page=&limit=`), 1-based.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(page, limit)`.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_page(self.page),
            clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        )
    }
}

/// Query string of `GET /admin/members`.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl MemberListParams {
    /// Validate and normalise into a repository query. Unknown status, sort
    /// column or order values are validation errors.
    pub fn into_query(self) -> Result<DirectoryQuery, CoreError> {
        Ok(DirectoryQuery {
            pattern: search_pattern(self.search.as_deref()),
            status: StatusFilter::parse(self.status.as_deref())?,
            sort: SortColumn::parse(self.sort_by.as_deref())?,
            order: SortOrder::parse(self.sort_order.as_deref())?,
            page: clamp_page(self.page),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        })
    }
}

/// Optional free-text filter (`?search=`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use parish_core::member::MemberStatus;

    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let query = MemberListParams::default().into_query().unwrap();
        assert_eq!(query, DirectoryQuery::default());
    }

    #[test]
    fn clamps_limit_and_page() {
        let query = MemberListParams {
            page: Some(0),
            limit: Some(1000),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn parses_status_and_sort() {
        let query = MemberListParams {
            search: Some("  john ".into()),
            status: Some("PENDING_APPROVAL".into()),
            sort_by: Some("family_name".into()),
            sort_order: Some("desc".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.status, StatusFilter::Only(MemberStatus::PendingApproval));
        assert_eq!(query.sort, SortColumn::FamilyName);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.pattern.is_some());
    }

    #[test]
    fn rejects_unknown_sort_column() {
        let result = MemberListParams {
            sort_by: Some("password_hash".into()),
            ..Default::default()
        }
        .into_query();
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn pagination_resolve() {
        let params = PaginationParams {
            page: Some(3),
            limit: None,
        };
        assert_eq!(params.resolve(), (3, DEFAULT_PAGE_SIZE));
    }
}
