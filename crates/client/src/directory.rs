//! Member directory query state.

use parish_core::directory::{SortColumn, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use parish_core::member::MemberStatus;

/// Query for `GET /admin/members`.
///
/// Changing the search, filter, sort or page size moves back to page 1 so
/// the caller never lands past the end of a shorter result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    pub search: Option<String>,
    /// `None` lists every status.
    pub status: Option<MemberStatus>,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort_by: SortColumn::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MemberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self.page = 1;
        self
    }

    pub fn with_status(mut self, status: Option<MemberStatus>) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort_by = column;
        self.sort_order = order;
        self.page = 1;
        self
    }

    /// Set the page size (clamped to `1..=100`) and go back to page 1.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Query-string pairs in the form the API expects.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs.push((
            "status",
            self.status.map_or("ALL", |s| s.as_str()).to_string(),
        ));
        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        let order = match self.sort_order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        pairs.push(("sort_order", order.to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}
