//! Named catalog searches, the search log and its analytics.
//!
//! [`Catalog`] is a thin parameter-binding layer: each method builds one
//! [`Statement`](crate::store::Statement) and hands it to the
//! [`QueryExecutor`](crate::store::QueryExecutor) for the right store.

use std::fmt;

pub mod operations;
pub(crate) mod queries;

pub use operations::{Catalog, TOP_N};

/// Kind of search recorded in the search log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    Category,
    Actor,
    Title,
    Year,
    CategoryYear,
    Keyword,
}

impl SearchType {
    /// Label stored in the `search_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Category => "category_search",
            SearchType::Actor => "actor_search",
            SearchType::Title => "title_search",
            SearchType::Year => "year_search",
            SearchType::CategoryYear => "category_year_search",
            SearchType::Keyword => "keyword_search",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
