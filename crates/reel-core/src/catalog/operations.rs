//! Catalog search, search logging and popularity analytics.

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use super::{queries::*, SearchType};
use crate::{
    config::{CATALOG_STORE, SEARCH_LOG_STORE},
    error::Result,
    store::{QueryExecutor, ResultSet, Statement},
};

/// Number of rows returned by the analytics reads.
pub const TOP_N: usize = 5;

/// The fixed set of operations the shell can run.
///
/// Searches read from the catalog store, [`Catalog::log_query`] writes to the
/// search log store and the `popular_*` methods aggregate it. Searching
/// never writes to the log on its own; recording a search is a separate,
/// explicit call.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    executor: QueryExecutor<'a>,
}

impl<'a> Catalog<'a> {
    pub fn new(executor: QueryExecutor<'a>) -> Self {
        Self { executor }
    }

    /// All categories as `(category_id, name)`.
    pub fn list_categories(&self) -> Result<ResultSet> {
        self.read(Statement::new("list_categories", CATEGORY_LIST_SQL))
    }

    /// Name of the category with `category_id`, if it exists.
    pub fn category_name(&self, category_id: i64) -> Result<Option<String>> {
        let result =
            self.read(Statement::new("category_name", CATEGORY_NAME_SQL).bind(category_id))?;
        let name = result
            .first_column()
            .next()
            .and_then(|value| value.as_str())
            .map(String::from);
        Ok(name)
    }

    /// Films in a category as `(title, release_year, description)`.
    pub fn movies_by_category(&self, category_id: i64) -> Result<ResultSet> {
        self.read(Statement::new("movies_by_category", SEARCH_BY_CATEGORY_SQL).bind(category_id))
    }

    /// Films released in `year` as `(title, release_year, description)`.
    pub fn movies_by_year(&self, year: i64) -> Result<ResultSet> {
        self.read(Statement::new("movies_by_year", SEARCH_BY_YEAR_SQL).bind(year))
    }

    /// Films of a category, matched by name without regard to case, released
    /// in `year`, as `(title, release_year, category, description)`.
    pub fn movies_by_category_and_year(
        &self,
        category_name: &str,
        year: i64,
    ) -> Result<ResultSet> {
        self.read(
            Statement::new("movies_by_category_and_year", SEARCH_BY_CATEGORY_AND_YEAR_SQL)
                .bind(category_name)
                .bind(year),
        )
    }

    /// Films whose title contains `title` as `(title, description)`.
    pub fn movies_by_title(&self, title: &str) -> Result<ResultSet> {
        self.read(
            Statement::new("movies_by_title", SEARCH_BY_TITLE_SQL).bind(contains_pattern(title)),
        )
    }

    /// Films with an actor whose full name contains `actor_name`, as
    /// `(title, actor)`.
    pub fn movies_by_actor(&self, actor_name: &str) -> Result<ResultSet> {
        self.read(
            Statement::new("movies_by_actor", SEARCH_BY_ACTOR_SQL)
                .bind(contains_pattern(actor_name)),
        )
    }

    /// Films whose title, description or any actor's full name contains
    /// `keyword`, as `(title, actors, description)`. `actors` lists the
    /// film's distinct actors separated by `", "` and is null for films
    /// without actors.
    pub fn movies_by_keyword(&self, keyword: &str) -> Result<ResultSet> {
        let pattern = contains_pattern(keyword);
        self.read(
            Statement::new("movies_by_keyword", SEARCH_BY_KEYWORD_SQL)
                .bind(pattern.as_str())
                .bind(pattern.as_str())
                .bind(pattern),
        )
    }

    /// Appends a search to the search log.
    pub fn log_query(&self, search_type: SearchType, search_term: &str) -> Result<()> {
        self.executor.execute_write(
            SEARCH_LOG_STORE,
            &Statement::new("log_query", INSERT_QUERY_LOG_SQL)
                .bind(search_type.as_str())
                .bind(search_term),
        )
    }

    /// Most used search types as `(search_type, usage_count)`.
    pub fn popular_search_types(&self) -> Result<ResultSet> {
        self.analytics(Statement::new("popular_search_types", POPULAR_SEARCH_TYPES_SQL))
    }

    /// Most used search terms as `(search_term, usage_count)`.
    pub fn popular_search_terms(&self) -> Result<ResultSet> {
        self.analytics(Statement::new("popular_search_terms", POPULAR_SEARCH_TERMS_SQL))
    }

    /// Most used search terms of the current UTC day.
    pub fn popular_searches_today(&self) -> Result<ResultSet> {
        self.popular_searches_on(today())
    }

    /// Most used search terms logged on `day` (UTC).
    pub fn popular_searches_on(&self, day: Date) -> Result<ResultSet> {
        self.analytics(
            Statement::new("popular_searches_on", POPULAR_SEARCHES_ON_DAY_SQL)
                .bind(day.to_string()),
        )
    }

    /// Most used search terms of the current UTC month.
    pub fn popular_searches_this_month(&self) -> Result<ResultSet> {
        let today = today();
        self.popular_searches_in_month(today.year(), today.month())
    }

    /// Most used search terms logged during `month` of `year` (UTC).
    pub fn popular_searches_in_month(&self, year: i16, month: i8) -> Result<ResultSet> {
        self.analytics(
            Statement::new("popular_searches_in_month", POPULAR_SEARCHES_IN_MONTH_SQL)
                .bind(format!("{year:04}-{month:02}")),
        )
    }

    fn read(&self, statement: Statement) -> Result<ResultSet> {
        self.executor.execute_read(CATALOG_STORE, &statement)
    }

    fn analytics(&self, statement: Statement) -> Result<ResultSet> {
        self.executor.execute_read(SEARCH_LOG_STORE, &statement)
    }
}

/// Current calendar date in UTC, matching `CURRENT_TIMESTAMP` in the log.
fn today() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}
