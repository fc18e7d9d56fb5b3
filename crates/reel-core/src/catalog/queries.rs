//! SQL text of every catalog and search-log statement.
//!
//! Placeholders are numbered (`?N`) and always bound by the executor.
//! Substring searches escape LIKE wildcards in the bound pattern with `\`,
//! see [`contains_pattern`].

// Search log writes
pub(crate) const INSERT_QUERY_LOG_SQL: &str =
    "INSERT INTO queries (search_type, search_term) VALUES (?1, ?2)";

// Catalog searches
pub(crate) const CATEGORY_LIST_SQL: &str =
    "SELECT category_id, name FROM category ORDER BY category_id";

pub(crate) const CATEGORY_NAME_SQL: &str = "SELECT name FROM category WHERE category_id = ?1";

pub(crate) const SEARCH_BY_CATEGORY_SQL: &str = "\
SELECT f.title, f.release_year, f.description
FROM film AS f
JOIN film_category AS fc ON f.film_id = fc.film_id
WHERE fc.category_id = ?1
ORDER BY f.title";

pub(crate) const SEARCH_BY_YEAR_SQL: &str = "\
SELECT title, release_year, description
FROM film
WHERE release_year = ?1
ORDER BY title";

pub(crate) const SEARCH_BY_CATEGORY_AND_YEAR_SQL: &str = "\
SELECT f.title, f.release_year, c.name AS category, f.description
FROM film AS f
JOIN film_category AS fc ON f.film_id = fc.film_id
JOIN category AS c ON fc.category_id = c.category_id
WHERE c.name = ?1 COLLATE NOCASE AND f.release_year = ?2
ORDER BY f.title";

pub(crate) const SEARCH_BY_TITLE_SQL: &str = r"
SELECT title, description
FROM film
WHERE title LIKE ?1 ESCAPE '\'
ORDER BY title";

pub(crate) const SEARCH_BY_ACTOR_SQL: &str = r"
SELECT f.title, a.first_name || ' ' || a.last_name AS actor
FROM film AS f
JOIN film_actor AS fa ON f.film_id = fa.film_id
JOIN actor AS a ON fa.actor_id = a.actor_id
WHERE (a.first_name || ' ' || a.last_name) LIKE ?1 ESCAPE '\'
ORDER BY actor, f.title";

// The derived table deduplicates (film, actor name) pairs before grouping, so
// group_concat can use a custom separator.
pub(crate) const SEARCH_BY_KEYWORD_SQL: &str = r"
SELECT f.title, group_concat(film_cast.actor_name, ', ') AS actors, f.description
FROM film AS f
LEFT JOIN (
    SELECT DISTINCT fa.film_id, a.first_name || ' ' || a.last_name AS actor_name
    FROM film_actor AS fa
    JOIN actor AS a ON fa.actor_id = a.actor_id
) AS film_cast ON film_cast.film_id = f.film_id
WHERE f.film_id IN (
    SELECT film_id FROM film
    WHERE title LIKE ?1 ESCAPE '\' OR description LIKE ?3 ESCAPE '\'
    UNION
    SELECT fa.film_id
    FROM film_actor AS fa
    JOIN actor AS a ON fa.actor_id = a.actor_id
    WHERE (a.first_name || ' ' || a.last_name) LIKE ?2 ESCAPE '\'
)
GROUP BY f.film_id, f.title, f.description
ORDER BY f.title";

// Analytics
pub(crate) const POPULAR_SEARCH_TYPES_SQL: &str = "\
SELECT search_type, COUNT(*) AS usage_count
FROM queries
GROUP BY search_type
ORDER BY usage_count DESC, search_type
LIMIT 5";

pub(crate) const POPULAR_SEARCH_TERMS_SQL: &str = "\
SELECT search_term, COUNT(*) AS usage_count
FROM queries
GROUP BY search_term
ORDER BY usage_count DESC, search_term
LIMIT 5";

pub(crate) const POPULAR_SEARCHES_ON_DAY_SQL: &str = "\
SELECT search_term, COUNT(*) AS usage_count
FROM queries
WHERE date(timestamp) = ?1
GROUP BY search_term
ORDER BY usage_count DESC, search_term
LIMIT 5";

pub(crate) const POPULAR_SEARCHES_IN_MONTH_SQL: &str = "\
SELECT search_term, COUNT(*) AS usage_count
FROM queries
WHERE strftime('%Y-%m', timestamp) = ?1
GROUP BY search_term
ORDER BY usage_count DESC, search_term
LIMIT 5";

/// `%term%` with `\`, `%` and `_` escaped, for `LIKE ... ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
