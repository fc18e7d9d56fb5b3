#![allow(dead_code)]

use std::path::{Path, PathBuf};

use reel_core::SessionConfig;
use rusqlite::Connection;
use tempfile::TempDir;

const CATALOG_SCHEMA: &str = include_str!("../../../../assets/catalog.sql");
const SEARCH_LOG_SCHEMA: &str = include_str!("../../../../assets/searchlog.sql");

const CATALOG_SEED: &str = "
INSERT INTO category (category_id, name) VALUES
    (1, 'Action'), (2, 'Comedy'), (3, 'Documentary');

INSERT INTO film (film_id, title, description, release_year) VALUES
    (1, 'ACADEMY DINOSAUR', 'A Epic Drama of a Feminist And a Mad Scientist who must Battle a Dentist in The Canadian Rockies', 2006),
    (2, 'ARK RIDGEMONT', 'A Beautiful Yarn of a Pioneer And a Monkey who must Pursue a Explorer in The Sahara Desert', 2006),
    (3, 'WATERFRONT DELIVERANCE', 'A Unbelieveable Documentary of a Dentist And a Technical Writer who must Build a Womanizer in Nigeria', 2006),
    (4, 'CHAMBER ITALIAN', 'A Fateful Reflection of a Moose And a Husband who must Overcome a Monkey in Nigeria', 2006),
    (5, 'DRIFTER COMMANDMENTS', 'A Epic Reflection of a Womanizer And a Squirrel who must Discover a Husband in A Jet Boat', 2005),
    (6, 'SILENT SHORE', 'A Boring Tale of a Lighthouse Keeper who must Chase a Wave across the Water', 2010);

INSERT INTO film_category (film_id, category_id) VALUES
    (1, 3), (2, 1), (3, 3), (4, 2), (5, 1), (6, 2);

INSERT INTO actor (actor_id, first_name, last_name) VALUES
    (1, 'PENELOPE', 'GUINESS'),
    (2, 'NICK', 'WAHLBERG'),
    (3, 'ED', 'WATERS'),
    (4, 'JENNIFER', 'DAVIS'),
    (5, 'ED', 'WATERS');

INSERT INTO film_actor (actor_id, film_id) VALUES
    (1, 1), (2, 1),
    (3, 2), (4, 2),
    (1, 3), (3, 3), (5, 3),
    (2, 4),
    (4, 5);
";

/// Temporary catalog and search log databases with the reference schemas.
pub struct Fixture {
    pub dir: TempDir,
    pub catalog_path: PathBuf,
    pub search_log_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_path = dir.path().join("sakila.db");
        let search_log_path = dir.path().join("queries.db");

        let catalog = Connection::open(&catalog_path).expect("Failed to create catalog");
        catalog
            .execute_batch(CATALOG_SCHEMA)
            .and_then(|()| catalog.execute_batch(CATALOG_SEED))
            .expect("Failed to seed catalog");

        let search_log = Connection::open(&search_log_path).expect("Failed to create search log");
        search_log
            .execute_batch(SEARCH_LOG_SCHEMA)
            .expect("Failed to create search log schema");

        Self {
            dir,
            catalog_path,
            search_log_path,
        }
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig::local(path_str(&self.catalog_path), path_str(&self.search_log_path))
    }

    /// A second, independent connection to the catalog file.
    pub fn catalog_connection(&self) -> Connection {
        Connection::open(&self.catalog_path).expect("Failed to open catalog")
    }

    /// A second, independent connection to the search log file.
    pub fn search_log_connection(&self) -> Connection {
        Connection::open(&self.search_log_path).expect("Failed to open search log")
    }

    pub fn search_log_count(&self) -> i64 {
        self.search_log_connection()
            .query_row("SELECT COUNT(*) FROM queries", [], |row| row.get(0))
            .expect("Failed to count search log")
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
