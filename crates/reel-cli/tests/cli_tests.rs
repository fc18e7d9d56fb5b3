use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use tempfile::TempDir;

const CATALOG_SCHEMA: &str = include_str!("../../../assets/catalog.sql");
const SEARCH_LOG_SCHEMA: &str = include_str!("../../../assets/searchlog.sql");

const FATAL_MESSAGE: &str =
    "Sorry! Failed to connect to one or more databases. Please, try next time";
const RETRY_MESSAGE: &str =
    "An error occurred while processing your request. Please try another search.";
const GOODBYE: &str = "Thank you for using the Movie Database. Goodbye!";

/// Temporary stores plus the operator log location.
struct TestEnvironment {
    dir: TempDir,
    catalog: PathBuf,
    search_log: PathBuf,
}

impl TestEnvironment {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let catalog = dir.path().join("sakila.db");
        let search_log = dir.path().join("queries.db");

        let conn = Connection::open(&catalog).expect("Failed to create catalog");
        conn.execute_batch(CATALOG_SCHEMA)
            .expect("Failed to create catalog schema");
        conn.execute_batch(
            "INSERT INTO category (category_id, name) VALUES (1, 'Action'), (2, 'Comedy');
             INSERT INTO film (film_id, title, description, release_year) VALUES
                 (1, 'ARK RIDGEMONT', 'A Beautiful Yarn of a Pioneer', 2006),
                 (2, 'CHAMBER ITALIAN', 'A Fateful Reflection of a Moose', 2006);
             INSERT INTO film_category (film_id, category_id) VALUES (1, 1), (2, 2);
             INSERT INTO actor (actor_id, first_name, last_name) VALUES (1, 'NICK', 'WAHLBERG');
             INSERT INTO film_actor (actor_id, film_id) VALUES (1, 2);",
        )
        .expect("Failed to seed catalog");

        Connection::open(&search_log)
            .and_then(|conn| conn.execute_batch(SEARCH_LOG_SCHEMA))
            .expect("Failed to create search log");

        Self {
            dir,
            catalog,
            search_log,
        }
    }

    fn log_file(&self) -> PathBuf {
        self.dir.path().join("reel.log")
    }

    fn command(&self) -> Command {
        self.command_with(&self.catalog, &self.search_log)
    }

    fn command_with(&self, catalog: &Path, search_log: &Path) -> Command {
        let mut cmd = Command::cargo_bin("reel").expect("Failed to find reel binary");
        cmd.env_clear()
            .env("DB_HOST", "localhost")
            .env("DB_USER", "reel")
            .env("DB_NAME", catalog)
            .env("DBQ_HOST", "localhost")
            .env("DBQ_NAME", search_log)
            .env("REEL_LOG_FILE", self.log_file());
        cmd
    }

    fn operator_log(&self) -> String {
        std::fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    fn logged_searches(&self) -> Vec<(String, String)> {
        let conn = Connection::open(&self.search_log).expect("Failed to open search log");
        let mut stmt = conn
            .prepare("SELECT search_type, search_term FROM queries ORDER BY id")
            .expect("Failed to prepare");
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .expect("Failed to query");
        rows.collect::<Result<_, _>>().expect("Failed to read rows")
    }
}

#[test]
fn test_cli_exit_from_main_menu() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Menu:"))
        .stdout(predicate::str::contains(GOODBYE));

    assert!(env.logged_searches().is_empty());
}

#[test]
fn test_cli_end_of_input_exits_cleanly() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(GOODBYE));
}

#[test]
fn test_cli_missing_catalog_is_fatal() {
    let env = TestEnvironment::new();
    let missing = env.dir.path().join("missing.db");

    env.command_with(&missing, &env.search_log)
        .write_stdin("3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(FATAL_MESSAGE))
        .stdout(predicate::str::contains("Main Menu:").not());

    assert!(!missing.exists());
    assert!(env
        .operator_log()
        .contains("ERROR - Database connection error in initialize"));
}

#[test]
fn test_cli_missing_search_log_is_fatal() {
    let env = TestEnvironment::new();
    let missing = env.dir.path().join("missing.db");

    env.command_with(&env.catalog, &missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains(FATAL_MESSAGE));
}

#[test]
fn test_cli_remote_host_is_fatal() {
    let env = TestEnvironment::new();

    env.command()
        .env("DBQ_HOST", "db.example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains(FATAL_MESSAGE));

    assert!(env.operator_log().contains("DBQ_HOST"));
}

#[test]
fn test_cli_title_search_is_logged() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("1\n3\nark\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing the first 1 of 1 results"))
        .stdout(predicate::str::contains("ARK RIDGEMONT | A Beautiful Yarn of a Pioneer"));

    assert_eq!(
        env.logged_searches(),
        vec![("title_search".to_string(), "ark".to_string())]
    );
}

#[test]
fn test_cli_invalid_input_reprompts() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("abc\n4\n1\n3\n\n  \nark\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input. Please enter a number."))
        .stdout(predicate::str::contains("Please choose a valid option"))
        .stdout(predicate::str::contains("Input cannot be empty. Please try again."))
        .stdout(predicate::str::contains("ARK RIDGEMONT"));
}

#[test]
fn test_cli_non_utf8_line_reprompts() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin(b"1\n3\ncaf\xe9\nark\n7\n3\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Input could not be read as text. Please try again.",
        ))
        .stdout(predicate::str::contains("ARK RIDGEMONT"))
        .stdout(predicate::str::contains(GOODBYE));

    assert_eq!(
        env.logged_searches(),
        vec![("title_search".to_string(), "ark".to_string())]
    );
}

#[test]
fn test_cli_reads_store_settings_from_dotenv() {
    let env = TestEnvironment::new();
    std::fs::write(
        env.dir.path().join(".env"),
        format!(
            "DB_HOST=localhost\nDB_NAME=\"{}\"\nDBQ_HOST=localhost\nDBQ_NAME=\"{}\"\n",
            env.catalog.display(),
            env.search_log.display()
        ),
    )
    .expect("Failed to write .env");

    Command::cargo_bin("reel")
        .expect("Failed to find reel binary")
        .env_clear()
        .env("REEL_LOG_FILE", env.log_file())
        .current_dir(env.dir.path())
        .write_stdin("1\n3\nark\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ARK RIDGEMONT"))
        .stdout(predicate::str::contains(GOODBYE));

    assert_eq!(
        env.logged_searches(),
        vec![("title_search".to_string(), "ark".to_string())]
    );
}

#[test]
fn test_cli_environment_overrides_dotenv() {
    let env = TestEnvironment::new();
    let missing = env.dir.path().join("missing.db");
    std::fs::write(
        env.dir.path().join(".env"),
        format!("DB_NAME=\"{}\"\n", missing.display()),
    )
    .expect("Failed to write .env");

    env.command()
        .current_dir(env.dir.path())
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(GOODBYE));
}

#[test]
fn test_cli_category_and_year_search() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("1\n5\ncomedy\n2006\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Category ID | Name"))
        .stdout(predicate::str::contains("CHAMBER ITALIAN | 2006 | Comedy"));

    assert_eq!(
        env.logged_searches(),
        vec![("category_year_search".to_string(), "comedy, 2006".to_string())]
    );
}

#[test]
fn test_cli_broken_catalog_table_recovers() {
    let env = TestEnvironment::new();
    Connection::open(&env.catalog)
        .and_then(|conn| conn.execute_batch("PRAGMA foreign_keys = OFF; DROP TABLE actor;"))
        .expect("Failed to drop table");

    env.command()
        .write_stdin("1\n2\nnick\n3\nark\n7\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(RETRY_MESSAGE))
        .stdout(predicate::str::contains("ARK RIDGEMONT"))
        .stdout(predicate::str::contains(GOODBYE));

    assert!(env
        .operator_log()
        .contains("ERROR - Query execution error in actor_search"));
    assert_eq!(
        env.logged_searches(),
        vec![("title_search".to_string(), "ark".to_string())]
    );
}

#[test]
fn test_cli_analytics_after_searches() {
    let env = TestEnvironment::new();

    env.command()
        .write_stdin("1\n3\nark\n6\nnick\n7\n2\n1\n2\n3\n4\n5\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Type | Usage Count"))
        .stdout(predicate::str::contains("title_search | 1"))
        .stdout(predicate::str::contains("keyword_search | 1"))
        .stdout(predicate::str::contains("nick | 1"));
}

#[test]
fn test_cli_help() {
    Command::cargo_bin("reel")
        .expect("Failed to find reel binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("DBQ_NAME"));
}
