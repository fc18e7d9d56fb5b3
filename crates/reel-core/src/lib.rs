//! Core library for the Reel movie catalog search application.
//!
//! This crate owns everything between the interactive shell and the two
//! SQLite stores Reel talks to: the read-mostly movie catalog and the
//! write-mostly search log.
//!
//! # Layers
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Catalog     │    │ QueryExecutor   │    │ConnectionManager│
//! │ (named searches,│───▶│ (parameterized  │───▶│ (one connection │
//! │  log, analytics)│    │  read / write)  │    │   per store)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every layer returns [`Result`]. The [`ErrorClassifier`] turns a failure
//! into a recovery decision at the shell boundary and records it in the
//! [`OperatorLog`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use reel_core::{Session, SessionConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::open(&SessionConfig::from_env())?;
//!
//! let films = session.catalog().movies_by_title("ark")?;
//! for row in &films.rows {
//!     println!("{}", row[0]);
//! }
//!
//! session.close();
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use catalog::{Catalog, SearchType, TOP_N};
pub use classifier::{ErrorClass, ErrorClassifier, Outcome, Recovery};
pub use config::{SessionConfig, StoreConfig, CATALOG_STORE, SEARCH_LOG_STORE};
pub use error::{Result, StoreError};
pub use logging::{LogBuffer, OperatorLog};
pub use session::Session;
pub use store::{
    ConnectionManager, Param, QueryExecutor, ResultSet, Row, SessionState, Statement, Value,
};
