//! Store connections and statement execution.
//!
//! This module is the data-access core of Reel:
//!
//! - **Connection Management** (`manager.rs`): one connection per configured
//!   store, opened together at startup and closed together at shutdown
//! - **Query Execution** (`executor.rs`): parameterized reads and auto-commit
//!   writes against a store resolved by name
//! - **Statements and Values** (`statement.rs`, `value.rs`): bind parameters
//!   going in, typed rows coming out
//!
//! Every operation returns [`crate::error::Result`]; nothing here prints or
//! decides how a failure is presented. That is the job of
//! [`crate::classifier`].

pub mod executor;
pub mod manager;
pub mod statement;
pub mod value;

pub use executor::QueryExecutor;
pub use manager::{ConnectionManager, SessionState};
pub use statement::{Param, Statement};
pub use value::{ResultSet, Row, Value};
