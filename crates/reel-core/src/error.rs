//! Error types for store connections and query execution.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure the connection and query layer can report.
///
/// Driver errors never leave this crate unwrapped: each variant that carries
/// a `rusqlite::Error` names the store (and, for queries, the operation) it
/// came from so the operator log keeps the full cause chain.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A configured store could not be established at startup
    #[error("Failed to connect to store '{store}'")]
    FatalConnection {
        store: String,
        #[source]
        source: Box<StoreError>,
    },
    /// A store setting is missing or unusable
    #[error("Invalid setting '{key}' for store '{store}': {reason}")]
    InvalidConfig {
        store: String,
        key: String,
        reason: String,
    },
    /// The driver refused to open or probe a store
    #[error("Database error on store '{store}': {message}")]
    Database {
        store: String,
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A store name that was never part of the session configuration
    #[error("No connection to store: {name}")]
    UnknownStore { name: String },
    /// The session was closed before the store was used
    #[error("Connection to store '{store}' is closed")]
    SessionClosed { store: String },
    /// A read or write failed once the session was up
    #[error("Query '{operation}' failed on store '{store}'")]
    QueryExecution {
        operation: String,
        store: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The operator log could not be opened
    #[error("Cannot open operator log at '{path}'")]
    OperatorLog {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Builder for query execution errors.
pub struct QueryErrorBuilder {
    operation: String,
    store: String,
}

impl QueryErrorBuilder {
    /// Create a new builder for the named operation against a store.
    pub fn new(operation: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            store: store.into(),
        }
    }

    /// Build the error with the given driver error as its source.
    pub fn with_source(self, source: rusqlite::Error) -> StoreError {
        StoreError::QueryExecution {
            operation: self.operation,
            store: self.store,
            source,
        }
    }
}

/// Builder for configuration errors.
pub struct InvalidConfigBuilder {
    store: String,
    key: String,
}

impl InvalidConfigBuilder {
    /// Create a new builder for a setting of a store.
    pub fn new(store: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            key: key.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> StoreError {
        StoreError::InvalidConfig {
            store: self.store,
            key: self.key,
            reason: reason.into(),
        }
    }
}

impl StoreError {
    /// Creates a builder for query execution errors.
    pub fn query(operation: impl Into<String>, store: impl Into<String>) -> QueryErrorBuilder {
        QueryErrorBuilder::new(operation, store)
    }

    /// Creates a builder for configuration errors.
    pub fn invalid_config(
        store: impl Into<String>,
        key: impl Into<String>,
    ) -> InvalidConfigBuilder {
        InvalidConfigBuilder::new(store, key)
    }

    /// Wraps a startup failure of `store` as fatal.
    pub fn fatal(store: impl Into<String>, cause: StoreError) -> Self {
        Self::FatalConnection {
            store: store.into(),
            source: Box::new(cause),
        }
    }

    /// Renders the error followed by every source in its chain, separated by
    /// `": "`.
    pub fn chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }
}

/// Specialized extension trait for driver Results on an open store.
pub trait DatabaseResultExt<T> {
    /// Map driver errors into a query failure of `operation` on `store`.
    fn query_context(self, operation: &str, store: &str) -> Result<T>;

    /// Map driver errors raised while opening or probing `store`.
    fn open_context(self, store: &str, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn query_context(self, operation: &str, store: &str) -> Result<T> {
        self.map_err(|e| StoreError::query(operation, store).with_source(e))
    }

    fn open_context(self, store: &str, message: &str) -> Result<T> {
        self.map_err(|source| StoreError::Database {
            store: store.to_string(),
            message: message.to_string(),
            source,
        })
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
