//! Store settings read from the environment.
//!
//! Each store is described by four values (host, user, password, database).
//! They are read once at startup; nothing here validates them beyond
//! collecting what is present, so a missing value surfaces as a failed
//! connection attempt for that store.

use std::fmt;

/// Name of the read-mostly movie catalog store.
pub const CATALOG_STORE: &str = "catalog";
/// Name of the write-mostly search log store.
pub const SEARCH_LOG_STORE: &str = "searchlog";

/// Environment variable prefixes, per store.
const CATALOG_ENV_PREFIX: &str = "DB";
const SEARCH_LOG_ENV_PREFIX: &str = "DBQ";

/// Connection settings for a single store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub name: String,
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Prefix of the environment variables the values came from, used to
    /// name the offending variable in errors.
    pub env_prefix: String,
}

impl StoreConfig {
    /// Creates an empty configuration for `name`.
    pub fn new(name: impl Into<String>, env_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env_prefix: env_prefix.into(),
            ..Default::default()
        }
    }

    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Name of the environment variable holding `field` for this store,
    /// e.g. `DBQ_NAME`.
    pub fn env_key(&self, field: &str) -> String {
        format!("{}_{}", self.env_prefix, field)
    }

    fn from_lookup<F>(name: &str, env_prefix: &str, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |field: &str| {
            lookup(&format!("{env_prefix}_{field}")).filter(|value| !value.trim().is_empty())
        };

        Self {
            name: name.to_string(),
            host: read("HOST"),
            user: read("USER"),
            password: read("PASSWORD"),
            database: read("NAME"),
            env_prefix: env_prefix.to_string(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .finish()
    }
}

/// The fixed set of stores a session connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub stores: Vec<StoreConfig>,
}

impl SessionConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            stores: vec![
                StoreConfig::from_lookup(CATALOG_STORE, CATALOG_ENV_PREFIX, &lookup),
                StoreConfig::from_lookup(SEARCH_LOG_STORE, SEARCH_LOG_ENV_PREFIX, &lookup),
            ],
        }
    }

    /// Configuration with both stores pointing at local database files.
    pub fn local(catalog: impl Into<String>, search_log: impl Into<String>) -> Self {
        Self {
            stores: vec![
                StoreConfig::new(CATALOG_STORE, CATALOG_ENV_PREFIX)
                    .with_host("localhost")
                    .with_database(catalog),
                StoreConfig::new(SEARCH_LOG_STORE, SEARCH_LOG_ENV_PREFIX)
                    .with_host("localhost")
                    .with_database(search_log),
            ],
        }
    }
}
