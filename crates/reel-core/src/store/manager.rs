//! Connection registry: one live connection per configured store.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rusqlite::{Connection, OpenFlags};

use crate::{
    config::{SessionConfig, StoreConfig},
    error::{DatabaseResultExt, Result, StoreError},
};

/// Hosts accepted for an embedded store.
const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Run once per store right after opening, so a file that is not a database
/// fails during startup instead of on first use.
const LIVENESS_PROBE_SQL: &str = "SELECT count(*) FROM sqlite_master";

/// Lifecycle of a [`ConnectionManager`].
///
/// A manager only exists once every store connected, so it starts out
/// `Ready`; a failed initialization never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// All stores are connected and serve reads and writes
    Ready,
    /// Connections have been released
    Closed,
}

/// A single store's connection and its liveness.
#[derive(Debug)]
pub(crate) struct StoreHandle {
    name: String,
    connection: Option<Connection>,
}

impl StoreHandle {
    fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Closes the connection. Closing an already closed handle is a no-op.
    fn close(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        match connection.close() {
            Ok(()) => debug!("Closed connection to store '{}'", self.name),
            // The connection is handed back on failure; dropping it releases
            // the handle without reporting.
            Err((_connection, e)) => {
                warn!("Error while closing store '{}': {e}", self.name);
            }
        }
    }
}

/// Owns exactly one connection per configured store.
///
/// The key set is fixed by [`ConnectionManager::initialize`]; stores are
/// never added or removed afterwards. Dropping the manager closes every
/// connection.
#[derive(Debug)]
pub struct ConnectionManager {
    stores: BTreeMap<String, StoreHandle>,
    state: SessionState,
}

impl ConnectionManager {
    /// Connects to every store in `config`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FatalConnection` naming the first store that
    /// could not be established. Stores opened before it are closed again, so
    /// no partially connected manager is ever observable.
    pub fn initialize(config: &SessionConfig) -> Result<Self> {
        let mut manager = Self {
            stores: BTreeMap::new(),
            state: SessionState::Ready,
        };

        for store in &config.stores {
            if manager.stores.contains_key(&store.name) {
                let err = StoreError::invalid_config(&store.name, "name")
                    .with_reason("store configured more than once");
                return Err(StoreError::fatal(&store.name, err));
            }

            // `manager` drops on the early return, closing what is open.
            let connection =
                open_store(store).map_err(|e| StoreError::fatal(&store.name, e))?;

            manager.stores.insert(
                store.name.clone(),
                StoreHandle {
                    name: store.name.clone(),
                    connection: Some(connection),
                },
            );
        }

        info!(
            "Connected to {} store(s): {}",
            manager.stores.len(),
            manager.store_names().collect::<Vec<_>>().join(", ")
        );
        Ok(manager)
    }

    /// Returns the connection of the named store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownStore` if `name` was never configured and
    /// `StoreError::SessionClosed` once [`close_all`](Self::close_all) ran.
    pub fn get_connection(&self, name: &str) -> Result<&Connection> {
        let handle = self.stores.get(name).ok_or_else(|| StoreError::UnknownStore {
            name: name.to_string(),
        })?;

        handle
            .connection
            .as_ref()
            .ok_or_else(|| StoreError::SessionClosed {
                store: name.to_string(),
            })
    }

    /// Closes every open connection. Safe to call repeatedly.
    pub fn close_all(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        for handle in self.stores.values_mut() {
            handle.close();
        }
        self.state = SessionState::Closed;
        info!("All store connections closed");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Names of the configured stores, in sorted order.
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Number of stores whose connection is still open.
    pub fn open_count(&self) -> usize {
        self.stores.values().filter(|h| h.is_open()).count()
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.close_all();
    }
}

/// Validates the settings of one store and opens it.
fn open_store(store: &StoreConfig) -> Result<Connection> {
    let host = store.host.as_deref().ok_or_else(|| {
        StoreError::invalid_config(&store.name, store.env_key("HOST")).with_reason("not set")
    })?;
    if !LOCAL_HOSTS.contains(&host) {
        return Err(
            StoreError::invalid_config(&store.name, store.env_key("HOST")).with_reason(format!(
                "host '{host}' is not reachable; only local stores are supported"
            )),
        );
    }

    let path = store.database.as_deref().ok_or_else(|| {
        StoreError::invalid_config(&store.name, store.env_key("NAME")).with_reason("not set")
    })?;

    debug!(
        "Opening store '{}' at {path} as {}",
        store.name,
        store.user.as_deref().unwrap_or("<no user>")
    );

    // No CREATE flag: a missing database file is an unreachable store.
    let connection = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .open_context(&store.name, "Failed to open database connection")?;

    connection
        .query_row(LIVENESS_PROBE_SQL, [], |row| row.get::<_, i64>(0))
        .open_context(&store.name, "Store did not answer the liveness probe")?;

    Ok(connection)
}
