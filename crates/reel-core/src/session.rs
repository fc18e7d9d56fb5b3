//! Scoped ownership of the store connections for one interactive session.

use log::info;

use crate::{
    catalog::Catalog,
    config::SessionConfig,
    error::Result,
    store::{ConnectionManager, QueryExecutor},
};

/// Owns the connections from a successful initialization until shutdown.
///
/// Connections are released exactly once, either by [`Session::close`] or,
/// on any other exit path, when the session is dropped.
#[derive(Debug)]
pub struct Session {
    manager: ConnectionManager,
}

impl Session {
    /// Connects to every configured store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FatalConnection` if any store cannot be
    /// established.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let manager = ConnectionManager::initialize(config)?;
        info!("Session opened");
        Ok(Self { manager })
    }

    pub fn executor(&self) -> QueryExecutor<'_> {
        QueryExecutor::new(&self.manager)
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self.executor())
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.manager
    }

    /// Closes every store connection.
    pub fn close(mut self) {
        self.manager.close_all();
        info!("Session closed");
    }
}
