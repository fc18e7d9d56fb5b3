//! Statement execution against named stores.

use log::debug;
use rusqlite::params_from_iter;

use super::{
    manager::ConnectionManager,
    statement::Statement,
    value::{ResultSet, Row, Value},
};
use crate::error::{DatabaseResultExt, Result, StoreError};

/// Executes statements on the stores of a [`ConnectionManager`].
///
/// Every call resolves its store by name first; an unknown name fails with
/// `StoreError::UnknownStore` before anything is sent to a driver. Driver
/// failures come back as `StoreError::QueryExecution` carrying the
/// statement's operation name and the store.
#[derive(Debug, Clone, Copy)]
pub struct QueryExecutor<'a> {
    manager: &'a ConnectionManager,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(manager: &'a ConnectionManager) -> Self {
        Self { manager }
    }

    /// Runs a read-only statement and returns every row.
    ///
    /// # Errors
    ///
    /// `StoreError::QueryExecution` if the statement is malformed, would
    /// modify the store, or the store reports a fault while running it.
    pub fn execute_read(&self, store: &str, statement: &Statement) -> Result<ResultSet> {
        let connection = self.manager.get_connection(store)?;
        let operation = statement.operation();

        let mut stmt = connection
            .prepare_cached(statement.text())
            .query_context(operation, store)?;

        if !stmt.readonly() {
            return Err(
                StoreError::query(operation, store).with_source(rusqlite::Error::InvalidQuery),
            );
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let rows = stmt
            .query_map(params_from_iter(statement.params()), |row| {
                (0..column_count)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Row>>()
            })
            .query_context(operation, store)?
            .collect::<rusqlite::Result<Vec<Row>>>()
            .query_context(operation, store)?;

        debug!("{operation} on '{store}' returned {} row(s)", rows.len());
        Ok(ResultSet::new(columns, rows))
    }

    /// Runs a statement that modifies the store. The change is committed when
    /// this returns.
    ///
    /// # Errors
    ///
    /// `StoreError::QueryExecution` on the same conditions as reads, or if
    /// the statement returns rows.
    pub fn execute_write(&self, store: &str, statement: &Statement) -> Result<()> {
        let connection = self.manager.get_connection(store)?;
        let operation = statement.operation();

        let mut stmt = connection
            .prepare_cached(statement.text())
            .query_context(operation, store)?;

        let changed = stmt
            .execute(params_from_iter(statement.params()))
            .query_context(operation, store)?;

        debug!("{operation} on '{store}' changed {changed} row(s)");
        Ok(())
    }
}
