//! Parameterized statements.

use rusqlite::types::{ToSql, ToSqlOutput};

/// A positional bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Integer(i64),
    Text(String),
}

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Param::Integer(i) => i.to_sql(),
            Param::Text(s) => s.to_sql(),
        }
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Integer(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Integer(i64::from(value))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

/// Query text plus its ordered bind parameters.
///
/// Values only ever travel through `params`; the text is a `'static`
/// constant so caller input cannot end up inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    operation: &'static str,
    text: &'static str,
    params: Vec<Param>,
}

impl Statement {
    /// Creates a statement with no parameters. `operation` names it in
    /// diagnostics.
    pub fn new(operation: &'static str, text: &'static str) -> Self {
        Self {
            operation,
            text,
            params: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}
