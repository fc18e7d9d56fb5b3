//! Typed scalar values and result sets returned by reads.

use std::fmt;

use rusqlite::types::ValueRef;

/// A single scalar read from a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns the integer payload, if any.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Blob(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

/// One row of a result set.
pub type Row = Vec<Value>;

/// Rows returned by a read, with the column names of the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Creates a new result set from column names and rows
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row`, `column`, if both are in range.
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// All values of the first column.
    pub fn first_column(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(|row| row.first())
    }

    /// Splits the rows at `limit`, returning the head and the remainder.
    pub fn split_at(&self, limit: usize) -> (&[Row], &[Row]) {
        self.rows.split_at(limit.min(self.rows.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_ref() {
        assert_eq!(Value::from(ValueRef::Null), Value::Null);
        assert_eq!(Value::from(ValueRef::Integer(7)), Value::Integer(7));
        assert_eq!(
            Value::from(ValueRef::Text(b"ACADEMY DINOSAUR")),
            Value::Text("ACADEMY DINOSAUR".to_string())
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(2006).to_string(), "2006");
        assert_eq!(Value::Text("ark".into()).to_string(), "ark");
        assert_eq!(Value::Null.to_string(), "None");
        assert_eq!(Value::Blob(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_split_at_clamps_limit() {
        let set = ResultSet::new(
            vec!["n".into()],
            (0..3).map(|i| vec![Value::Integer(i)]).collect(),
        );
        let (head, rest) = set.split_at(10);
        assert_eq!(head.len(), 3);
        assert!(rest.is_empty());

        let (head, rest) = set.split_at(2);
        assert_eq!(head.len(), 2);
        assert_eq!(rest.len(), 1);
    }
}
