//! Column-oriented query and result types crossing the executor boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EvsqlError, Result};

/// Identifier of one output column. Orderable so results iterate in a
/// deterministic (lexicographic) column order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Column(String);

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A fully composed SQL query plus the columns its result must expose.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    statement: String,
    columns: Vec<Column>,
}

impl SqlQuery {
    pub fn new(statement: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            statement: statement.into(),
            columns,
        }
    }

    /// The complete SQL text to run.
    pub fn full_statement(&self) -> &str {
        &self.statement
    }

    /// Declared output columns, in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// A query must carry a non-blank statement.
    pub fn validate(&self) -> Result<()> {
        if self.statement.trim().is_empty() {
            return Err(EvsqlError::InvalidArgument(
                "query statement must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of an executed [`SqlQuery`]: one row-ordered value sequence per
/// declared column. Every declared column is present even when the query
/// returned zero rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlQueryResult {
    values: BTreeMap<Column, Vec<Value>>,
}

impl SqlQueryResult {
    /// Result skeleton with an empty value sequence for each column.
    pub fn with_columns(columns: &[Column]) -> Self {
        let values = columns
            .iter()
            .map(|column| (column.clone(), Vec::new()))
            .collect();
        Self { values }
    }

    /// Columns in lexicographic order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.values.keys()
    }

    /// Row-ordered values of one column.
    pub fn values(&self, column: &Column) -> Option<&[Value]> {
        self.values.get(column).map(Vec::as_slice)
    }

    pub(crate) fn push(&mut self, column: &Column, value: Value) {
        if let Some(cells) = self.values.get_mut(column) {
            cells.push(value);
        }
    }

    /// Number of rows, taken from the longest column.
    pub fn row_count(&self) -> usize {
        self.values.values().map(Vec::len).max().unwrap_or(0)
    }
}
