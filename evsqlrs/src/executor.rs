//! Thin, synchronous, single-attempt query execution.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::QueryConfig;
use crate::error::Result;
use crate::query::{Column, SqlQuery, SqlQueryResult};

/// One returned row, keyed by column.
pub type Row = BTreeMap<Column, Value>;

/// External data-access boundary: run a raw SQL statement, get rows back.
///
/// Implementations own all connectivity concerns. The executor itself does
/// no retries, caching, pooling or cancellation; callers layer those on.
pub trait DataAccess: Send + Sync {
    fn fetch_rows(&self, statement: &str) -> Result<Vec<Row>>;
}

/// Executes a validated [`SqlQuery`] against a [`DataAccess`] boundary and
/// returns a column-ordered [`SqlQueryResult`].
pub struct SqlQueryExecutor {
    data_access: Arc<dyn DataAccess>,
    config: QueryConfig,
}

impl SqlQueryExecutor {
    pub fn new(data_access: Arc<dyn DataAccess>) -> Self {
        Self::with_config(data_access, QueryConfig::default())
    }

    pub fn with_config(data_access: Arc<dyn DataAccess>, config: QueryConfig) -> Self {
        Self {
            data_access,
            config,
        }
    }

    /// Run the query and collect its rows into per-column value sequences.
    ///
    /// Every declared column is seeded with an empty sequence up front, so a
    /// zero-row execution still yields every column. Cells missing from a
    /// returned row become `null` to keep the sequences row-aligned.
    pub fn execute(&self, query: &SqlQuery) -> Result<SqlQueryResult> {
        query.validate()?;

        let statement = query.full_statement();
        tracing::debug!(columns = query.columns().len(), "executing analytics query");
        tracing::trace!(sql = %statement, "full statement");

        let mut result = SqlQueryResult::with_columns(query.columns());

        let rows = self.data_access.fetch_rows(statement)?;
        for (index, row) in rows.into_iter().enumerate() {
            if self.config.max_row_limit > 0 && index as u64 >= self.config.max_row_limit {
                tracing::debug!(
                    max_row_limit = self.config.max_row_limit,
                    "row limit reached, truncating result"
                );
                break;
            }
            for column in query.columns() {
                let cell = row.get(column).cloned().unwrap_or(Value::Null);
                result.push(column, cell);
            }
        }

        Ok(result)
    }
}
