pub mod config;
pub mod error;
pub mod executor;
pub mod extract;
pub mod model;
pub mod query;
pub mod resolve;
pub mod sql_parser;

/// Run every extractor over a raw analytics statement and merge their output
/// into one ordered predicate sequence: the `latest` date-range bound, the
/// uid-level filter (when present), then the program-stage predicates.
pub fn extract_predicates(
    sql: &str,
    config: &config::EvsqlConfig,
) -> error::Result<Vec<model::PredicateElement>> {
    let dialect = config.parser.dialect;

    let mut predicates = extract::latest_predicates(sql, dialect)?;
    if let Some(uid_level) = extract::uid_level_predicate(sql, dialect)? {
        predicates.push(uid_level);
    }
    predicates.extend(extract::program_stage_predicates(sql, dialect)?);

    Ok(predicates)
}

pub use crate::config::{EvsqlConfig, SqlDialectKind};
pub use crate::error::EvsqlError;
pub use crate::executor::{DataAccess, Row, SqlQueryExecutor};
pub use crate::model::{InnerJoinElement, PredicateElement, TableElement};
pub use crate::query::{Column, SqlQuery, SqlQueryResult};
pub use crate::resolve::OutputIdScheme;
