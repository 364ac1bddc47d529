//! Equality filters on synthetic `uidlevelN` columns.

use sqlparser::ast::{BinaryOperator, Expr};

use crate::config::SqlDialectKind;
use crate::error::Result;
use crate::model::PredicateElement;
use crate::sql_parser::parse_select;

/// Alias the analytics query builder binds the enrollment table to.
const ANALYTICS_ALIAS: &str = "ax.";

/// Extract the first equality filter on a `uidlevelN` column, rewritten
/// against the analytics table alias. `None` when the statement carries no
/// such filter.
///
/// Only the first match (depth-first, left to right) is captured; uid-level
/// filters appear at most once per hierarchy depth in generated statements.
pub fn uid_level_predicate(
    sql: &str,
    dialect: SqlDialectKind,
) -> Result<Option<PredicateElement>> {
    let select = parse_select(sql, dialect)?;

    Ok(select.selection.as_ref().and_then(find_uid_level))
}

fn find_uid_level(expr: &Expr) -> Option<PredicateElement> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right,
        } => find_uid_level(left).or_else(|| find_uid_level(right)),
        Expr::Nested(inner) => find_uid_level(inner),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        } if left.to_string().contains("uidlevel") => Some(PredicateElement::new(
            format!("{ANALYTICS_ALIAS}{left}"),
            right.to_string(),
            "=",
            "",
        )),
        _ => None,
    }
}
