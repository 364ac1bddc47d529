//! Date-range bounds rewritten against the `latest` partition column.

use chrono::NaiveDate;
use sqlparser::ast::{BinaryOperator, DataType, Expr};

use crate::config::SqlDialectKind;
use crate::error::{EvsqlError, Result};
use crate::extract::inner_join::inner_join_elements;
use crate::model::PredicateElement;
use crate::sql_parser::{parse_select, string_literal};

/// Extract the statement's date-range bounds and re-emit them as a single
/// `between` predicate on `<alias>.latest`.
///
/// The bounds are taken from the pair of `CAST(... AS date) < CAST('<date>'
/// AS date)` and `... >= CAST('<date>' AS date)` comparisons in the WHERE
/// clause. The exclusive upper bound is shifted back one day to make it
/// inclusive. A malformed date literal leaves its bound empty rather than
/// failing the extraction; statements without a joined table fail with a
/// `Structure` error.
pub fn latest_predicates(sql: &str, dialect: SqlDialectKind) -> Result<Vec<PredicateElement>> {
    let join = inner_join_elements(sql, dialect)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            EvsqlError::Structure("no joined table to bind the latest column to".to_string())
        })?;

    let select = parse_select(sql, dialect)?;

    let mut bounds = Bounds::default();
    if let Some(where_clause) = &select.selection {
        collect_bounds(where_clause, &mut bounds);
    }

    Ok(vec![PredicateElement::new(
        format!("{}.latest ", join.table_element.alias),
        format!("{} and {}", bounds.lower, bounds.upper),
        "between",
        "and",
    )])
}

#[derive(Default)]
struct Bounds {
    lower: String,
    upper: String,
}

fn collect_bounds(expr: &Expr, bounds: &mut Bounds) {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right,
        } => {
            collect_bounds(left, bounds);
            collect_bounds(right, bounds);
        }
        Expr::Nested(inner) => collect_bounds(inner, bounds),
        Expr::BinaryOp {
            op: BinaryOperator::Lt,
            right,
            ..
        } if bounds.upper.is_empty() => {
            // Exclusive upper bound: step back one day, re-quote. Literals
            // that do not parse as dates are ignored.
            if let Some(date) = date_cast_literal(right) {
                if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                    if let Some(inclusive) = parsed.pred_opt() {
                        bounds.upper = format!("'{inclusive}'");
                    }
                }
            }
        }
        Expr::BinaryOp {
            op: BinaryOperator::GtEq,
            right,
            ..
        } if bounds.lower.is_empty() => {
            if let Some(date) = date_cast_literal(right) {
                bounds.lower = format!("'{date}'");
            }
        }
        _ => {}
    }
}

/// String literal inside a `CAST('<literal>' AS date)` expression.
fn date_cast_literal(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Cast {
            expr: operand,
            data_type: DataType::Date,
            ..
        } => string_literal(operand),
        Expr::Nested(inner) => date_cast_literal(inner),
        _ => None,
    }
}
