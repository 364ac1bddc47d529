//! Program-stage scoped correlated subquery predicates.

use sqlparser::ast::{
    BinaryOperator, Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, Query,
    Select, SelectItem,
};

use crate::config::SqlDialectKind;
use crate::error::Result;
use crate::model::PredicateElement;
use crate::sql_parser::{identifier_name, parse_select, string_literal, subquery_select};

/// Extract one predicate per program-stage scoped correlated subquery.
///
/// A subquery matches when it selects a data column (bare or wrapped in
/// `count(...)`), requires that column to be non-null and filters on a
/// `ps = '<stage-uid>'` equality. Each match is re-emitted as
/// `<column>.ps = '<stage-uid>'`, chained with the logical operator of the
/// enclosing boolean expression. The date-range pattern references the same
/// subquery twice (`<` and `>=` bound), so duplicates are collapsed while
/// preserving first-appearance order.
pub fn program_stage_predicates(
    sql: &str,
    dialect: SqlDialectKind,
) -> Result<Vec<PredicateElement>> {
    let select = parse_select(sql, dialect)?;

    let mut predicates = Vec::new();
    if let Some(where_clause) = &select.selection {
        collect_stage_predicates(where_clause, "and", &mut predicates);
    }

    Ok(predicates)
}

fn collect_stage_predicates(expr: &Expr, enclosing_op: &str, out: &mut Vec<PredicateElement>) {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => {
            collect_stage_predicates(left, "and", out);
            collect_stage_predicates(right, "and", out);
        }
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right,
        } => {
            collect_stage_predicates(left, "or", out);
            collect_stage_predicates(right, "or", out);
        }
        Expr::Nested(inner) => collect_stage_predicates(inner, enclosing_op, out),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq | BinaryOperator::Gt | BinaryOperator::Lt | BinaryOperator::GtEq,
            right,
        } => {
            for side in [left.as_ref(), right.as_ref()] {
                if let Some(subquery) = unwrap_subquery(side) {
                    if let Some(predicate) = stage_predicate(subquery, enclosing_op) {
                        push_unique(out, predicate);
                    }
                }
            }
        }
        _ => {}
    }
}

/// Scalar subquery behind optional parentheses and CAST wrappers.
fn unwrap_subquery(expr: &Expr) -> Option<&Query> {
    match expr {
        Expr::Subquery(query) => Some(query),
        Expr::Nested(inner) => unwrap_subquery(inner),
        Expr::Cast { expr: inner, .. } => unwrap_subquery(inner),
        _ => None,
    }
}

fn stage_predicate(query: &Query, enclosing_op: &str) -> Option<PredicateElement> {
    let select = subquery_select(query)?;
    let column = projected_column(select)?;
    let where_clause = select.selection.as_ref()?;

    if !has_not_null_filter(where_clause, column) {
        return None;
    }

    let stage_uid = find_stage_literal(where_clause)?;

    Some(PredicateElement::new(
        format!("{column}.ps"),
        stage_uid,
        "=",
        enclosing_op,
    ))
}

/// Data column the subquery projects, either bare or as `count(<column>)`.
fn projected_column(select: &Select) -> Option<&str> {
    match select.projection.first()? {
        SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => match expr {
            Expr::Function(func) => count_argument(func),
            other => identifier_name(other),
        },
        _ => None,
    }
}

fn count_argument(func: &Function) -> Option<&str> {
    if !func.name.to_string().eq_ignore_ascii_case("count") {
        return None;
    }
    match &func.args {
        FunctionArguments::List(list) => list.args.iter().find_map(|arg| match arg {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => identifier_name(expr),
            _ => None,
        }),
        _ => None,
    }
}

/// The `'<stage-uid>'` literal of the subquery's `ps = '<stage-uid>'` filter,
/// rendered with its quotes.
fn find_stage_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right,
        } => find_stage_literal(left).or_else(|| find_stage_literal(right)),
        Expr::Nested(inner) => find_stage_literal(inner),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        } if identifier_name(left) == Some("ps") && string_literal(right).is_some() => {
            Some(right.to_string())
        }
        _ => None,
    }
}

fn has_not_null_filter(expr: &Expr, column: &str) -> bool {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And | BinaryOperator::Or,
            right,
        } => has_not_null_filter(left, column) || has_not_null_filter(right, column),
        Expr::Nested(inner) => has_not_null_filter(inner, column),
        Expr::IsNotNull(inner) => identifier_name(inner) == Some(column),
        _ => false,
    }
}

fn push_unique(out: &mut Vec<PredicateElement>, candidate: PredicateElement) {
    let duplicate = out.iter().any(|p| {
        p.left_expression == candidate.left_expression
            && p.right_expression == candidate.right_expression
    });
    if !duplicate {
        out.push(candidate);
    }
}
