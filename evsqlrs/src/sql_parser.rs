//! Parse adapter over the `sqlparser` frontend.
//!
//! Analytics statements arrive as raw SQL text. This module turns them into
//! the single `SELECT` they must contain so the extractors can fold over the
//! resulting AST. Parser failures are propagated untouched.

use sqlparser::ast::{Expr, Query, Select, SetExpr, Statement, Value};
use sqlparser::dialect::{GenericDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

use crate::config::SqlDialectKind;
use crate::error::{EvsqlError, Result};

/// Parse a raw statement into its SELECT body.
///
/// Returns a `Structure` error when the input holds anything other than a
/// single plain SELECT statement.
pub fn parse_select(sql: &str, dialect: SqlDialectKind) -> Result<Select> {
    let statements = match dialect {
        SqlDialectKind::Postgres => Parser::parse_sql(&PostgreSqlDialect {}, sql)?,
        SqlDialectKind::Generic => Parser::parse_sql(&GenericDialect {}, sql)?,
    };

    let statement = statements
        .into_iter()
        .next()
        .ok_or_else(|| EvsqlError::Structure("empty statement".to_string()))?;

    match statement {
        Statement::Query(query) => select_body(*query),
        other => Err(EvsqlError::Structure(format!(
            "expected a SELECT statement, found: {other}"
        ))),
    }
}

fn select_body(query: Query) -> Result<Select> {
    match *query.body {
        SetExpr::Select(select) => Ok(*select),
        other => Err(EvsqlError::Structure(format!(
            "expected a plain SELECT body, found: {other}"
        ))),
    }
}

/// SELECT body of a nested subquery, if it has one.
pub(crate) fn subquery_select(query: &Query) -> Option<&Select> {
    match query.body.as_ref() {
        SetExpr::Select(select) => Some(select),
        _ => None,
    }
}

/// Unquoted content of a single-quoted string literal.
pub(crate) fn string_literal(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Value(Value::SingleQuotedString(s)) => Some(s),
        _ => None,
    }
}

/// Bare column name behind an identifier, compound identifier or
/// parenthesized wrapper.
pub(crate) fn identifier_name(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Identifier(ident) => Some(&ident.value),
        Expr::CompoundIdentifier(parts) => parts.last().map(|ident| ident.value.as_str()),
        Expr::Nested(inner) => identifier_name(inner),
        _ => None,
    }
}
