//! Table/alias bindings of the FROM/JOIN clause.

use sqlparser::ast::TableFactor;

use crate::config::SqlDialectKind;
use crate::error::Result;
use crate::model::{InnerJoinElement, TableElement};
use crate::sql_parser::parse_select;

/// Extract every table binding of the statement's FROM/JOIN clause, in
/// appearance order. Collaborators consume the first one; the sequence keeps
/// room for multi-join statements.
pub fn inner_join_elements(sql: &str, dialect: SqlDialectKind) -> Result<Vec<InnerJoinElement>> {
    let select = parse_select(sql, dialect)?;

    let mut elements = Vec::new();
    for table_with_joins in &select.from {
        collect_table(&table_with_joins.relation, &mut elements);
        for join in &table_with_joins.joins {
            collect_table(&join.relation, &mut elements);
        }
    }

    Ok(elements)
}

fn collect_table(factor: &TableFactor, out: &mut Vec<InnerJoinElement>) {
    if let TableFactor::Table { name, alias, .. } = factor {
        out.push(InnerJoinElement {
            table_element: TableElement {
                name: name.to_string(),
                alias: alias
                    .as_ref()
                    .map(|a| a.name.value.clone())
                    .unwrap_or_default(),
            },
        });
    }
}
