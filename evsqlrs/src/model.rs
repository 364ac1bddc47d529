//! Normalized predicate model shared by all extractors.

use serde::{Deserialize, Serialize};

/// One normalized fragment of a WHERE clause, ready to be re-composed by a
/// downstream query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateElement {
    pub left_expression: String,
    pub right_expression: String,
    /// One of `=`, `between`, `>=`, `<`.
    pub relation: String,
    /// How this fragment chains onto the previous one: `""`, `and` or `or`.
    pub logical_operator: String,
}

impl PredicateElement {
    pub fn new(
        left_expression: impl Into<String>,
        right_expression: impl Into<String>,
        relation: impl Into<String>,
        logical_operator: impl Into<String>,
    ) -> Self {
        Self {
            left_expression: left_expression.into(),
            right_expression: right_expression.into(),
            relation: relation.into(),
            logical_operator: logical_operator.into(),
        }
    }
}

/// Table binding found in a FROM/JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableElement {
    pub name: String,
    /// Empty when the table is not aliased.
    pub alias: String,
}

/// The primary table binding of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerJoinElement {
    pub table_element: TableElement,
}
