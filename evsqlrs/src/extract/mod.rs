//! WHERE-clause pattern extractors.
//!
//! Each extractor is a pure function of a raw SQL string: it parses the
//! statement, folds over the WHERE clause (and correlated subqueries) and
//! re-emits the recognized shapes as normalized [`PredicateElement`]s.
//! Partially matching statements degrade to whatever predicates were found;
//! unparseable SQL is an error.
//!
//! [`PredicateElement`]: crate::model::PredicateElement

pub mod inner_join;
pub mod latest;
pub mod program_stage;
pub mod uid_level;

pub use inner_join::inner_join_elements;
pub use latest::latest_predicates;
pub use program_stage::program_stage_predicates;
pub use uid_level::uid_level_predicate;
