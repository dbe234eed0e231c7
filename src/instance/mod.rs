// The `instance` module contains the data model for the instance, expressed as structural
// containers. These types are immutable.
use thiserror::Error;

mod variable;
pub use crate::instance::variable::Variable;

mod literal;
pub use crate::instance::literal::{Literal, NEGATION};

mod clause;
pub use crate::instance::clause::Clause;

mod clause_set;
pub use crate::instance::clause_set::ClauseSet;

/// A value that is neither a bare variable nor a negation tag paired with a variable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed literal: {0}")]
pub struct MalformedLiteralError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    #[error("expected a {0} (a set), found {1}")]
    NotASet(&'static str, String),
    #[error(transparent)]
    Literal(#[from] MalformedLiteralError),
}
