// The `structural` module contains the containers the rest of the crate is built from: sets and
// tuples that compare and hash by content, recursively, and become immutable once frozen.
use thiserror::Error;

mod set;
mod table;
mod tuple;
mod value;


pub use crate::structural::set::RecursiveSet;
pub use crate::structural::tuple::RecursiveTuple;
pub use crate::structural::value::{Symbol, Value};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("cannot modify a frozen {0}")]
    Frozen(&'static str),
    #[error("cannot nest an unfrozen {0} inside another container")]
    UnfrozenElement(&'static str),
}

pub type Result<T> = std::result::Result<T, StructuralError>;
