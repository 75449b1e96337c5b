use strum::{EnumIs, EnumTryAs};
use thiserror::Error;

use crate::sort::{Sort, SortKind};

#[derive(Debug, Clone, PartialEq, Eq, EnumIs, EnumTryAs, Error)]
pub enum TermError {
    /// The operator was applied to a number of children outside of its arity.
    #[error(
        "Operator `{op}` expects between {min} and {max} children, but {found} were provided."
    )]
    InvalidArity {
        op: String,
        min: usize,
        max: usize,
        found: usize,
    },

    /// The operator was given the wrong number of integer indices.
    #[error("Operator `{op}` expects {expected} indices, but {found} were provided.")]
    InvalidIndices {
        op: String,
        expected: usize,
        found: usize,
    },

    /// The children sorts do not agree with what the operator requires.
    #[error("Sort mismatch while applying `{op}`: {reason}. Children sorts: [{found}].")]
    SortMismatch {
        op: String,
        reason: String,
        found: SortList,
    },

    /// A term was handed to a layer that did not build it.
    #[error("Term `{0}` was not built by this layer and cannot be used as a child here.")]
    ForeignTerm(String),

    /// A literal was requested from a term that is not a value.
    #[error("Term `{0}` is not a value.")]
    NotAValue(String),

    /// A literal does not fit the requested encoding.
    #[error("Value `{value}` does not fit in {target}.")]
    ValueOutOfRange { value: String, target: String },

    /// The engine does not implement this sort or operation.
    #[error("Unsupported by the engine: {0}.")]
    Unsupported(String),

    /// A value cannot be printed using the requested sort kind.
    #[error("Cannot print term `{term}` as a value of sort kind {kind}.")]
    IncompatibleSortKind { term: String, kind: SortKind },

    /// Symbol names must be unique within a factory.
    #[error("A symbol named `{0}` already exists.")]
    DuplicateSymbol(String),

    /// Invalid sort construction.
    #[error("Invalid sort: {0}.")]
    InvalidSort(String),

    /// Configuration could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Config(String),
}

pub type TermResult<T> = Result<T, TermError>;

/// Sorts of the children involved in a failed construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortList(pub Vec<Sort>);

impl std::fmt::Display for SortList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, sort) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", sort)?;
        }
        Ok(())
    }
}
