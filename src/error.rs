//! Crate-level error type

use thiserror::Error;

use crate::domain::DefinitionError;
use crate::parser::ParseError;

/// Either kind of failure argtree reports
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The command tree was malformed
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The arguments did not fit the command tree
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type alias for argtree operations
pub type Result<T> = std::result::Result<T, Error>;
