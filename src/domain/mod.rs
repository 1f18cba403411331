//! Definition model for argtree
//!
//! The command tree, its options, value coercion, and the outcome a parse
//! produces. Contains no parsing logic and no I/O.

mod command;
mod option;
mod outcome;
mod value;

pub use command::{Action, Command, CommandBuilder, DefinitionError, Subcommand};
pub use option::{OptionKind, OptionSpec};
pub use outcome::{MatchedArg, Matches, ParseOutcome};
pub use value::{AnyValue, Coercer, CoercionError};
