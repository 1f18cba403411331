//! argtree - command-line argument parsing over a tree of subcommands
//!
//! A program describes its command line as a tree of [`Command`]s. Each
//! command has options, reachable as `-x` shortcuts and `--name` long
//! names, and may have subcommands. Parsing walks the arguments against the
//! tree and returns a [`ParseOutcome`]: the subcommands entered, the values
//! each option received, and the leftover positional arguments.
//!
//! ```
//! use argtree::Command;
//!
//! # fn main() -> argtree::Result<()> {
//! let cli = Command::builder()
//!     .param(None, "server", "server address")?
//!     .param(Some('u'), "user", "user name")?
//!     .subcommand(
//!         "checkout",
//!         "Checkout files",
//!         Command::builder().switch(Some('f'), "force", "force checkout")?,
//!     )?
//!     .build();
//!
//! let outcome = cli.parse(["--server=example.com", "checkout", "-f", "main.rs"])?;
//! assert_eq!(outcome.path, ["checkout"]);
//! assert_eq!(outcome.matches.get_raw("server"), Some("example.com"));
//! assert!(outcome.matches.flag("force"));
//! assert_eq!(outcome.extra, ["main.rs"]);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod parser;
pub mod storage;
pub mod cli;
mod error;

pub use domain::{
    AnyValue, Coercer, CoercionError, Command, CommandBuilder, DefinitionError, Matches,
    OptionSpec, ParseOutcome,
};
pub use error::{Error, Result};
pub use parser::{parse, ParseError};
