//! # Command-Line Interface
//!
//! The `argtree` binary: parses arguments against a command tree read from
//! a TOML definition file, and reports what the parser made of them.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `parse -- ARGS...` | Parse ARGS and print command path, options and extra arguments |
//! | `check` | Load and validate the definition |
//! | `commands` | List the definition's subcommands |
//! | `sample` | Print the built-in sample definition |
//!
//! Without `--definition` (or a `definition` key in the config file) the
//! built-in sample, a small version-control client, is used.
//!
//! ## Output Formats
//!
//! `--format text` (default) prints tab-separated rows; `--format json`
//! prints machine-readable JSON.
//!
//! ## Logging
//!
//! Logs go to stderr, filtered by `RUST_LOG`. `--verbose` (or `-v`) turns on
//! debug logging for argtree.

mod app;
mod output;
mod sample;

pub use app::{run, Cli, Commands, USAGE};
pub use output::Output;
pub use sample::{sample_definition, sample_source};
