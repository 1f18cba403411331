//! # Storage Layer
//!
//! TOML files read by argtree.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Command definitions | TOML | any path, via `--definition` or config |
//! | Config | TOML | `~/.config/argtree/config.toml` or `--config` |
//!
//! ## Key Types
//!
//! - [`CommandDef`] - A command tree as written in a definition file
//! - [`Config`] - Binary configuration

mod config;
mod definition;

pub use config::{Config, ConfigError, OutputFormat};
pub use definition::{CommandDef, DefinitionFileError, OptionDef, ValueType};
