//! Command trees described in TOML
//!
//! ```toml
//! name = "vcs"
//!
//! [[option]]
//! short = "u"
//! long = "user"
//! help = "user name"
//! value = "string"
//!
//! [[subcommand]]
//! name = "checkout"
//! help = "Checkout files"
//!
//! [[subcommand.option]]
//! short = "f"
//! long = "force"
//! help = "force checkout"
//! ```
//!
//! An option with a `value` type is a param; without one it is a switch.
//! Array tables keep the order options and subcommands were written in.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Coercer, Command, CommandBuilder, DefinitionError, OptionSpec};

#[derive(Debug, Error)]
pub enum DefinitionFileError {
    #[error("Failed to read definition {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse definition: {0}")]
    Parse(String),

    #[error("Invalid definition at {location}: {source}")]
    Invalid {
        location: String,
        source: DefinitionError,
    },
}

/// Type of value a param option takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Bool,
    Path,
}

impl ValueType {
    pub fn coercer(&self) -> Coercer {
        match self {
            ValueType::String => Coercer::string(),
            ValueType::Integer => Coercer::parsed::<i64>(),
            ValueType::Float => Coercer::parsed::<f64>(),
            ValueType::Bool => Coercer::parsed::<bool>(),
            ValueType::Path => Coercer::parsed::<PathBuf>(),
        }
    }
}

/// One option entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionDef {
    pub short: Option<char>,
    pub long: String,
    pub help: String,

    /// Present for params, absent for switches
    pub value: Option<ValueType>,
}

impl OptionDef {
    pub fn to_spec(&self) -> OptionSpec {
        match self.value {
            None => OptionSpec::switch(self.short, &self.long, self.help.clone()),
            Some(value) => OptionSpec::param(self.short, &self.long, self.help.clone(), value.coercer()),
        }
    }
}

/// A command entry: the file root, or one of its subcommands
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandDef {
    /// Program name at the root, subcommand name below it
    pub name: String,
    pub help: String,

    #[serde(rename = "option")]
    pub options: Vec<OptionDef>,

    #[serde(rename = "subcommand")]
    pub subcommands: Vec<CommandDef>,
}

impl CommandDef {
    /// Reads a definition file
    pub fn load(path: &Path) -> Result<Self, DefinitionFileError> {
        let content = fs::read_to_string(path).map_err(|source| DefinitionFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded definition file");
        content.parse()
    }

    /// Builds the command tree, checking every entry as the builder does
    pub fn build(&self) -> Result<Command, DefinitionFileError> {
        Ok(self.builder("<root>")?.build())
    }

    fn builder(&self, location: &str) -> Result<CommandBuilder, DefinitionFileError> {
        let invalid = |source| DefinitionFileError::Invalid {
            location: location.to_string(),
            source,
        };

        let mut builder = Command::builder();
        for option in &self.options {
            builder = builder.option(option.to_spec()).map_err(invalid)?;
        }
        for sub in &self.subcommands {
            let child_location = if location == "<root>" {
                sub.name.clone()
            } else {
                format!("{} {}", location, sub.name)
            };
            let child = sub.builder(&child_location)?;
            builder = builder
                .subcommand(sub.name.clone(), sub.help.clone(), child)
                .map_err(invalid)?;
        }
        Ok(builder)
    }
}

impl FromStr for CommandDef {
    type Err = DefinitionFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| DefinitionFileError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VCS: &str = r#"
name = "vcs"

[[option]]
short = "h"
long = "help"
help = "print this message"

[[option]]
long = "server"
help = "server address"
value = "string"

[[option]]
short = "n"
long = "retries"
help = "retry count"
value = "integer"

[[subcommand]]
name = "checkout"
help = "Checkout files"

[[subcommand.option]]
short = "f"
long = "force"
help = "force checkout"

[[subcommand]]
name = "checkin"
help = "Checkin files"

[[subcommand.option]]
short = "a"
long = "all"
help = "checkin all files"
"#;

    #[test]
    fn parse_definition() {
        let def: CommandDef = VCS.parse().unwrap();
        assert_eq!(def.name, "vcs");
        assert_eq!(def.options.len(), 3);
        assert_eq!(def.options[0].short, Some('h'));
        assert_eq!(def.options[1].value, Some(ValueType::String));
        assert_eq!(def.subcommands.len(), 2);
        assert_eq!(def.subcommands[1].options[0].long, "all");
    }

    #[test]
    fn build_keeps_order_and_kinds() {
        let command = VCS.parse::<CommandDef>().unwrap().build().unwrap();

        let names: Vec<_> = command.subcommands().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["checkout", "checkin"]);
        assert!(!command.find_shortcut('h').unwrap().takes_value());
        assert!(command.find_prototype("server").unwrap().takes_value());
    }

    #[test]
    fn built_tree_parses_typed_values() {
        let command = VCS.parse::<CommandDef>().unwrap().build().unwrap();
        let outcome = command.parse(["-n", "3", "checkin", "-a"]).unwrap();

        assert_eq!(outcome.matches.get_one::<i64>("retries"), Some(&3));
        assert!(outcome.matches.flag("all"));
        assert_eq!(outcome.path, vec!["checkin"]);
    }

    #[test]
    fn invalid_entries_report_location() {
        let toml = r#"
[[subcommand]]
name = "checkout"

[[subcommand.option]]
help = "no name at all"
"#;
        let err = toml.parse::<CommandDef>().unwrap().build().unwrap_err();
        match err {
            DefinitionFileError::Invalid { location, source } => {
                assert_eq!(location, "checkout");
                assert_eq!(source, DefinitionError::MissingIdentity);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_subcommands_rejected() {
        let toml = r#"
[[subcommand]]
name = "go"

[[subcommand]]
name = "go"
"#;
        let err = toml.parse::<CommandDef>().unwrap().build().unwrap_err();
        assert!(err.to_string().contains("Duplicate subcommand: go"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = "[[option]]\nshrt = \"x\"\n".parse::<CommandDef>().unwrap_err();
        assert!(matches!(err, DefinitionFileError::Parse(_)));
    }

    #[test]
    fn shortcut_only_option_clashing_with_long_name_rejected() {
        let toml = r#"
[[subcommand]]
name = "push"

[[subcommand.option]]
short = "x"
long = "f"

[[subcommand.option]]
short = "f"
"#;
        let err = toml.parse::<CommandDef>().unwrap().build().unwrap_err();
        match err {
            DefinitionFileError::Invalid { location, source } => {
                assert_eq!(location, "push");
                assert_eq!(source, DefinitionError::DuplicateId("f".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cli.toml");
        fs::write(&path, VCS).unwrap();

        let def = CommandDef::load(&path).unwrap();
        assert_eq!(def.name, "vcs");

        let missing = CommandDef::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, DefinitionFileError::Read { .. }));
    }
}
