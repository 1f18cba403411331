//! Command definition tree
//!
//! A [`Command`] is one node of the tree the parser walks: its options,
//! indexed by shortcut and by long name, its subcommands, indexed by name,
//! and the action to run when parsing ends on it. Trees are put together
//! with [`CommandBuilder`] and are immutable once built.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::option::OptionSpec;
use super::outcome::ParseOutcome;
use super::value::Coercer;
use crate::parser::{self, ParseError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("Option needs a shortcut or a long name")]
    MissingIdentity,

    #[error("Duplicate shortcut: -{0}")]
    DuplicateShortcut(char),

    #[error("Duplicate option: --{0}")]
    DuplicatePrototype(String),

    #[error("Option id '{0}' is already taken by another option")]
    DuplicateId(String),

    #[error("Duplicate subcommand: {0}")]
    DuplicateSubcommand(String),

    #[error("Subcommand name must not be empty")]
    EmptySubcommandName,
}

/// Callback run when parsing finishes on a command
pub type Action = Arc<dyn Fn(&ParseOutcome) + Send + Sync>;

/// A named child command
#[derive(Debug)]
pub struct Subcommand {
    name: String,
    description: String,
    command: Command,
}

impl Subcommand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// A node of the command tree
#[derive(Default)]
pub struct Command {
    action: Option<Action>,
    options: Vec<OptionSpec>,
    by_shortcut: HashMap<char, usize>,
    by_prototype: HashMap<String, usize>,
    subcommands: Vec<Subcommand>,
    by_name: HashMap<String, usize>,
}

impl Command {
    pub fn builder() -> CommandBuilder {
        CommandBuilder::new()
    }

    /// Options in the order they were defined
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Subcommands in the order they were defined
    pub fn subcommands(&self) -> &[Subcommand] {
        &self.subcommands
    }

    pub fn find_shortcut(&self, shortcut: char) -> Option<&OptionSpec> {
        self.by_shortcut.get(&shortcut).map(|&i| &self.options[i])
    }

    pub fn find_prototype(&self, prototype: &str) -> Option<&OptionSpec> {
        self.by_prototype.get(prototype).map(|&i| &self.options[i])
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.by_name.get(name).map(|&i| &self.subcommands[i])
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub(crate) fn run_action(&self, outcome: &ParseOutcome) {
        if let Some(action) = &self.action {
            action(outcome);
        }
    }

    /// Parses `args` with this command as the root
    pub fn parse<I, S>(&self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parser::parse(self, args)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("has_action", &self.has_action())
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .finish()
    }
}

/// Builds a [`Command`]
///
/// Every registration is checked as it is made, so a malformed tree never
/// reaches the parser:
///
/// ```
/// use argtree::{Command, DefinitionError};
///
/// let result = Command::builder()
///     .switch(Some('f'), "force", "force checkout")
///     .and_then(|b| b.switch(Some('f'), "fast", "go fast"));
/// assert_eq!(result.unwrap_err(), DefinitionError::DuplicateShortcut('f'));
/// ```
#[derive(Debug, Default)]
pub struct CommandBuilder {
    command: Command,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action run when parsing ends on this command
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&ParseOutcome) + Send + Sync + 'static,
    {
        self.command.action = Some(Arc::new(action));
        self
    }

    /// Adds a switch option
    pub fn switch(
        self,
        shortcut: Option<char>,
        prototype: &str,
        description: impl Into<String>,
    ) -> Result<Self, DefinitionError> {
        self.option(OptionSpec::switch(shortcut, prototype, description))
    }

    /// Adds a param option taking a string value
    pub fn param(
        self,
        shortcut: Option<char>,
        prototype: &str,
        description: impl Into<String>,
    ) -> Result<Self, DefinitionError> {
        self.param_with(shortcut, prototype, description, Coercer::string())
    }

    /// Adds a param option whose value is parsed into `T`
    pub fn typed_param<T>(
        self,
        shortcut: Option<char>,
        prototype: &str,
        description: impl Into<String>,
    ) -> Result<Self, DefinitionError>
    where
        T: FromStr + Any + Send + Sync,
        T::Err: fmt::Display,
    {
        self.param_with(shortcut, prototype, description, Coercer::parsed::<T>())
    }

    /// Adds a param option with a custom coercer
    pub fn param_with(
        self,
        shortcut: Option<char>,
        prototype: &str,
        description: impl Into<String>,
        coercer: Coercer,
    ) -> Result<Self, DefinitionError> {
        self.option(OptionSpec::param(shortcut, prototype, description, coercer))
    }

    /// Adds an option
    pub fn option(mut self, option: OptionSpec) -> Result<Self, DefinitionError> {
        if !option.has_identity() {
            return Err(DefinitionError::MissingIdentity);
        }
        if let Some(c) = option.shortcut() {
            if self.command.by_shortcut.contains_key(&c) {
                return Err(DefinitionError::DuplicateShortcut(c));
            }
        }
        if let Some(p) = option.prototype() {
            if self.command.by_prototype.contains_key(p) {
                return Err(DefinitionError::DuplicatePrototype(p.to_string()));
            }
        }
        // A shortcut-only option is keyed by its letter, which can clash
        // with a one-letter long name
        if self.command.options.iter().any(|o| o.id() == option.id()) {
            return Err(DefinitionError::DuplicateId(option.id().to_string()));
        }

        let index = self.command.options.len();
        if let Some(c) = option.shortcut() {
            self.command.by_shortcut.insert(c, index);
        }
        if let Some(p) = option.prototype() {
            self.command.by_prototype.insert(p.to_string(), index);
        }
        self.command.options.push(option);
        Ok(self)
    }

    /// Adds a subcommand built from `child`
    pub fn subcommand(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        child: CommandBuilder,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DefinitionError::EmptySubcommandName);
        }
        if self.command.by_name.contains_key(&name) {
            return Err(DefinitionError::DuplicateSubcommand(name));
        }

        self.command
            .by_name
            .insert(name.clone(), self.command.subcommands.len());
        self.command.subcommands.push(Subcommand {
            name,
            description: description.into(),
            command: child.build(),
        });
        Ok(self)
    }

    pub fn build(self) -> Command {
        self.command
    }
}
