//! Option definitions
//!
//! An option is reachable by a single-character shortcut (`-f`), a long name
//! or "prototype" (`--force`), or both. A switch takes no value; a param
//! consumes exactly one value and runs it through its [`Coercer`].

use super::outcome::Matches;
use super::value::{CoercionError, Coercer};

/// Whether an option takes a value
#[derive(Debug, Clone)]
pub enum OptionKind {
    Switch,
    Param(Coercer),
}

/// A single option of a command
#[derive(Debug, Clone)]
pub struct OptionSpec {
    id: String,
    shortcut: Option<char>,
    prototype: Option<String>,
    description: String,
    kind: OptionKind,
}

impl OptionSpec {
    /// Creates a switch option
    ///
    /// The prototype is trimmed; an empty prototype means the option has
    /// only a shortcut.
    pub fn switch(shortcut: Option<char>, prototype: &str, description: impl Into<String>) -> Self {
        Self::new(shortcut, prototype, description.into(), OptionKind::Switch)
    }

    /// Creates a param option whose value goes through `coercer`
    pub fn param(
        shortcut: Option<char>,
        prototype: &str,
        description: impl Into<String>,
        coercer: Coercer,
    ) -> Self {
        Self::new(shortcut, prototype, description.into(), OptionKind::Param(coercer))
    }

    fn new(shortcut: Option<char>, prototype: &str, description: String, kind: OptionKind) -> Self {
        let prototype = Some(prototype.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let id = match (&prototype, shortcut) {
            (Some(p), _) => p.clone(),
            (None, Some(c)) => c.to_string(),
            (None, None) => String::new(),
        };

        Self {
            id,
            shortcut,
            prototype,
            description,
            kind,
        }
    }

    /// Key under which matches for this option are recorded
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shortcut(&self) -> Option<char> {
        self.shortcut
    }

    pub fn prototype(&self) -> Option<&str> {
        self.prototype.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Returns true if the option can be reached from the command line
    pub fn has_identity(&self) -> bool {
        self.shortcut.is_some() || self.prototype.is_some()
    }

    pub fn takes_value(&self) -> bool {
        matches!(self.kind, OptionKind::Param(_))
    }

    /// Name of the type a param produces
    pub fn value_type(&self) -> Option<&'static str> {
        match &self.kind {
            OptionKind::Switch => None,
            OptionKind::Param(coercer) => Some(coercer.target()),
        }
    }

    /// Offers `value` to the option and returns whether it was consumed
    ///
    /// A param reports the value consumed even when there is none, so the
    /// caller can tell a missing value apart from a switch.
    pub fn process(&self, value: Option<&str>, matches: &mut Matches) -> Result<bool, CoercionError> {
        match &self.kind {
            OptionKind::Switch => {
                matches.record_switch(&self.id);
                Ok(false)
            }
            OptionKind::Param(coercer) => {
                if let Some(raw) = value {
                    let typed = coercer.coerce(raw)?;
                    matches.record_value(&self.id, raw, typed);
                }
                Ok(true)
            }
        }
    }
}
