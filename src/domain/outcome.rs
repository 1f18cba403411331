//! The result of a parse: which subcommands were entered, what each option
//! received, and the leftover positional arguments.

use std::any::Any;
use std::collections::BTreeMap;

use serde::Serialize;

use super::value::AnyValue;

/// Everything recorded for one option during a parse
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchedArg {
    occurrences: usize,

    #[serde(rename = "values", skip_serializing_if = "Vec::is_empty")]
    raw: Vec<String>,

    #[serde(skip)]
    values: Vec<AnyValue>,
}

impl MatchedArg {
    /// How many times the option appeared
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// Values as they appeared on the command line, in order
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Coerced values, in order
    pub fn values(&self) -> &[AnyValue] {
        &self.values
    }
}

/// Option matches keyed by option id
///
/// The id of an option is its long name, or its shortcut when it has no long
/// name. Options of different subcommands sharing an id share an entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Matches {
    args: BTreeMap<String, MatchedArg>,
}

impl Matches {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_switch(&mut self, id: &str) {
        self.entry(id).occurrences += 1;
    }

    pub(crate) fn record_value(&mut self, id: &str, raw: &str, value: AnyValue) {
        let arg = self.entry(id);
        arg.occurrences += 1;
        arg.raw.push(raw.to_string());
        arg.values.push(value);
    }

    fn entry(&mut self, id: &str) -> &mut MatchedArg {
        self.args.entry(id.to_string()).or_default()
    }

    pub fn get(&self, id: &str) -> Option<&MatchedArg> {
        self.args.get(id)
    }

    /// Returns true if the option appeared at least once
    pub fn contains(&self, id: &str) -> bool {
        self.args.contains_key(id)
    }

    /// Alias of [`Matches::contains`] that reads better for switches
    pub fn flag(&self, id: &str) -> bool {
        self.contains(id)
    }

    pub fn occurrences(&self, id: &str) -> usize {
        self.args.get(id).map_or(0, MatchedArg::occurrences)
    }

    /// Returns the last value given to the option, if it is a `T`
    pub fn get_one<T: Any>(&self, id: &str) -> Option<&T> {
        self.args
            .get(id)?
            .values
            .last()
            .and_then(AnyValue::downcast_ref::<T>)
    }

    /// Returns every value given to the option that is a `T`
    pub fn get_many<T: Any>(&self, id: &str) -> impl Iterator<Item = &T> + '_ {
        self.args
            .get(id)
            .into_iter()
            .flat_map(|arg| arg.values.iter())
            .filter_map(AnyValue::downcast_ref::<T>)
    }

    /// Returns the last raw value given to the option
    pub fn get_raw(&self, id: &str) -> Option<&str> {
        self.args.get(id)?.raw.last().map(String::as_str)
    }

    /// Ids of all matched options, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// What a successful parse produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    /// Names of the subcommands entered, outermost first
    pub path: Vec<String>,

    /// Options seen along the way
    pub matches: Matches,

    /// Positional arguments left over, in input order
    pub extra: Vec<String>,
}

impl ParseOutcome {
    /// Name of the deepest subcommand entered, if any
    pub fn command(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}
