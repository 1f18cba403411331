//! Argument parser
//!
//! Walks the argument list left to right against a [`Command`] tree:
//!
//! - a word matching a subcommand of the current command, seen before any
//!   positional argument, descends into that subcommand
//! - any other word is a positional argument
//! - `-abc` is a cluster of shortcuts; only the last may take a value
//! - `--name` is a long option
//! - `--` makes every remaining token positional
//!
//! A value is taken from `=value` on the same token, or else from the next
//! token. A next token that the option does not consume is left in place and
//! classified normally. When the arguments run out, the action of the
//! current command runs once.

mod token;

pub use token::Token;

use thiserror::Error;
use tracing::{debug, trace};

use crate::domain::{CoercionError, Command, OptionSpec, ParseOutcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("A bare '-' is not a valid argument")]
    BareDash,

    #[error("No shortcut given in '{0}'")]
    EmptyCluster(String),

    #[error("Unknown option: -{0}")]
    UnknownShortcut(char),

    #[error("Unknown option: --{0}")]
    UnknownPrototype(String),

    #[error("Option -{0} takes a value and must come last in a group of shortcuts")]
    ValueInCluster(char),

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("Option {option} does not take a value (got '{value}')")]
    UnexpectedValue { option: String, value: String },

    #[error("Invalid value for {option}: {source}")]
    InvalidValue {
        option: String,
        #[source]
        source: CoercionError,
    },
}

/// Parses `args` against the tree rooted at `root`
pub fn parse<I, S>(root: &Command, args: I) -> Result<ParseOutcome, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    Parser::new(root, &args).run()
}

/// Where a candidate value for an option came from
#[derive(Debug, Clone, Copy)]
enum Candidate<'a> {
    /// After `=` in the option's own token
    Inline(&'a str),
    /// The next token
    LookAhead(&'a str),
    Absent,
}

impl<'a> Candidate<'a> {
    fn value(self) -> Option<&'a str> {
        match self {
            Candidate::Inline(v) | Candidate::LookAhead(v) => Some(v),
            Candidate::Absent => None,
        }
    }
}

/// State of a single parse
struct Parser<'a> {
    args: &'a [String],
    offset: usize,
    current: &'a Command,
    outcome: ParseOutcome,
}

impl<'a> Parser<'a> {
    fn new(root: &'a Command, args: &'a [String]) -> Self {
        Self {
            args,
            offset: 0,
            current: root,
            outcome: ParseOutcome::default(),
        }
    }

    fn run(mut self) -> Result<ParseOutcome, ParseError> {
        let args = self.args;
        while self.offset < args.len() {
            let arg = args[self.offset].as_str();
            self.offset += 1;

            let token = Token::classify(arg);
            trace!(?token, "classified argument");

            match token {
                Token::Word(word) => self.word(word),
                Token::BareDash => return Err(ParseError::BareDash),
                Token::Terminator => self.terminate(),
                Token::Shortcuts { cluster, inline } => self.shortcuts(arg, cluster, inline)?,
                Token::Long { prototype, inline } => self.long(prototype, inline)?,
            }
        }

        debug!(
            path = ?self.outcome.path,
            matched = self.outcome.matches.len(),
            extra = self.outcome.extra.len(),
            "parse finished"
        );
        self.current.run_action(&self.outcome);
        Ok(self.outcome)
    }

    fn word(&mut self, word: &str) {
        // Subcommands must come before any positional argument.
        let current = self.current;
        if self.outcome.extra.is_empty() {
            if let Some(sub) = current.find_subcommand(word) {
                debug!(subcommand = word, "entering subcommand");
                self.current = sub.command();
                self.outcome.path.push(word.to_string());
                return;
            }
        }
        self.outcome.extra.push(word.to_string());
    }

    fn terminate(&mut self) {
        let rest = &self.args[self.offset..];
        trace!(count = rest.len(), "terminator, rest is positional");
        self.outcome.extra.extend(rest.iter().cloned());
        self.offset = self.args.len();
    }

    fn shortcuts(
        &mut self,
        arg: &str,
        cluster: &str,
        inline: Option<&'a str>,
    ) -> Result<(), ParseError> {
        let current = self.current;
        let mut shortcuts = cluster.chars();
        let last = shortcuts
            .next_back()
            .ok_or_else(|| ParseError::EmptyCluster(arg.to_string()))?;
        let candidate = self.candidate(inline);

        for shortcut in shortcuts {
            let option = current
                .find_shortcut(shortcut)
                .ok_or(ParseError::UnknownShortcut(shortcut))?;
            if option.takes_value() {
                return Err(ParseError::ValueInCluster(shortcut));
            }
            self.apply(option, format!("-{shortcut}"), Candidate::Absent)?;
        }

        let option = current
            .find_shortcut(last)
            .ok_or(ParseError::UnknownShortcut(last))?;
        self.apply(option, format!("-{last}"), candidate)
    }

    fn long(&mut self, prototype: &str, inline: Option<&'a str>) -> Result<(), ParseError> {
        let current = self.current;
        let option = current
            .find_prototype(prototype)
            .ok_or_else(|| ParseError::UnknownPrototype(prototype.to_string()))?;
        let candidate = self.candidate(inline);
        self.apply(option, format!("--{prototype}"), candidate)
    }

    fn candidate(&self, inline: Option<&'a str>) -> Candidate<'a> {
        match inline {
            Some(value) => Candidate::Inline(value),
            None => match self.args.get(self.offset) {
                Some(next) => Candidate::LookAhead(next.as_str()),
                None => Candidate::Absent,
            },
        }
    }

    /// Offers the candidate value to `option` and advances past it if taken
    fn apply(
        &mut self,
        option: &OptionSpec,
        flag: String,
        candidate: Candidate<'a>,
    ) -> Result<(), ParseError> {
        let consumed = option
            .process(candidate.value(), &mut self.outcome.matches)
            .map_err(|source| ParseError::InvalidValue {
                option: flag.clone(),
                source,
            })?;

        match (consumed, candidate) {
            (true, Candidate::Absent) => Err(ParseError::MissingValue(flag)),
            (true, Candidate::LookAhead(value)) => {
                trace!(option = %flag, value, "took value from next argument");
                self.offset += 1;
                Ok(())
            }
            (false, Candidate::Inline(value)) => Err(ParseError::UnexpectedValue {
                option: flag,
                value: value.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
