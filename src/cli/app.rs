//! Main CLI application structure
//!
//! The binary's own command line is described with argtree itself.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::output::Output;
use super::sample;
use crate::domain::{Coercer, Command, CommandBuilder, DefinitionError, ParseOutcome};
use crate::storage::{CommandDef, Config, OutputFormat};

pub const USAGE: &str = "usage: argtree [-h] [-v] [-f text|json] [-c CONFIG] [-d DEFINITION] \
<parse|check|commands|sample> [-- ARGS...]";

/// Exit code when the arguments handed to `parse` are rejected
const REJECTED: u8 = 2;

/// Parsed command line of the binary
#[derive(Debug, Default)]
pub struct Cli {
    pub help: bool,
    pub verbose: bool,
    pub format: Option<OutputFormat>,
    pub config: Option<PathBuf>,
    pub definition: Option<PathBuf>,
    pub command: Option<Commands>,

    /// Positional arguments after the command
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Parse the trailing arguments against the definition
    Parse,

    /// Load and validate the definition
    Check,

    /// List the definition's subcommands
    List,

    /// Print the built-in sample definition
    Sample,
}

impl Cli {
    /// Command tree of the binary itself
    pub fn command() -> Result<Command, DefinitionError> {
        let with_format = |builder: CommandBuilder| {
            builder.param_with(
                Some('f'),
                "format",
                "output format (text or json)",
                Coercer::parsed::<OutputFormat>(),
            )
        };

        let root = with_format(Command::builder())?
            .switch(Some('h'), "help", "print usage")?
            .switch(Some('v'), "verbose", "enable debug logging")?
            .typed_param::<PathBuf>(Some('c'), "config", "config file")?
            .typed_param::<PathBuf>(Some('d'), "definition", "definition file")?
            .subcommand(
                "parse",
                "parse ARGS against the definition",
                with_format(Command::builder())?,
            )?
            .subcommand("check", "validate the definition", Command::builder())?
            .subcommand(
                "commands",
                "list the definition's subcommands",
                with_format(Command::builder())?,
            )?
            .subcommand("sample", "print the built-in sample definition", Command::builder())?
            .build();

        Ok(root)
    }

    pub fn parse_from<I, S>(args: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcome = Self::command()?.parse(args)?;
        Ok(Self::from_outcome(outcome))
    }

    fn from_outcome(outcome: ParseOutcome) -> Self {
        let matches = &outcome.matches;
        let command = match outcome.path.first().map(String::as_str) {
            Some("parse") => Some(Commands::Parse),
            Some("check") => Some(Commands::Check),
            Some("commands") => Some(Commands::List),
            Some("sample") => Some(Commands::Sample),
            _ => None,
        };

        Self {
            help: matches.flag("help"),
            verbose: matches.flag("verbose"),
            format: matches.get_one::<OutputFormat>("format").copied(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            definition: matches.get_one::<PathBuf>("definition").cloned(),
            command,
            args: outcome.extra,
        }
    }
}

/// Runs the binary
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_from(std::env::args().skip(1))?;
    init_logging(cli.verbose);
    debug!(?cli, "parsed command line");

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let output = Output::new(cli.format.unwrap_or(config.default_format));

    let command = match cli.command {
        Some(command) if !cli.help => command,
        _ => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
    };

    if command != Commands::Parse {
        if let Some(arg) = cli.args.first() {
            anyhow::bail!("Unexpected argument: {}", arg);
        }
    }

    match command {
        Commands::Sample => print!("{}", sample::sample_source()),

        Commands::Check => {
            let def = load_definition(&cli, &config)?;
            def.build()?;
            let name = if def.name.is_empty() { "<unnamed>" } else { def.name.as_str() };
            output.success(&format!("Definition '{}' is valid", name));
        }

        Commands::List => {
            let tree = load_definition(&cli, &config)?.build()?;
            list_commands(&output, &tree);
        }

        Commands::Parse => {
            let tree = load_definition(&cli, &config)?.build()?;
            return Ok(parse_args(&output, &tree, &cli.args));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("argtree=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Logs go to stderr; stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// Picks `--definition`, then the config's definition, then the sample
fn load_definition(cli: &Cli, config: &Config) -> Result<CommandDef> {
    match cli.definition.as_ref().or(config.definition.as_ref()) {
        Some(path) => {
            debug!(path = %path.display(), "using definition file");
            Ok(CommandDef::load(path)?)
        }
        None => {
            debug!("using built-in sample definition");
            Ok(sample::sample_definition()?)
        }
    }
}

fn parse_args(output: &Output, tree: &Command, args: &[String]) -> ExitCode {
    let outcome = match tree.parse(args.iter().cloned()) {
        Ok(outcome) => outcome,
        Err(e) => {
            output.error(&e.to_string());
            return ExitCode::from(REJECTED);
        }
    };

    if output.is_json() {
        output.data(&outcome);
        return ExitCode::SUCCESS;
    }

    let command = if outcome.path.is_empty() {
        "(root)".to_string()
    } else {
        outcome.path.join(" ")
    };
    output.row(&["command", command.as_str()]);

    for id in outcome.matches.ids() {
        let Some(arg) = outcome.matches.get(id) else {
            continue;
        };
        if arg.raw().is_empty() {
            let count = format!("x{}", arg.occurrences());
            output.row(&["option", id, count.as_str()]);
        } else {
            for value in arg.raw() {
                output.row(&["option", id, value.as_str()]);
            }
        }
    }

    for arg in &outcome.extra {
        output.row(&["extra", arg.as_str()]);
    }

    ExitCode::SUCCESS
}

#[derive(Debug, Serialize)]
struct CommandEntry {
    path: String,
    name: String,
    description: String,
    depth: usize,
}

fn collect_commands(command: &Command, prefix: &str, depth: usize, entries: &mut Vec<CommandEntry>) {
    for sub in command.subcommands() {
        let path = if prefix.is_empty() {
            sub.name().to_string()
        } else {
            format!("{} {}", prefix, sub.name())
        };
        entries.push(CommandEntry {
            path: path.clone(),
            name: sub.name().to_string(),
            description: sub.description().to_string(),
            depth,
        });
        collect_commands(sub.command(), &path, depth + 1, entries);
    }
}

fn list_commands(output: &Output, tree: &Command) {
    let mut entries = Vec::new();
    collect_commands(tree, "", 0, &mut entries);

    if output.is_json() {
        output.data(&entries);
        return;
    }

    for entry in &entries {
        let label = format!("{}{}", "  ".repeat(entry.depth), entry.name);
        output.row(&[label.as_str(), entry.description.as_str()]);
    }
}
