//! Token classification
//!
//! Decides what a single command-line token is before the parser looks at
//! the command tree.

/// A classified command-line token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Does not start with `-`: a subcommand name or a positional argument
    Word(&'a str),

    /// A lone `-`
    BareDash,

    /// `--`, after which every token is positional
    Terminator,

    /// `-abc` or `-abc=value`
    Shortcuts {
        cluster: &'a str,
        inline: Option<&'a str>,
    },

    /// `--name` or `--name=value`
    Long {
        prototype: &'a str,
        inline: Option<&'a str>,
    },
}

impl<'a> Token<'a> {
    pub fn classify(arg: &'a str) -> Self {
        if !arg.starts_with('-') {
            return Token::Word(arg);
        }
        match arg {
            "-" => return Token::BareDash,
            "--" => return Token::Terminator,
            _ => {}
        }

        // Only the first '=' splits; the value may contain more.
        let (head, inline) = match arg.split_once('=') {
            Some((head, value)) => (head, Some(value)),
            None => (arg, None),
        };

        match head.strip_prefix("--") {
            Some(prototype) => Token::Long { prototype, inline },
            None => Token::Shortcuts {
                cluster: &head[1..],
                inline,
            },
        }
    }
}
