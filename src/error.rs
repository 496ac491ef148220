//! Error types for command dispatch.
//!
//! `CliError` is what the dispatcher and tokenizer report; `ArgError` is what a
//! command handler reports about its own arguments.

use core::fmt;

/// Bounded copy of a user token kept inside an error.
pub type Token = heapless::String<32>;

/// Copy as much of `s` as fits, cutting on a char boundary.
pub fn token(s: &str) -> Token {
    let mut out = Token::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// CLI error type.
///
/// None of these are fatal: the shell prints the message and goes back to
/// reading the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// No entry in the active directory has this name
    CommandNotFound {
        /// Name as typed
        name: Token,
    },

    /// The name exists but no entry accepts this many arguments
    WrongArgumentCount {
        /// Name as typed
        name: Token,
        /// Number of arguments received (excluding the name)
        received: usize,
    },

    /// Handler rejected one argument
    InvalidArgument {
        /// Position in the token list (the command name is 0)
        index: usize,
        /// The offending token
        token: Token,
    },

    /// Handler needed an argument that was not given
    MissingArgument,

    /// Allocation failed while tokenizing or growing a buffer
    OutOfMemory,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::CommandNotFound { name } => {
                write!(f, "\"{}\": command not found. Type \"?\" to list commands", name)
            }
            CliError::WrongArgumentCount { name, received } => write!(
                f,
                "Wrong number of arguments ({}) for \"{}\". Type \"{} ?\" for usage",
                received, name, name
            ),
            CliError::InvalidArgument { index, token } => {
                write!(f, "Invalid argument #{}: \"{}\"", index, token)
            }
            CliError::MissingArgument => write!(f, "Missing argument"),
            CliError::OutOfMemory => write!(f, "Out of memory"),
        }
    }
}

/// Argument error reported by a command handler.
///
/// Mirrors the classic return-code convention: a positive code names the bad
/// token, a negative code means something required was not supplied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// Token at this index (into the full token list) is invalid
    Invalid(usize),

    /// A required argument is missing
    Missing,
}

impl ArgError {
    /// Convert into a user-facing error, quoting the offending token.
    pub fn into_cli_error(self, argv: &[&str]) -> CliError {
        match self {
            ArgError::Invalid(index) => CliError::InvalidArgument {
                index,
                token: argv.get(index).map(|s| token(s)).unwrap_or_default(),
            },
            ArgError::Missing => CliError::MissingArgument,
        }
    }
}
