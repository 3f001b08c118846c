//! Error types for the `line98` command line.
//!
//! Every command handler returns [`CliError`]; `run` maps it to an exit code.
//! [`BatchValidationError`] attaches a location to a problem found while
//! scanning many records, such as a line in a simulation log.

use std::fmt;

use line98_ai::AdvisorError;
use line98_engine::errors::{CodecError, MoveError};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// Reading input files, writing logs, or writing to stdout/stderr failed.
    Io(std::io::Error),

    /// Bad arguments, an unparsable board, or a malformed record.
    InvalidInput(String),

    /// Configuration could not be loaded or did not validate.
    Config(String),

    /// The rules engine or the advisor refused to continue.
    Engine(String),

    /// Stopped before finishing; maps to exit code 130.
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<MoveError> for CliError {
    fn from(error: MoveError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<CodecError> for CliError {
    fn from(error: CodecError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<AdvisorError> for CliError {
    fn from(error: AdvisorError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// A problem with one item of a batch, reported as `context: message`.
///
/// ```rust
/// use line98_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "sim.jsonl:3",
///     message: "score decreased from 12 to 7".to_string(),
/// };
/// assert_eq!(error.to_string(), "sim.jsonl:3: score decreased from 12 to 7");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    pub item_context: T,
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
