//! Error types for the command system
//!
//! This module defines error types for command parsing and execution.

use specimen_scene::SceneError;
use specimen_settings::SettingError;
use thiserror::Error;

/// Result type for command operations
pub type CmdResult<T = ()> = Result<T, CmdError>;

/// Errors that can occur during command execution
#[derive(Debug, Error)]
pub enum CmdError {
    /// Command parsing failed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Command not found in registry
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Invalid argument provided
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Missing required argument
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Too many arguments provided
    #[error("too many arguments: expected at most {expected}, got {got}")]
    TooManyArguments { expected: usize, got: usize },

    /// Viewer rejected the operation
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Settings could not be loaded
    #[error(transparent)]
    Setting(#[from] SettingError),

    /// Shell asked to exit
    #[error("command aborted")]
    Aborted,

    /// Generic execution error
    #[error("{0}")]
    Execution(String),
}

/// Errors that can occur during command parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected end of input
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Unterminated string
    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),

    /// Empty command
    #[error("empty command")]
    EmptyCommand,

    /// Generic parse error with message
    #[error("{0}")]
    Generic(String),
}

impl From<nom::Err<nom::error::Error<&str>>> for ParseError {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => ParseError::UnexpectedEof,
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let shown: String = e.input.chars().take(20).collect();
                ParseError::Generic(format!("at '{}...'", shown))
            }
        }
    }
}

impl CmdError {
    /// Create an invalid argument error
    pub fn invalid_arg(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CmdError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        CmdError::Execution(msg.into())
    }
}
