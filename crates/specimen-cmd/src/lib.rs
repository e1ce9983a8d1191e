//! Specimen Viewer Command System
//!
//! Command parsing, registration and execution for the specimen viewer. Every
//! operation the viewer's UI offers (picking a specimen, toggling components,
//! switching description tabs) is also available as a text command, which is
//! what the `specimen-shell` binary runs.
//!
//! # Example
//!
//! ```rust
//! use specimen_catalog::builtin_catalog;
//! use specimen_cmd::CommandExecutor;
//! use specimen_scene::Viewer;
//!
//! let mut viewer = Viewer::with_catalog(builtin_catalog());
//! let mut executor = CommandExecutor::new();
//!
//! executor.do_multi(&mut viewer, "load trilobite; hide eyes; tab taxonomy").unwrap();
//! let output = executor.do_(&mut viewer, "orphans").unwrap();
//! assert_eq!(
//!     output.lines().next(),
//!     Some(" scene labels: 6, overlay elements: 6, registered labels: 6")
//! );
//! ```
//!
//! # Architecture
//!
//! - **Parser**: turns command lines into [`ParsedCommand`] values (nom)
//! - **Command trait**: interface implemented by each built-in command
//! - **CommandRegistry**: maps names and aliases to implementations
//! - **CommandExecutor**: dispatches commands and keeps the history

mod args;
mod command;
pub mod commands;
mod error;
mod executor;
mod history;
mod parser;

pub use args::{ArgValue, ParsedCommand};
pub use command::{Command, CommandContext, CommandRegistry, MessageKind, OutputMessage, ViewerLike};
pub use error::{CmdError, CmdResult, ParseError};
pub use executor::{CommandExecutor, CommandOutput};
pub use history::CommandHistory;
pub use parser::{parse_command, parse_commands};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::args::{ArgValue, ParsedCommand};
    pub use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
    pub use crate::error::{CmdError, CmdResult};
    pub use crate::executor::CommandExecutor;
}
