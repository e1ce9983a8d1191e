//! Command implementations
//!
//! Built-in commands organized by category.

pub mod control;
pub mod describe;
pub mod diagnostics;
pub mod display;
pub mod specimen;
pub mod viewing;

use crate::args::ParsedCommand;
use crate::command::CommandRegistry;
use crate::error::{CmdError, CmdResult};

/// Register all built-in commands with the registry
pub fn register_all(registry: &mut CommandRegistry) {
    specimen::register(registry);
    display::register(registry);
    viewing::register(registry);
    describe::register(registry);
    diagnostics::register(registry);
    control::register(registry);
}

/// Positional argument `index` or named argument `name`, as text
fn required_text(args: &ParsedCommand, index: usize, name: &str) -> CmdResult<String> {
    args.get(index, name)
        .map(|v| v.to_text())
        .ok_or_else(|| CmdError::MissingArgument(name.to_string()))
}

/// Optional on/off argument
fn optional_switch(args: &ParsedCommand, index: usize, name: &str) -> CmdResult<Option<bool>> {
    match args.get(index, name) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| {
                CmdError::invalid_arg(name, format!("expected on or off, got '{}'", value))
            }),
    }
}

/// Reject positional arguments past `max`
fn check_arity(args: &ParsedCommand, max: usize) -> CmdResult {
    let got = args.args.iter().filter(|(name, _)| name.is_none()).count();
    if got > max {
        return Err(CmdError::TooManyArguments { expected: max, got });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use specimen_catalog::builtin_catalog;
    use specimen_scene::Viewer;

    use crate::executor::{CommandExecutor, CommandOutput};
    use crate::error::CmdResult;

    pub struct Shell {
        pub viewer: Viewer,
        pub executor: CommandExecutor,
    }

    impl Shell {
        pub fn new() -> Self {
            Self {
                viewer: Viewer::with_catalog(builtin_catalog()),
                executor: CommandExecutor::new(),
            }
        }

        pub fn run(&mut self, line: &str) -> CmdResult<CommandOutput> {
            self.executor.do_(&mut self.viewer, line)
        }

        /// Output text of a command expected to succeed
        pub fn text(&mut self, line: &str) -> String {
            self.run(line)
                .unwrap()
                .lines()
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}
