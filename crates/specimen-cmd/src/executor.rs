//! Command executor
//!
//! Dispatches and executes commands against a ViewerLike implementation.

use crate::args::ParsedCommand;
use crate::command::{CommandContext, CommandRegistry, OutputMessage, ViewerLike};
use crate::error::{CmdError, CmdResult};
use crate::history::CommandHistory;
use crate::parser::{parse_command, parse_commands};

/// Output lines produced by one or more commands
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub messages: Vec<OutputMessage>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message texts in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|m| m.text.as_str())
    }
}

/// Command executor
///
/// Owns the registry and the history of executed lines.
pub struct CommandExecutor {
    registry: CommandRegistry,
    history: CommandHistory,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    /// Create a new executor with built-in commands
    pub fn new() -> Self {
        Self::with_registry(CommandRegistry::with_builtins())
    }

    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            history: CommandHistory::new(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    /// Execute a single command line
    ///
    /// Empty lines and `#` comments succeed with no output.
    ///
    /// # Example
    /// ```
    /// use specimen_catalog::builtin_catalog;
    /// use specimen_cmd::CommandExecutor;
    /// use specimen_scene::Viewer;
    ///
    /// let mut viewer = Viewer::with_catalog(builtin_catalog());
    /// let mut executor = CommandExecutor::new();
    ///
    /// executor.do_(&mut viewer, "load ammonite").unwrap();
    /// executor.do_(&mut viewer, "hide septa").unwrap();
    /// assert_eq!(viewer.component("septa").map(|c| c.visible), Some(false));
    /// ```
    pub fn do_(&mut self, viewer: &mut dyn ViewerLike, cmd: &str) -> CmdResult<CommandOutput> {
        self.do_with_options(viewer, cmd, false)
    }

    /// Execute a command line, optionally suppressing informational output
    pub fn do_with_options(
        &mut self,
        viewer: &mut dyn ViewerLike,
        cmd: &str,
        quiet: bool,
    ) -> CmdResult<CommandOutput> {
        let cmd = cmd.trim();
        if cmd.is_empty() || cmd.starts_with('#') {
            return Ok(CommandOutput::new());
        }

        self.history.push(cmd);
        let parsed = parse_command(cmd)?;
        self.dispatch(viewer, &parsed, quiet)
    }

    /// Execute several commands (semicolon or newline separated)
    ///
    /// Stops at the first failing command; output gathered so far is discarded
    /// with it.
    pub fn do_multi(
        &mut self,
        viewer: &mut dyn ViewerLike,
        cmds: &str,
    ) -> CmdResult<CommandOutput> {
        let mut output = CommandOutput::new();
        for parsed in parse_commands(cmds)? {
            self.history.push(parsed.to_string());
            let step = self.dispatch(viewer, &parsed, false)?;
            output.messages.extend(step.messages);
        }
        Ok(output)
    }

    fn dispatch(
        &self,
        viewer: &mut dyn ViewerLike,
        parsed: &ParsedCommand,
        quiet: bool,
    ) -> CmdResult<CommandOutput> {
        let command = self
            .registry
            .get(&parsed.name)
            .ok_or_else(|| CmdError::UnknownCommand(parsed.name.clone()))?;

        log::debug!("Executing '{}'", parsed);
        let mut ctx = CommandContext::new(viewer)
            .with_quiet(quiet)
            .with_registry(&self.registry);
        command.execute(&mut ctx, parsed)?;

        Ok(CommandOutput {
            messages: ctx.take_output(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specimen_catalog::builtin_catalog;
    use specimen_scene::Viewer;

    fn viewer() -> Viewer {
        Viewer::with_catalog(builtin_catalog())
    }

    #[test]
    fn test_comments_and_blanks_are_noops() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        assert!(executor.do_(&mut viewer, "   ").unwrap().is_empty());
        assert!(executor.do_(&mut viewer, "# load ammonite").unwrap().is_empty());
        assert!(executor.history().is_empty());
        assert!(viewer.specimen().is_none());
    }

    #[test]
    fn test_unknown_command() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        let err = executor.do_(&mut viewer, "explode ammonite").unwrap_err();
        assert!(matches!(err, CmdError::UnknownCommand(name) if name == "explode"));
        assert_eq!(executor.history().len(), 1);
    }

    #[test]
    fn test_quiet_suppresses_info() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        let output = executor
            .do_with_options(&mut viewer, "load geode", true)
            .unwrap();
        assert!(output.is_empty());
        assert_eq!(viewer.specimen().map(|s| s.key.as_str()), Some("geode"));
    }

    #[test]
    fn test_single_line_rejects_separator() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        let err = executor.do_(&mut viewer, "load ammonite; load geode").unwrap_err();
        assert!(matches!(err, CmdError::Parse(_)));
        assert!(viewer.specimen().is_none());
    }

    #[test]
    fn test_do_multi_stops_at_first_error() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        let err = executor
            .do_multi(&mut viewer, "load trilobite; hide gills; hide eyes")
            .unwrap_err();
        assert!(matches!(err, CmdError::Scene(_)));
        assert_eq!(viewer.component("eyes").map(|c| c.visible), Some(true));
        assert_eq!(
            executor.history().iter().collect::<Vec<_>>(),
            ["load trilobite", "hide gills"]
        );
    }

    #[test]
    fn test_do_multi_collects_output() {
        let mut viewer = viewer();
        let mut executor = CommandExecutor::new();

        let output = executor
            .do_multi(&mut viewer, "load ammonite\nhide septa")
            .unwrap();
        assert!(output.lines().any(|l| l.contains("Ammonite")));
        assert!(output.lines().any(|l| l.contains("septa")));
    }
}
