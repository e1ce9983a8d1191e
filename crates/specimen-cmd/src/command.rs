//! Command trait and registry
//!
//! Defines the interface for commands and the registry that maps names to implementations.

use std::sync::Arc;

use ahash::AHashMap;

pub use specimen_scene::ViewerLike;

use crate::args::ParsedCommand;
use crate::error::CmdResult;

/// Severity of a line of command output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// One line of command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl OutputMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            text: text.into(),
        }
    }
}

/// Command execution context
///
/// Provides access to the viewer, the registry (for `help`) and collects
/// output lines. Generic over `V: ViewerLike` to support different viewer
/// implementations.
pub struct CommandContext<'v, 'r, V: ViewerLike + ?Sized> {
    pub viewer: &'v mut V,
    /// Registry the command was dispatched from, if any
    pub registry: Option<&'r CommandRegistry>,
    /// Suppress informational output
    pub quiet: bool,
    output: Vec<OutputMessage>,
}

impl<'v, 'r, V: ViewerLike + ?Sized> CommandContext<'v, 'r, V> {
    pub fn new(viewer: &'v mut V) -> Self {
        Self {
            viewer,
            registry: None,
            quiet: false,
            output: Vec::new(),
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_registry(mut self, registry: &'r CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Record an output line (unless quiet mode is enabled)
    pub fn print(&mut self, msg: impl Into<String>) {
        if !self.quiet {
            let msg = msg.into();
            log::info!("{}", msg);
            self.output.push(OutputMessage::info(msg));
        }
    }

    /// Record a warning (even in quiet mode)
    pub fn warn(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::warn!("{}", msg);
        self.output.push(OutputMessage::warning(msg));
    }

    /// Take the collected output, leaving the context empty
    pub fn take_output(&mut self) -> Vec<OutputMessage> {
        std::mem::take(&mut self.output)
    }
}

/// Trait for command implementations
pub trait Command: Send + Sync {
    fn name(&self) -> &str;

    /// Execute the command against the viewer in `ctx`
    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult;

    /// Get help text for this command
    fn help(&self) -> &str {
        "No help available."
    }

    fn aliases(&self) -> &[&str] {
        &[]
    }
}

/// Registry mapping command names to implementations
#[derive(Default)]
pub struct CommandRegistry {
    commands: AHashMap<String, Arc<dyn Command>>,
    /// alias -> command name
    aliases: AHashMap<String, String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in commands registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::commands::register_all(&mut registry);
        registry
    }

    /// Register a command and its aliases, replacing any previous holder of the name
    pub fn register<C: Command + 'static>(&mut self, cmd: C) {
        let name = cmd.name().to_string();
        for alias in cmd.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
        }
        self.commands.insert(name, Arc::new(cmd));
    }

    /// Look up a command by name or alias
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(cmd.clone());
        }
        self.aliases
            .get(name)
            .and_then(|real| self.commands.get(real))
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Command names (not aliases), sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Command names and aliases
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.commands
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCommand {
        name: String,
    }

    impl Command for TestCommand {
        fn name(&self) -> &str {
            &self.name
        }

        fn execute<'v, 'r>(
            &self,
            _ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
            _args: &ParsedCommand,
        ) -> CmdResult {
            Ok(())
        }

        fn aliases(&self) -> &[&str] {
            &["test_alias"]
        }
    }

    #[test]
    fn test_registry() {
        let mut registry = CommandRegistry::new();
        registry.register(TestCommand {
            name: "test".to_string(),
        });

        assert!(registry.contains("test"));
        assert!(registry.contains("test_alias"));
        assert!(!registry.contains("unknown"));
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.get("test").unwrap().name(), "test");
        assert_eq!(registry.get("test_alias").unwrap().name(), "test");
        assert_eq!(registry.all_names().count(), 2);
    }

    #[test]
    fn test_builtins_cover_shell_commands() {
        let registry = CommandRegistry::with_builtins();
        for name in [
            "specimens", "load", "components", "show", "hide", "toggle", "reset",
            "crosssection", "orphans", "describe", "tab", "help",
        ] {
            assert!(registry.contains(name), "missing command '{name}'");
        }
    }
}
