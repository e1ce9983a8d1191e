//! Specimen commands: specimens, load, unload

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::CmdResult;

use super::{check_arity, required_text};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(SpecimensCommand);
    registry.register(LoadCommand);
    registry.register(UnloadCommand);
}

// ============================================================================
// specimens command
// ============================================================================

struct SpecimensCommand;

impl Command for SpecimensCommand {
    fn name(&self) -> &str {
        "specimens"
    }

    fn aliases(&self) -> &[&str] {
        &["ls"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "specimens" lists the specimens that can be loaded. The one on
    display is marked with '*'.

USAGE

    specimens
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;

        let loaded = ctx.viewer.specimen().map(|s| s.key.clone());
        let lines: Vec<String> = ctx
            .viewer
            .catalog()
            .iter()
            .map(|factory| {
                let marker = if loaded.as_deref() == Some(factory.key()) { '*' } else { ' ' };
                format!(" {} {:<12} {}", marker, factory.key(), factory.display_name())
            })
            .collect();

        for line in lines {
            ctx.print(line);
        }
        Ok(())
    }
}

// ============================================================================
// load command
// ============================================================================

struct LoadCommand;

impl Command for LoadCommand {
    fn name(&self) -> &str {
        "load"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "load" replaces the specimen on display. The previous specimen, its
    labels and its description are removed first. An unknown key leaves
    the current specimen untouched.

USAGE

    load key

ARGUMENTS

    key = string: specimen key, see "specimens"

EXAMPLES

    load ammonite
    load key=geode
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let key = required_text(args, 0, "key")?;

        let components: Vec<(String, bool)> = ctx
            .viewer
            .load_specimen(&key)?
            .iter()
            .map(|c| (c.display_name.clone(), c.visible))
            .collect();

        let title = ctx
            .viewer
            .specimen()
            .map(|s| s.title.clone())
            .unwrap_or_else(|| key.clone());
        ctx.print(format!(" Loaded {} ({} components)", title, components.len()));
        for (name, visible) in components {
            if visible {
                ctx.print(format!("   {}", name));
            } else {
                ctx.print(format!("   {} (hidden)", name));
            }
        }
        Ok(())
    }
}

// ============================================================================
// unload command
// ============================================================================

struct UnloadCommand;

impl Command for UnloadCommand {
    fn name(&self) -> &str {
        "unload"
    }

    fn aliases(&self) -> &[&str] {
        &["clear"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "unload" removes the specimen on display with its labels and
    description. Running it with nothing loaded does nothing.

USAGE

    unload
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;

        let title = ctx.viewer.specimen().map(|s| s.title.clone());
        let removed = ctx.viewer.unload();
        match title {
            Some(title) => ctx.print(format!(" Unloaded {} ({} labels removed)", title, removed)),
            None => ctx.print(" Nothing loaded"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::Shell;
    use crate::error::CmdError;
    use specimen_scene::SceneError;

    #[test]
    fn test_specimens_marks_loaded() {
        let mut shell = Shell::new();
        let before = shell.text("specimens");
        assert_eq!(before.lines().count(), 3);
        assert!(!before.contains('*'));

        shell.run("load trilobite").unwrap();
        let after = shell.text("ls");
        assert!(after.lines().any(|l| l.starts_with(" * trilobite")));
    }

    #[test]
    fn test_load_lists_components() {
        let mut shell = Shell::new();
        let text = shell.text("load ammonite");
        assert!(text.starts_with(" Loaded Ammonite (4 components)"));
        assert!(text.contains("Suture Lines (hidden)"));
    }

    #[test]
    fn test_load_named_argument() {
        let mut shell = Shell::new();
        shell.run("load key=geode").unwrap();
        assert_eq!(shell.viewer.specimen().unwrap().title, "Amethyst Geode");
    }

    #[test]
    fn test_load_errors() {
        let mut shell = Shell::new();
        assert!(matches!(shell.run("load"), Err(CmdError::MissingArgument(_))));
        assert!(matches!(
            shell.run("load coelacanth"),
            Err(CmdError::Scene(SceneError::UnknownSpecimen(_)))
        ));
        assert!(matches!(
            shell.run("load geode ammonite"),
            Err(CmdError::TooManyArguments { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_unload_twice() {
        let mut shell = Shell::new();
        shell.run("load geode").unwrap();
        assert_eq!(shell.text("unload"), " Unloaded Amethyst Geode (4 labels removed)");
        assert_eq!(shell.text("clear"), " Nothing loaded");
        assert!(shell.viewer.orphan_check().is_clean());
    }
}
