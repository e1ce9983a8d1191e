//! Control commands: help, quit

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::{CmdError, CmdResult};

use super::check_arity;

pub fn register(registry: &mut CommandRegistry) {
    registry.register(HelpCommand);
    registry.register(QuitCommand);
}

// ============================================================================
// help command
// ============================================================================

struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "help" lists the available commands, or shows help for one of them.

USAGE

    help [ command ]

ARGUMENTS

    command = string: command or alias (default: list commands)

EXAMPLES

    help
    help toggle
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let registry = ctx
            .registry
            .ok_or_else(|| CmdError::execution("command registry not available"))?;

        match args.get(0, "command").map(|v| v.to_text()) {
            Some(name) => {
                let cmd = registry
                    .get(&name)
                    .ok_or_else(|| CmdError::UnknownCommand(name.clone()))?;
                for line in cmd.help().trim_matches('\n').lines() {
                    ctx.print(line.to_string());
                }
            }
            None => {
                ctx.print(" Available commands:");
                ctx.print(format!("   {}", registry.names().join(", ")));
                ctx.print(" Type 'help <command>' for detailed help");
            }
        }
        Ok(())
    }
}

// ============================================================================
// quit command
// ============================================================================

struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "quit" leaves the shell.

USAGE

    quit
"#
    }

    fn execute<'v, 'r>(
        &self,
        _ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        _args: &ParsedCommand,
    ) -> CmdResult {
        Err(CmdError::Aborted)
    }
}
