//! Diagnostic commands: orphans

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::CmdResult;

use super::check_arity;

pub fn register(registry: &mut CommandRegistry) {
    registry.register(OrphansCommand);
}

struct OrphansCommand;

impl Command for OrphansCommand {
    fn name(&self) -> &str {
        "orphans"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "orphans" counts label nodes in the scene, label elements in the
    overlay and labels in the manager. The three must agree; after
    "unload" all of them are zero.

USAGE

    orphans
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;
        let report = ctx.viewer.orphan_check();
        if report.is_balanced() {
            ctx.print(format!(" {}", report));
        } else {
            ctx.warn(format!(" Label counts disagree: {}", report));
        }
        Ok(())
    }
}
