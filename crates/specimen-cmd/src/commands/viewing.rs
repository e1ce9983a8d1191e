//! Viewing commands: reset, crosssection

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::CmdResult;

use super::check_arity;

pub fn register(registry: &mut CommandRegistry) {
    registry.register(ResetCommand);
    registry.register(CrossSectionCommand);
}

// ============================================================================
// reset command
// ============================================================================

struct ResetCommand;

impl Command for ResetCommand {
    fn name(&self) -> &str {
        "reset"
    }

    fn aliases(&self) -> &[&str] {
        &["home"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "reset" returns the camera to the view set when the specimen was
    loaded.

USAGE

    reset
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;
        ctx.viewer.reset_camera();
        ctx.print(" Camera reset");
        Ok(())
    }
}

// ============================================================================
// crosssection command
// ============================================================================

struct CrossSectionCommand;

impl Command for CrossSectionCommand {
    fn name(&self) -> &str {
        "crosssection"
    }

    fn aliases(&self) -> &[&str] {
        &["cut"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "crosssection" flips the clipping plane that cuts the specimen open.
    Loading a specimen turns it off.

USAGE

    crosssection
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;
        let enabled = ctx.viewer.toggle_cross_section();
        ctx.print(format!(" Cross-section {}", if enabled { "on" } else { "off" }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::Shell;

    #[test]
    fn test_crosssection_flips() {
        let mut shell = Shell::new();
        shell.run("load geode").unwrap();

        assert_eq!(shell.text("crosssection"), " Cross-section on");
        assert!(shell.viewer.cross_section().enabled);
        assert_eq!(shell.text("cut"), " Cross-section off");

        shell.run("cut").unwrap();
        shell.run("load ammonite").unwrap();
        assert!(!shell.viewer.cross_section().enabled);
    }

    #[test]
    fn test_reset_restores_home() {
        let mut shell = Shell::new();
        shell.run("load trilobite").unwrap();
        let home = shell.viewer.camera().world_position();

        shell.viewer.camera_mut().zoom(40.0);
        assert_ne!(shell.viewer.camera().world_position(), home);

        assert_eq!(shell.text("reset"), " Camera reset");
        assert_eq!(shell.viewer.camera().world_position(), home);
    }
}
