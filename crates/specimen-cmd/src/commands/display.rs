//! Display commands: components, show, hide, toggle

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::{CmdError, CmdResult};

use super::{check_arity, optional_switch, required_text};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(ComponentsCommand);
    registry.register(ShowCommand);
    registry.register(HideCommand);
    registry.register(ToggleCommand);
}

/// Apply a visibility change and report it
fn set_visible<'v, 'r>(
    ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
    name: &str,
    visible: bool,
) -> CmdResult {
    ctx.viewer.toggle_component(name, visible)?;
    let verb = if visible { "Showing" } else { "Hiding" };
    ctx.print(format!(" {} '{}'", verb, name));
    Ok(())
}

// ============================================================================
// components command
// ============================================================================

struct ComponentsCommand;

impl Command for ComponentsCommand {
    fn name(&self) -> &str {
        "components"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "components" lists the toggleable parts of the loaded specimen with
    their visibility and label count.

USAGE

    components
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 0)?;
        if ctx.viewer.specimen().is_none() {
            return Err(CmdError::execution("no specimen loaded"));
        }

        let lines: Vec<String> = ctx
            .viewer
            .components()
            .iter()
            .map(|c| {
                format!(
                    " {:<12} {:<20} {:<7} {} labels",
                    c.name,
                    c.display_name,
                    if c.visible { "shown" } else { "hidden" },
                    c.labels().len()
                )
            })
            .collect();
        for line in lines {
            ctx.print(line);
        }
        Ok(())
    }
}

// ============================================================================
// show / hide commands
// ============================================================================

struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "show" makes a component and its labels visible.

USAGE

    show name

EXAMPLES

    show sutures
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let name = required_text(args, 0, "name")?;
        set_visible(ctx, &name, true)
    }
}

struct HideCommand;

impl Command for HideCommand {
    fn name(&self) -> &str {
        "hide"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "hide" hides a component and its labels.

USAGE

    hide name

EXAMPLES

    hide shell
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let name = required_text(args, 0, "name")?;
        set_visible(ctx, &name, false)
    }
}

// ============================================================================
// toggle command
// ============================================================================

struct ToggleCommand;

impl Command for ToggleCommand {
    fn name(&self) -> &str {
        "toggle"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "toggle" sets a component's visibility, or flips it when no state is
    given. The component's labels follow.

USAGE

    toggle name [, visible ]

ARGUMENTS

    name = string: component name, see "components"
    visible = on/off (default: flip)

EXAMPLES

    toggle septa
    toggle septa, off
    toggle name=eyes, visible=on
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 2)?;
        let name = required_text(args, 0, "name")?;

        let visible = match optional_switch(args, 1, "visible")? {
            Some(visible) => visible,
            None => {
                let current = ctx
                    .viewer
                    .is_component_visible(&name)
                    .ok_or_else(|| specimen_scene::SceneError::ComponentNotFound(name.clone()))?;
                !current
            }
        };
        set_visible(ctx, &name, visible)
    }
}
