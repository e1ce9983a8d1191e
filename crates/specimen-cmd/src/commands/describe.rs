//! Description commands: describe, tab

use specimen_scene::{RenderedDescription, SceneError};

use crate::args::ParsedCommand;
use crate::command::{Command, CommandContext, CommandRegistry, ViewerLike};
use crate::error::{CmdError, CmdResult};

use super::{check_arity, required_text};

pub fn register(registry: &mut CommandRegistry) {
    registry.register(DescribeCommand);
    registry.register(TabCommand);
}

/// Tab bar as text, active tab bracketed
fn tab_lines(description: &RenderedDescription) -> Vec<String> {
    match description.tab_view() {
        Some(view) => {
            let mut lines = vec![format!(" {}", view.title())];
            lines.extend(view.tabs().iter().map(|tab| {
                if view.is_active(&tab.section.id) {
                    format!("  [{}] {}", tab.section.id, tab.section.title)
                } else {
                    format!("   {}  {}", tab.section.id, tab.section.title)
                }
            }));
            lines
        }
        None => vec![" (untabbed description)".to_string()],
    }
}

// ============================================================================
// describe command
// ============================================================================

struct DescribeCommand;

impl Command for DescribeCommand {
    fn name(&self) -> &str {
        "describe"
    }

    fn aliases(&self) -> &[&str] {
        &["info"]
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "describe" shows the info panel of the loaded specimen: the tab bar
    with the active tab marked, or the full panel HTML.

USAGE

    describe [ format ]

ARGUMENTS

    format = tabs or html (default: tabs)

EXAMPLES

    describe
    describe html
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let format = args
            .get(0, "format")
            .map(|v| v.to_text())
            .unwrap_or_else(|| "tabs".to_string());

        let description = ctx.viewer.description().ok_or(SceneError::NoDescription)?;
        let lines = match format.as_str() {
            "tabs" if description.is_tabbed() => tab_lines(description),
            "tabs" | "html" => description.to_html().lines().map(str::to_string).collect(),
            other => {
                return Err(CmdError::invalid_arg(
                    "format",
                    format!("expected tabs or html, got '{}'", other),
                ))
            }
        };

        for line in lines {
            ctx.print(line);
        }
        Ok(())
    }
}

// ============================================================================
// tab command
// ============================================================================

struct TabCommand;

impl Command for TabCommand {
    fn name(&self) -> &str {
        "tab"
    }

    fn help(&self) -> &str {
        r#"
DESCRIPTION

    "tab" switches the info panel to another section. Exactly one tab is
    active at a time.

USAGE

    tab id

ARGUMENTS

    id = overview, features, significance, taxonomy or source

EXAMPLES

    tab taxonomy
"#
    }

    fn execute<'v, 'r>(
        &self,
        ctx: &mut CommandContext<'v, 'r, dyn ViewerLike + 'v>,
        args: &ParsedCommand,
    ) -> CmdResult {
        check_arity(args, 1)?;
        let id = required_text(args, 0, "id")?;

        ctx.viewer.select_tab(&id)?;
        let lines = ctx.viewer.description().map(tab_lines).unwrap_or_default();
        for line in lines {
            ctx.print(line);
        }
        Ok(())
    }
}
