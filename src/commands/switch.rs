//! Switch command handler.

use super::CommandContext;
use crate::error::Result;
use crate::output::{print_info, print_space_list};
use crate::prompt::checked_choice;
use crate::resolve::{self, SwitchChoice};

/// Enter `space`, or pick one interactively.
///
/// Naming a sleeper (`.zzz/slot-<n>`) wakes it first. The menu leaves out the
/// current space and ends with a wake entry when sleepers exist. Outside a
/// project the user first picks one of the projects under the configured
/// project paths.
pub fn switch_command(ctx: &mut CommandContext<'_>, space: Option<&str>) -> Result<()> {
    let Some(project) = ctx.locate_project()? else {
        return Ok(());
    };

    if let Some(token) = space {
        let target = resolve::resolve_space(&project, token)?;
        if target.is_sleeping() {
            return ctx.wake_and_enter(&project, Some(target.name()));
        }
        ctx.enter("Switched to", &target);
        return Ok(());
    }

    let current = ctx.current_space_name(&project);
    print_space_list(&project, &project.list_spaces()?, current.as_deref());
    let choices = resolve::switch_choices(&project, current.as_deref())?;
    if choices.is_empty() {
        print_info(&format!("No other spaces in {}", project.name()));
        return Ok(());
    }

    let labels: Vec<String> = choices.iter().map(ToString::to_string).collect();
    let question = format!("Switch to a space in {}", project.name());
    let index = ctx.prompt.select(&question, &labels)?;

    match checked_choice(&choices, index)? {
        SwitchChoice::Space(name) => {
            let target = project.space(name)?;
            ctx.enter("Switched to", &target);
            Ok(())
        }
        SwitchChoice::WakeSleeping(_) => ctx.wake_and_enter(&project, None),
    }
}
