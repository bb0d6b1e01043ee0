//! Sleep command handler.

use super::CommandContext;
use crate::error::{GitspacesError, Result};
use crate::output::print_success;
use crate::resolve;

/// Put a space to sleep.
///
/// Without a name the current space is used, or the user picks an active one.
/// When other sleepers were already waiting, offers to wake one of them in its
/// place. If the shell was inside the slept space and nothing was woken, it
/// is sent to the project root.
pub fn sleep_command(ctx: &mut CommandContext<'_>, space: Option<&str>) -> Result<()> {
    let project = ctx.require_project()?;

    let name = match space {
        Some(token) => token.to_string(),
        None => match ctx.current_space_name(&project) {
            Some(current) => current,
            None => {
                let active = project.active_space_names()?;
                if active.is_empty() {
                    return Err(GitspacesError::Usage(
                        "No active spaces to put to sleep".to_string(),
                    ));
                }
                ctx.prompt.choose("Select a space to put to sleep", &active)?
            }
        },
    };

    let waiting = project.sleeping_space_names()?;
    let mut target = resolve::resolve_space(&project, &name)?;
    let was_inside = ctx.cwd.starts_with(target.path());

    target.sleep()?;
    print_success(&format!("Space '{}' is now sleeping as {}", name, target.name()));

    if !waiting.is_empty() && ctx.prompt.confirm("Wake a sleeping space?", true)? {
        let sleeper = ctx.prompt.choose("Select a sleeping space to wake", &waiting)?;
        return ctx.wake_and_enter(&project, Some(sleeper));
    }

    if was_inside {
        ctx.handoff.enter(project.root());
    }
    Ok(())
}
