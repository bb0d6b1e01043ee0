//! Extend command handler.

use super::CommandContext;
use crate::error::{GitspacesError, Result};
use crate::output::{print_info, print_spaces_added};
use crate::progress::Spinner;
use crate::resolve;

/// Add `count` sleeping copies of a space to the current project.
///
/// The source is `space` if given, else the current space, else the first
/// space of the project. Copies made before a failure are kept.
pub fn extend_command(
    ctx: &mut CommandContext<'_>,
    count: usize,
    space: Option<&str>,
) -> Result<()> {
    if count == 0 {
        return Err(GitspacesError::Usage(
            "The number of spaces must be at least 1".to_string(),
        ));
    }

    let project = ctx.require_project()?;
    let current = resolve::current_space(&project, &ctx.cwd);
    let source = resolve::extend_source(&project, space, current)?;
    print_info(&format!(
        "Copying '{}' into {} new space{}",
        source.name(),
        count,
        if count == 1 { "" } else { "s" }
    ));

    let spinner = Spinner::new(&format!("Copying {}", source.name()));
    let mut created = Vec::with_capacity(count);
    for i in 1..=count {
        spinner.update(&format!("Copying {} ({}/{})", source.name(), i, count));
        created.push(source.duplicate()?.name());
    }
    spinner.finish_success(&format!("Created {}", created.join(", ")));

    print_spaces_added(count, project.list_spaces()?.len());
    Ok(())
}
