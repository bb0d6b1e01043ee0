//! Rename command handler.

use super::CommandContext;
use crate::error::Result;
use crate::output::print_success;
use crate::resolve;

/// Rename a space within its tier.
///
/// `rename <new>` renames the current space. When the shell was inside the
/// renamed space it is handed the equivalent path under the new name.
pub fn rename_command(
    ctx: &mut CommandContext<'_>,
    first: Option<&str>,
    second: Option<&str>,
) -> Result<()> {
    let project = ctx.require_project()?;
    let current = ctx.current_space_name(&project);
    let args = resolve::rename_arguments(first, second, current.as_deref())?;

    let mut space = resolve::resolve_space(&project, &args.old)?;
    let old_path = space.path().to_path_buf();
    space.rename(&args.new)?;
    print_success(&format!("Renamed '{}' to '{}'", args.old, space.name()));

    if let Ok(rel) = ctx.cwd.strip_prefix(&old_path) {
        let inside = space.path().join(rel);
        let target = if inside.is_dir() {
            inside
        } else {
            space.path().to_path_buf()
        };
        ctx.handoff.write(&target);
    }
    Ok(())
}
