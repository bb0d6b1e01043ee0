//! Clone command handler.

use super::CommandContext;
use crate::config::expand_home;
use crate::error::{GitspacesError, Result};
use crate::output::{print_info, print_project_created};
use crate::progress::Spinner;
use crate::project::Project;
use std::path::{Path, PathBuf};

/// Create a project from `url` with `count` sleeping spaces, then offer to
/// wake the first one and enter it.
///
/// The project goes under `directory`, else the first configured project
/// path, else the working directory.
pub fn clone_command(
    ctx: &mut CommandContext<'_>,
    url: &str,
    count: usize,
    directory: Option<&Path>,
) -> Result<()> {
    if count == 0 {
        return Err(GitspacesError::Usage(
            "The number of spaces must be at least 1".to_string(),
        ));
    }

    let target_dir = target_directory(ctx, directory);
    let spinner = Spinner::new(&format!("Cloning {} into {}", url, target_dir.display()));
    let project = Project::create(&target_dir, url, count, ctx.vcs)?;
    spinner.finish_success(&format!("Cloned {}", url));
    print_project_created(&project, count);

    if !ctx.prompt.confirm("Wake the first space now?", true)? {
        print_info("Use 'gitspaces switch' inside the project to wake a space.");
        return Ok(());
    }

    let first = project.sleeping_space_names()?.into_iter().next();
    ctx.wake_and_enter(&project, first)
}

fn target_directory(ctx: &CommandContext<'_>, directory: Option<&Path>) -> PathBuf {
    let dir = match directory {
        Some(dir) => expand_home(&dir.to_string_lossy()),
        None => match ctx.config.project_dirs().into_iter().next() {
            Some(dir) => dir,
            None => return ctx.cwd.clone(),
        },
    };
    if dir.is_absolute() {
        dir
    } else {
        ctx.cwd.join(dir)
    }
}
