//! Code command handler.

use super::CommandContext;
use crate::error::{GitspacesError, Result};
use crate::output::print_success;
use crate::resolve;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Open a space in the configured editor.
///
/// Without a name the current space is opened, or the user picks an active
/// one.
pub fn code_command(ctx: &mut CommandContext<'_>, space: Option<&str>) -> Result<()> {
    let project = ctx.require_project()?;

    let name = match space {
        Some(token) => token.to_string(),
        None => match ctx.current_space_name(&project) {
            Some(current) => current,
            None => {
                let active = project.active_space_names()?;
                if active.is_empty() {
                    return Err(GitspacesError::Usage(
                        "No active spaces to open".to_string(),
                    ));
                }
                ctx.prompt.choose("Select a space to open", &active)?
            }
        },
    };

    let target = resolve::resolve_space(&project, &name)?;
    open_in_editor(&ctx.config.default_editor, target.path())?;
    print_success(&format!(
        "Opened '{}' in {}",
        target.name(),
        ctx.config.default_editor
    ));
    Ok(())
}

/// Run `editor <path>`. The editor setting may carry extra arguments, as in
/// `code --new-window`.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GitspacesError::Editor("No editor configured".to_string()))?;

    debug!(editor, path = %path.display(), "opening editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GitspacesError::Editor(format!(
                "'{}' not found. Set another one with 'gitspaces config default_editor <editor>'",
                program
            )),
            _ => GitspacesError::Editor(format!("Failed to run '{}': {}", program, e)),
        })?;

    if !status.success() {
        return Err(GitspacesError::Editor(format!(
            "'{}' exited with {}",
            program, status
        )));
    }
    Ok(())
}
