//! Setup command handler.

use crate::config::{expand_home, Config};
use crate::error::{GitspacesError, Result};
use crate::fsops;
use crate::output::{print_success, print_warning, BOLD, RESET};
use crate::prompt::Prompter;
use std::path::Path;

/// Ask for the project directories and the editor, then save to `path`.
///
/// At least one project directory is required. Directories that do not exist
/// are created after confirmation.
pub fn setup_command(
    prompt: &mut dyn Prompter,
    config: &mut Config,
    path: Option<&Path>,
) -> Result<()> {
    let path = path.ok_or_else(|| {
        GitspacesError::Config("Could not determine home directory".to_string())
    })?;

    println!("{BOLD}gitspaces setup{RESET}");
    println!();

    let mut paths: Vec<String> = Vec::new();
    loop {
        let answer = prompt.input("Project directory (empty to finish)", "")?;
        let answer = answer.trim();
        if answer.is_empty() {
            if paths.is_empty() {
                print_warning("At least one project directory is required.");
                continue;
            }
            break;
        }

        let dir = expand_home(answer);
        if !fsops::dir_exists(&dir) {
            let question = format!("{} does not exist. Create it?", dir.display());
            if !prompt.confirm(&question, true)? {
                continue;
            }
            fsops::ensure_dir(&dir)?;
        }

        let dir = dir.canonicalize()?.to_string_lossy().into_owned();
        if !paths.contains(&dir) {
            paths.push(dir);
        }
    }

    let editor = prompt.input("Editor command", &config.default_editor)?;
    config.project_paths = paths;
    config.default_editor = editor.trim().to_string();
    config.save_to(path)?;

    print_success(&format!("Saved {}", path.display()));
    Ok(())
}
