//! CLI command handlers for gitspaces.
//!
//! Each command has its own module with a handler function.
//!
//! # Commands
//!
//! - [`switch`] - Enter another space (the default command)
//! - [`sleep`] - Park an active space
//! - [`rename`] - Rename a space within its tier
//! - [`extend`] - Add sleeping copies of a space
//! - [`clone`] - Create a project from a repository URL
//! - [`code`] - Open a space in the configured editor
//! - [`config`] - Show or change settings
//! - [`setup`] - Interactive first-time configuration

mod clone;
mod code;
mod config;
mod extend;
mod rename;
mod setup;
mod sleep;
mod switch;

pub use clone::clone_command;
pub use code::code_command;
pub use config::config_command;
pub use extend::extend_command;
pub use rename::rename_command;
pub use setup::setup_command;
pub use sleep::sleep_command;
pub use switch::switch_command;

use crate::config::Config;
use crate::error::{GitspacesError, Result};
use crate::fsops;
use crate::git::VersionControl;
use crate::handoff::ShellHandoff;
use crate::output::{print_entered, print_info};
use crate::project::Project;
use crate::prompt::{checked_choice, Prompter};
use crate::resolve;
use crate::space::Space;
use std::path::PathBuf;

/// Everything a space command needs from the outside world.
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub vcs: &'a dyn VersionControl,
    pub handoff: &'a ShellHandoff,
    pub prompt: &'a mut dyn Prompter,
    /// Working directory the command was started from.
    pub cwd: PathBuf,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        config: &'a Config,
        vcs: &'a dyn VersionControl,
        handoff: &'a ShellHandoff,
        prompt: &'a mut dyn Prompter,
    ) -> Result<Self> {
        let cwd = fsops::current_dir().ok_or_else(|| {
            GitspacesError::Usage("The current directory no longer exists".to_string())
        })?;
        Ok(Self {
            config,
            vcs,
            handoff,
            prompt,
            cwd,
        })
    }

    /// The project containing the working directory.
    pub fn require_project(&self) -> Result<Project> {
        Project::find(&self.cwd).ok_or_else(|| GitspacesError::ProjectNotFound(self.cwd.clone()))
    }

    /// The project containing the working directory, or one picked from the
    /// configured project paths. `None` when there is nothing to pick.
    pub fn locate_project(&mut self) -> Result<Option<Project>> {
        if let Some(project) = Project::find(&self.cwd) {
            return Ok(Some(project));
        }

        let mut projects = Project::find_all(&self.config.project_dirs());
        if projects.is_empty() {
            print_info("No gitspaces projects found. Run 'gitspaces clone <url>' to create one.");
            return Ok(None);
        }

        let names: Vec<String> = projects.iter().map(|p| p.name().to_string()).collect();
        let index = self.prompt.select("Select a project", &names)?;
        checked_choice(&projects, index)?;
        Ok(Some(projects.swap_remove(index)))
    }

    /// Name of the active space holding the working directory.
    pub fn current_space_name(&self, project: &Project) -> Option<String> {
        resolve::current_space(project, &self.cwd).map(|s| s.name())
    }

    /// Hand the shell off to `space` and report it.
    pub fn enter(&self, verb: &str, space: &Space<'_>) {
        self.handoff.enter(space.path());
        print_entered(verb, &space.name(), space.path());
    }

    /// Wake a sleeper and enter it. Without `sleeper` the user picks one; the
    /// user is always asked for the name, defaulting to the branch name.
    pub fn wake_and_enter(&mut self, project: &Project, sleeper: Option<String>) -> Result<()> {
        let sleeper = match sleeper {
            Some(name) => name,
            None => {
                let sleepers = project.sleeping_space_names()?;
                if sleepers.is_empty() {
                    return Err(GitspacesError::Usage(
                        "There are no sleeping spaces to wake".to_string(),
                    ));
                }
                self.prompt.choose("Select a sleeping space to wake", &sleepers)?
            }
        };

        let mut space = resolve::resolve_space(project, &sleeper)?;
        let suggested = space.default_wake_name(self.vcs);
        let name = self.prompt.input("Name for the woken space", &suggested)?;
        space.wake(Some(name.trim()), self.vcs)?;

        self.enter("Woke and entered", &space);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use crate::test_utils::{make_project, set_branch, Answer, CwdGuard, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_require_project_outside_is_project_not_found() {
        let temp = TempDir::new().unwrap();
        let mut h = Harness::new(temp.path(), &temp.path().join("user"), ScriptedPrompter::default());

        let err = h.ctx().require_project().unwrap_err();
        assert!(matches!(err, crate::error::GitspacesError::ProjectNotFound(_)));
    }

    #[test]
    fn test_locate_project_picks_from_project_paths() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("code");
        std::fs::create_dir_all(&code).unwrap();
        let project = make_project(&code, &["main"], 0);
        let mut h = Harness::new(
            temp.path(),
            &temp.path().join("user"),
            ScriptedPrompter::new([Answer::Select(0)]),
        );
        h.config.project_paths = vec![code.to_string_lossy().into_owned()];

        let found = h.ctx().locate_project().unwrap();
        assert_eq!(found, Some(project));
        assert_eq!(h.prompt.offered, vec![vec!["proj".to_string()]]);
    }

    #[test]
    fn test_locate_project_with_nothing_configured() {
        let temp = TempDir::new().unwrap();
        let mut h = Harness::new(temp.path(), &temp.path().join("user"), ScriptedPrompter::default());

        assert_eq!(h.ctx().locate_project().unwrap(), None);
    }

    #[test]
    fn test_wake_and_enter_suggests_branch_name() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 2);
        set_branch(&project.sleeper_dir().join("slot-1"), "release/2.0");
        let _cwd = CwdGuard::hold();
        let mut h = Harness::new(
            project.root(),
            &temp.path().join("user"),
            ScriptedPrompter::new([Answer::Select(1), Answer::Input(String::new())]),
        );

        h.ctx().wake_and_enter(&project, None).unwrap();

        let woken = project.root().join("release-2.0");
        assert!(woken.is_dir());
        assert_eq!(h.handed_off(), Some(woken));
        assert_eq!(project.sleeping_space_names().unwrap(), vec![".zzz/slot-0"]);
    }

    #[test]
    fn test_locate_project_out_of_range_selection_is_usage_error() {
        let temp = TempDir::new().unwrap();
        let code = temp.path().join("code");
        std::fs::create_dir_all(&code).unwrap();
        make_project(&code, &["main"], 0);
        let mut h = Harness::new(
            temp.path(),
            &temp.path().join("user"),
            ScriptedPrompter::new([Answer::Select(1)]),
        );
        h.config.project_paths = vec![code.to_string_lossy().into_owned()];

        let err = h.ctx().locate_project().unwrap_err();
        assert!(matches!(err, crate::error::GitspacesError::Usage(_)));
    }
}
