//! Space model and its lifecycle.
//!
//! A space is one clone of the project's repository. It is either *active*
//! (a named directory directly under the project root) or *sleeping* (a
//! numbered slot under the hidden sleeper directory). Which one is never
//! stored: it is read off the path every time.
//!
//! | From            | Operation | To       |
//! |-----------------|-----------|----------|
//! | -               | create    | caller's path (a slot when creating a project) |
//! | any             | duplicate | new sleeping copy, source untouched |
//! | active          | sleep     | sleeping |
//! | sleeping        | wake      | active   |
//! | any             | rename    | same tier |
//!
//! Every transition checks its destination first and then performs a single
//! move or staged copy, so a failed transition leaves the filesystem as it was.

use crate::error::{GitspacesError, Result};
use crate::fsops;
use crate::git::{VersionControl, DETACHED_BRANCH};
use crate::project::{parse_slot, slot_name, validate_space_name, Project, SLEEPER_DIR};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name used when waking a space whose branch cannot be determined.
pub const DEFAULT_SPACE_NAME: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space<'p> {
    project: &'p Project,
    path: PathBuf,
}

impl<'p> Space<'p> {
    pub fn new(project: &'p Project, path: impl Into<PathBuf>) -> Self {
        Self {
            project,
            path: path.into(),
        }
    }

    /// Clone `url` into `dest` and return the new space.
    pub fn create_from_url(
        project: &'p Project,
        url: &str,
        dest: &Path,
        vcs: &dyn VersionControl,
    ) -> Result<Self> {
        if fsops::path_exists(dest) {
            return Err(GitspacesError::TargetExists(dest.to_path_buf()));
        }
        vcs.clone_repo(url, dest)?;
        Ok(Self::new(project, dest))
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory name for an active space, `.zzz/<slot>` for a sleeping one.
    pub fn name(&self) -> String {
        let dir_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.is_sleeping() {
            format!("{SLEEPER_DIR}/{dir_name}")
        } else {
            dir_name
        }
    }

    pub fn is_sleeping(&self) -> bool {
        self.path.starts_with(self.project.sleeper_dir())
    }

    /// Copy this space into the next free sleeper slot. Symlinks are copied as
    /// symlinks and the source is left untouched.
    pub fn duplicate(&self) -> Result<Space<'p>> {
        let dest = self.project.next_free_slot_path();
        debug!(source = %self.name(), dest = %dest.display(), "duplicating space");
        fsops::copy_tree_staged(&self.path, &dest)?;
        Ok(Space::new(self.project, dest))
    }

    /// Park an active space in the next free sleeper slot.
    pub fn sleep(&mut self) -> Result<()> {
        if self.is_sleeping() {
            return Err(GitspacesError::AlreadyAsleep(self.name()));
        }
        let dest = self.project.next_free_slot_path();
        debug!(space = %self.name(), dest = %dest.display(), "putting space to sleep");
        self.move_to(dest)
    }

    /// Move a sleeping space out to `<root>/<name>`.
    ///
    /// Without a name the space is named after its checked-out branch, or
    /// [`DEFAULT_SPACE_NAME`] when no branch can be determined.
    pub fn wake(&mut self, new_name: Option<&str>, vcs: &dyn VersionControl) -> Result<()> {
        if !self.is_sleeping() {
            return Err(GitspacesError::NotAsleep(self.name()));
        }
        let name = match new_name {
            Some(name) => name.to_string(),
            None => self.default_wake_name(vcs),
        };
        validate_space_name(&name)?;

        let dest = self.project.root().join(&name);
        debug!(space = %self.name(), dest = %dest.display(), "waking space");
        self.move_to(dest)
    }

    /// Rename within the current tier.
    ///
    /// Active spaces take any valid space name. Sleeping spaces can only move
    /// to another slot, given as `slot-<n>` or `.zzz/slot-<n>`.
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        let dest = if self.is_sleeping() {
            let slot = parse_slot(new_name).ok_or_else(|| {
                GitspacesError::invalid_name(
                    new_name,
                    "sleeping spaces can only be renamed to another slot (slot-<n>); wake it to give it a name",
                )
            })?;
            self.project.sleeper_dir().join(slot_name(slot))
        } else {
            validate_space_name(new_name)?;
            self.project.root().join(new_name)
        };

        debug!(space = %self.name(), dest = %dest.display(), "renaming space");
        self.move_to(dest)
    }

    /// The checked-out branch, or `"detached"` when HEAD is detached or there
    /// is no repository here. Never fails.
    pub fn current_branch(&self, vcs: &dyn VersionControl) -> String {
        vcs.active_branch(&self.path)
            .unwrap_or_else(|| DETACHED_BRANCH.to_string())
    }

    /// Name a woken space gets when none is given: its branch with path
    /// separators replaced by `-`, or `main`.
    pub fn default_wake_name(&self, vcs: &dyn VersionControl) -> String {
        vcs.active_branch(&self.path)
            .map(|branch| branch.replace(['/', '\\'], "-"))
            .filter(|name| validate_space_name(name).is_ok())
            .unwrap_or_else(|| DEFAULT_SPACE_NAME.to_string())
    }

    fn move_to(&mut self, dest: PathBuf) -> Result<()> {
        if fsops::path_exists(&dest) {
            return Err(GitspacesError::TargetExists(dest));
        }
        fsops::move_dir(&self.path, &dest)?;
        self.path = dest;
        Ok(())
    }
}
