//! Version-control collaborator.
//!
//! The space model only needs three things from git: cloning a URL into a
//! directory, telling whether a directory is its own repository, and reading
//! the branch checked out there. They sit behind [`VersionControl`] so the
//! state machine can be exercised without a git binary.

use crate::error::{GitspacesError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Branch name reported when HEAD is detached or no repository is present.
pub const DETACHED_BRANCH: &str = "detached";

pub trait VersionControl {
    /// Clone `url` into `dest`, which must not exist yet.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Whether `path` is the root of its own repository.
    fn is_valid_repo(&self, path: &Path) -> bool;

    /// The branch checked out at `path`, or `None` if HEAD is detached or
    /// `path` is not a repository.
    fn active_branch(&self, path: &Path) -> Option<String>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl VersionControl for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url, dest = %dest.display(), "git clone");
        let output = Command::new("git")
            .arg("clone")
            .arg("--")
            .arg(url)
            .arg(dest)
            .output()
            .map_err(|e| GitspacesError::VersionControl(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            return Err(GitspacesError::VersionControl(format!(
                "Failed to clone '{}': {}",
                url,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }

    fn is_valid_repo(&self, path: &Path) -> bool {
        // A parent repository must not make a plain directory look valid.
        if !path.join(".git").exists() {
            return false;
        }

        Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn active_branch(&self, path: &Path) -> Option<String> {
        if !self.is_valid_repo(path) {
            return None;
        }

        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["symbolic-ref", "--short", "-q", "HEAD"])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch.is_empty() {
            None
        } else {
            Some(branch)
        }
    }
}

/// Derive a project name from a clone URL: the last path segment with any
/// trailing `.git` removed.
///
/// Handles `https://host/org/repo.git`, `git@host:org/repo.git` and local paths.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches(['/', '\\']);
    let last = trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
