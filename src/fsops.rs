//! Filesystem mutation primitives.
//!
//! Every space transition bottoms out in one of these calls. Moves are plain
//! renames within the project's filesystem; copies are staged under a hidden
//! name and renamed into place once complete.

use crate::error::{GitspacesError, Result};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Check whether a directory exists at `path` (symlinks are followed).
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Check whether anything exists at `path`, including a dangling symlink.
pub fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// The process working directory, canonicalized. `None` if it cannot be read
/// (for example because it was deleted underneath us).
pub fn current_dir() -> Option<PathBuf> {
    env::current_dir().ok().map(|p| p.canonicalize().unwrap_or(p))
}

/// Best-effort change of the process working directory.
///
/// Returns whether the change happened. Failure is logged and otherwise ignored.
pub fn change_dir(path: &Path) -> bool {
    match env::set_current_dir(path) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not change directory");
            false
        }
    }
}

/// Move a directory from `src` to `dst`.
///
/// Fails with `TargetExists` before touching anything if `dst` is taken. When
/// the process working directory lies inside `src`, the process steps out to
/// the parent of `src` for the rename and re-enters the equivalent location
/// under `dst` afterwards (or `dst` itself if that location is gone).
///
/// A symlink at `src` is moved as a link; its target stays where it is.
pub fn move_dir(src: &Path, dst: &Path) -> Result<()> {
    if path_exists(dst) {
        return Err(GitspacesError::TargetExists(dst.to_path_buf()));
    }
    if !path_exists(src) {
        return Err(GitspacesError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source vanished: {}", src.display()),
        )));
    }

    let src_abs = src.canonicalize()?;
    let cwd = current_dir();
    let inside = cwd
        .as_ref()
        .and_then(|c| c.strip_prefix(&src_abs).ok())
        .map(Path::to_path_buf);

    if inside.is_some() {
        if let Some(parent) = src_abs.parent() {
            change_dir(parent);
        }
    }

    debug!(from = %src.display(), to = %dst.display(), "moving directory");
    if let Err(e) = fs::rename(src, dst) {
        if let Some(cwd) = &cwd {
            if inside.is_some() && cwd.exists() {
                change_dir(cwd);
            }
        }
        return Err(e.into());
    }

    if let Some(rel) = inside {
        let new_cwd = dst.join(rel);
        if new_cwd.is_dir() {
            change_dir(&new_cwd);
        } else {
            change_dir(dst);
        }
    }

    Ok(())
}

/// Recursively copy `src` into a new directory `dst`, recreating symlinks as
/// symlinks instead of following them.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy `src` to `dst` through a hidden staging directory next to `dst`.
///
/// `dst` only appears once the copy is complete. A failed copy removes the
/// staging directory and leaves `dst` untouched.
pub fn copy_tree_staged(src: &Path, dst: &Path) -> Result<()> {
    if path_exists(dst) {
        return Err(GitspacesError::TargetExists(dst.to_path_buf()));
    }

    let staging = staging_path(dst)?;
    if path_exists(&staging) {
        // Left behind by an interrupted copy.
        fs::remove_dir_all(&staging)?;
    }

    debug!(from = %src.display(), to = %dst.display(), "copying directory");
    if let Err(e) = copy_tree(src, &staging) {
        if let Err(cleanup) = fs::remove_dir_all(&staging) {
            warn!(path = %staging.display(), error = %cleanup, "could not remove staging directory");
        }
        return Err(e);
    }

    if path_exists(dst) {
        fs::remove_dir_all(&staging)?;
        return Err(GitspacesError::TargetExists(dst.to_path_buf()));
    }
    fs::rename(&staging, dst)?;
    Ok(())
}

fn staging_path(dst: &Path) -> Result<PathBuf> {
    let name = dst.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        GitspacesError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid copy destination: {}", dst.display()),
        ))
    })?;
    let parent = dst.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!(".{name}.partial")))
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link = fs::read_link(src)?;
    std::os::unix::fs::symlink(link, dst)
}

#[cfg(windows)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let link = fs::read_link(src)?;
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(link, dst)
    } else {
        std::os::windows::fs::symlink_file(link, dst)
    }
}
