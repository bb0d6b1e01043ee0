//! Shell handoff.
//!
//! A child process cannot change its parent shell's directory. Instead the
//! target path is written to `~/.gitspaces/pid-<PID>`; a shell wrapper reads
//! that file after the command exits, deletes it and `cd`s into the path.

use crate::config;
use crate::fsops;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellHandoff {
    dir: PathBuf,
    pid: u32,
}

impl ShellHandoff {
    /// Handoff files for this process, written into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pid: std::process::id(),
        }
    }

    /// Handoff files in the per-user directory. `None` without a home directory.
    pub fn for_user() -> Option<Self> {
        config::user_dir().map(Self::new)
    }

    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(format!("pid-{}", self.pid))
    }

    /// Record `target` for the shell wrapper. Failures are logged and
    /// reported through the return value only.
    pub fn write(&self, target: &Path) -> bool {
        let target = target.canonicalize().unwrap_or_else(|_| target.to_path_buf());
        let file = self.file_path();

        let result = fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&file, target.to_string_lossy().as_bytes()));
        match result {
            Ok(()) => {
                debug!(file = %file.display(), target = %target.display(), "wrote shell handoff");
                true
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "could not write shell handoff");
                false
            }
        }
    }

    /// Write the handoff and also move this process into `target`.
    pub fn enter(&self, target: &Path) -> bool {
        let written = self.write(target);
        fsops::change_dir(target);
        written
    }
}
