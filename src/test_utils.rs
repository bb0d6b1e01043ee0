//! Test utilities shared across modules.
//!
//! Synchronization for tests that touch the process working directory, a
//! filesystem-only [`VersionControl`], scripted prompt answers and project
//! fixtures.

use crate::error::{GitspacesError, Result};
use crate::git::VersionControl;
use crate::project::{slot_name, Project, PROJECT_MARKER, SLEEPER_DIR};
use crate::prompt::Prompter;
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Mutex to serialize tests that depend on or change the current working directory.
///
/// ```ignore
/// let _cwd = CwdGuard::enter(&space_dir);
/// ```
pub static CWD_MUTEX: Mutex<()> = Mutex::new(());

/// Holds [`CWD_MUTEX`] and puts the working directory back when dropped.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Lock without moving.
    pub fn hold() -> Self {
        let lock = CWD_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let original = env::current_dir().unwrap();
        Self {
            original,
            _lock: lock,
        }
    }

    pub fn enter(dir: &Path) -> Self {
        let guard = Self::hold();
        env::set_current_dir(dir).unwrap();
        guard
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

// ============================================================================
// Fake version control
// ============================================================================

/// [`VersionControl`] that never runs git: a "repository" is a directory with
/// a `.git/HEAD` file in the usual `ref: refs/heads/<branch>` format.
#[derive(Debug, Default)]
pub struct FakeVcs {
    pub fail_clone: bool,
}

impl VersionControl for FakeVcs {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        if self.fail_clone {
            return Err(GitspacesError::VersionControl(format!(
                "Failed to clone '{}': repository not found",
                url
            )));
        }
        fake_clone(dest, url);
        Ok(())
    }

    fn is_valid_repo(&self, path: &Path) -> bool {
        path.join(".git").join("HEAD").is_file()
    }

    fn active_branch(&self, path: &Path) -> Option<String> {
        if !self.is_valid_repo(path) {
            return None;
        }
        let head = fs::read_to_string(path.join(".git").join("HEAD")).ok()?;
        head.trim()
            .strip_prefix("ref: refs/heads/")
            .map(str::to_string)
    }
}

/// Lay down what [`FakeVcs`] considers a clone of `url` on branch `main`.
pub fn fake_clone(dest: &Path, url: &str) {
    fs::create_dir_all(dest.join(".git")).unwrap();
    fs::write(dest.join(".git").join("HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(dest.join("README.md"), format!("cloned from {url}\n")).unwrap();
}

pub fn set_branch(space: &Path, branch: &str) {
    fs::write(
        space.join(".git").join("HEAD"),
        format!("ref: refs/heads/{branch}\n"),
    )
    .unwrap();
}

pub fn detach_head(space: &Path) {
    fs::write(
        space.join(".git").join("HEAD"),
        "4b825dc642cb6eb9a060e54bf8d69288fbee4904\n",
    )
    .unwrap();
}

// ============================================================================
// Fixtures
// ============================================================================

/// Build `<base>/proj` with the given active spaces and `sleepers` sleeping
/// slots (`slot-0..`), each a [`fake_clone`].
pub fn make_project(base: &Path, active: &[&str], sleepers: u32) -> Project {
    let root = base.join("proj");
    fs::create_dir_all(root.join(SLEEPER_DIR)).unwrap();
    fs::write(root.join(PROJECT_MARKER), "").unwrap();

    for name in active {
        fake_clone(&root.join(name), "https://example.com/proj.git");
    }
    for n in 0..sleepers {
        fake_clone(
            &root.join(SLEEPER_DIR).join(slot_name(n)),
            "https://example.com/proj.git",
        );
    }

    Project::open(&root).unwrap()
}

// ============================================================================
// Scripted prompts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Select(usize),
    Input(String),
    Confirm(bool),
}

/// [`Prompter`] answering from a queue. Running out of answers behaves like
/// the user closing stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub questions: Vec<String>,
    pub offered: Vec<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, question: &str) -> Result<Answer> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or(GitspacesError::Aborted)
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, question: &str, options: &[String]) -> Result<usize> {
        self.offered.push(options.to_vec());
        match self.next(question)? {
            Answer::Select(i) => Ok(i),
            other => panic!("expected a select answer for {question:?}, got {other:?}"),
        }
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String> {
        match self.next(question)? {
            Answer::Input(text) if text.is_empty() => Ok(default.to_string()),
            Answer::Input(text) => Ok(text),
            other => panic!("expected an input answer for {question:?}, got {other:?}"),
        }
    }

    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        match self.next(question)? {
            Answer::Confirm(yes) => Ok(yes),
            other => panic!("expected a confirm answer for {question:?}, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwd_guard_restores_directory() {
        let before = env::current_dir().unwrap();
        let temp = tempfile::TempDir::new().unwrap();
        {
            let _cwd = CwdGuard::enter(temp.path());
            assert_eq!(
                env::current_dir().unwrap().canonicalize().unwrap(),
                temp.path().canonicalize().unwrap()
            );
        }
        let _lock = CwdGuard::hold();
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_fake_vcs_reads_branch() {
        let temp = tempfile::TempDir::new().unwrap();
        let vcs = FakeVcs::default();
        let dest = temp.path().join("clone");
        vcs.clone_repo("u", &dest).unwrap();

        assert!(vcs.is_valid_repo(&dest));
        assert_eq!(vcs.active_branch(&dest), Some("main".to_string()));
        set_branch(&dest, "topic/x");
        assert_eq!(vcs.active_branch(&dest), Some("topic/x".to_string()));
        detach_head(&dest);
        assert_eq!(vcs.active_branch(&dest), None);
        assert_eq!(vcs.active_branch(temp.path()), None);
    }

    #[test]
    fn test_scripted_prompter_runs_out_as_abort() {
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
        assert!(prompter.confirm("go?", false).unwrap());
        assert!(prompter.is_exhausted());
        assert!(matches!(
            prompter.confirm("again?", false),
            Err(GitspacesError::Aborted)
        ));
        assert_eq!(prompter.questions, vec!["go?", "again?"]);
    }
}
