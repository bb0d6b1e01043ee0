//! Project model.
//!
//! A project is a directory holding the [`PROJECT_MARKER`] file. Its direct
//! subdirectories are the active spaces; the subdirectories of the hidden
//! [`SLEEPER_DIR`] are the sleeping ones, each in a numbered `slot-<n>`.
//!
//! ```text
//! <project-root>/
//!   __GITSPACES_PROJECT__
//!   .zzz/
//!     slot-0/ slot-1/ ...
//!   <active-name>/ ...
//! ```

use crate::error::{GitspacesError, Result};
use crate::fsops;
use crate::git::{repo_name_from_url, VersionControl};
use crate::space::Space;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Empty file whose presence makes a directory a project.
pub const PROJECT_MARKER: &str = "__GITSPACES_PROJECT__";

/// Hidden directory holding the sleeping spaces.
pub const SLEEPER_DIR: &str = ".zzz";

/// Directory-name prefix of a sleeper slot.
pub const SLOT_PREFIX: &str = "slot-";

/// Top-level names that can never be used for an active space.
pub const RESERVED_NAMES: &[&str] = &[SLEEPER_DIR, ".vscode", PROJECT_MARKER];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    name: String,
}

impl Project {
    /// Open the project rooted at `root`. Fails if the marker file is missing.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !Self::is_project(root) {
            return Err(GitspacesError::ProjectNotFound(root.to_path_buf()));
        }
        Ok(Self::at(root.canonicalize()?))
    }

    fn at(root: PathBuf) -> Self {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { root, name }
    }

    /// Whether `dir` is a project root.
    pub fn is_project(dir: &Path) -> bool {
        dir.join(PROJECT_MARKER).is_file()
    }

    /// Walk from `start` up to the filesystem root and return the first
    /// directory that is a project.
    pub fn find(start: &Path) -> Option<Self> {
        let start = start.canonicalize().ok()?;
        let start = if start.is_file() {
            start.parent()?.to_path_buf()
        } else {
            start
        };

        start
            .ancestors()
            .find(|dir| Self::is_project(dir))
            .map(|dir| Self::at(dir.to_path_buf()))
    }

    /// Every project directly under one of `project_dirs`, sorted by path.
    ///
    /// Directories that do not exist or cannot be read are skipped.
    pub fn find_all(project_dirs: &[PathBuf]) -> Vec<Self> {
        let mut projects = Vec::new();

        for dir in project_dirs {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "skipping project path");
                    continue;
                }
            };

            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() && Self::is_project(&path) {
                    if let Ok(project) = Self::open(&path) {
                        projects.push(project);
                    }
                }
            }
        }

        projects.sort_by(|a, b| a.root.cmp(&b.root));
        projects.dedup();
        projects
    }

    /// Create a new project under `target_dir` from a clone URL.
    ///
    /// The project directory is named after the URL's last path segment with
    /// any `.git` suffix removed. The first space is cloned straight into the
    /// first sleeper slot and then duplicated until `space_count` sleepers
    /// exist. No space is woken.
    pub fn create(
        target_dir: &Path,
        url: &str,
        space_count: usize,
        vcs: &dyn VersionControl,
    ) -> Result<Self> {
        if space_count == 0 {
            return Err(GitspacesError::Usage(
                "A project needs at least one space".to_string(),
            ));
        }
        let name = repo_name_from_url(url).ok_or_else(|| {
            GitspacesError::Usage(format!("Cannot derive a project name from '{}'", url))
        })?;

        fsops::ensure_dir(target_dir)?;
        let root = target_dir.canonicalize()?.join(&name);
        if fsops::path_exists(&root) {
            return Err(GitspacesError::AlreadyExists(root));
        }

        let project = Self::at(root);
        project.init()?;

        let first_slot = project.next_free_slot_path();
        let first = match Space::create_from_url(&project, url, &first_slot, vcs) {
            Ok(space) => space,
            Err(e) => {
                if let Err(cleanup) = fs::remove_dir_all(&project.root) {
                    warn!(path = %project.root.display(), error = %cleanup, "could not remove project directory");
                }
                return Err(e);
            }
        };

        for _ in 1..space_count {
            first.duplicate()?;
        }

        info!(project = %project.name, spaces = space_count, "created project");
        Ok(project)
    }

    fn init(&self) -> Result<()> {
        fsops::ensure_dir(&self.root)?;
        fsops::ensure_dir(&self.sleeper_dir())?;
        fs::write(self.marker_path(), "")?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker_path(&self) -> PathBuf {
        self.root.join(PROJECT_MARKER)
    }

    pub fn sleeper_dir(&self) -> PathBuf {
        self.root.join(SLEEPER_DIR)
    }

    /// All space names: active names sorted lexicographically, followed by
    /// sleeping names (`.zzz/slot-<n>`) in slot order.
    pub fn list_spaces(&self) -> Result<Vec<String>> {
        let mut names = self.active_space_names()?;
        names.extend(self.sleeping_space_names()?);
        Ok(names)
    }

    /// Names of the active spaces, sorted.
    pub fn active_space_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = subdirectory_names(&self.root)?
            .into_iter()
            .filter(|name| !name.starts_with('.') && !RESERVED_NAMES.contains(&name.as_str()))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Names of the sleeping spaces in slot order, each prefixed with
    /// `.zzz/`. Directories that are not numbered slots come last.
    pub fn sleeping_space_names(&self) -> Result<Vec<String>> {
        let dir = self.sleeper_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<String> = subdirectory_names(&dir)?
            .into_iter()
            .filter(|name| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| match (parse_slot(a), parse_slot(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });

        Ok(entries.iter().map(|e| sleeping_name(e)).collect())
    }

    /// The path of the lowest-numbered slot that does not exist yet.
    ///
    /// Computed from the directory contents on every call; gaps are reused.
    pub fn next_free_slot_path(&self) -> PathBuf {
        let dir = self.sleeper_dir();
        (0u32..)
            .map(|i| dir.join(slot_name(i)))
            .find(|path| !fsops::path_exists(path))
            .unwrap_or_else(|| dir.join(slot_name(u32::MAX)))
    }

    /// Filesystem path for a listed space name.
    pub fn space_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Look up a space by its exact listed name.
    pub fn space(&self, name: &str) -> Result<Space<'_>> {
        let names = self.list_spaces()?;
        if names.iter().any(|n| n == name) {
            Ok(Space::new(self, self.space_path(name)))
        } else {
            Err(GitspacesError::SpaceNotFound {
                name: name.to_string(),
                available: self.active_space_names()?,
            })
        }
    }

    /// Every space of the project, in [`list_spaces`](Self::list_spaces) order.
    pub fn spaces(&self) -> Result<Vec<Space<'_>>> {
        Ok(self
            .list_spaces()?
            .iter()
            .map(|name| Space::new(self, self.space_path(name)))
            .collect())
    }
}

/// Directory name of sleeper slot `n`.
pub fn slot_name(n: u32) -> String {
    format!("{SLOT_PREFIX}{n}")
}

/// Parse `slot-<n>` (optionally prefixed with `.zzz/`) into `n`.
pub fn parse_slot(name: &str) -> Option<u32> {
    let name = name
        .strip_prefix(SLEEPER_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name);
    let digits = name.strip_prefix(SLOT_PREFIX)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Reject "slot-01" so a slot has exactly one spelling.
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

/// Listed name of a sleeper directory: `.zzz/<dir_name>`.
pub fn sleeping_name(dir_name: &str) -> String {
    format!("{SLEEPER_DIR}/{dir_name}")
}

/// Check that `name` can be used for an active space.
pub fn validate_space_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GitspacesError::invalid_name(name, "name is empty"));
    }
    if name == "." || name == ".." {
        return Err(GitspacesError::invalid_name(name, "name is a relative path"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(GitspacesError::invalid_name(
            name,
            "name cannot contain path separators",
        ));
    }
    if name.starts_with('.') {
        return Err(GitspacesError::invalid_name(
            name,
            "names starting with '.' are hidden",
        ));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(GitspacesError::invalid_name(name, "name is reserved"));
    }
    Ok(())
}

fn subdirectory_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_project, FakeVcs};
    use tempfile::TempDir;

    #[test]
    fn test_find_returns_project_from_root_and_below() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 0);

        let deep = project.root().join("main").join("src").join("bin");
        fs::create_dir_all(&deep).unwrap();

        assert_eq!(Project::find(project.root()), Some(project.clone()));
        assert_eq!(Project::find(&project.root().join("main")), Some(project.clone()));
        assert_eq!(Project::find(&deep), Some(project.clone()));
        assert_eq!(
            Project::find(&project.sleeper_dir()),
            Some(project.clone())
        );
    }

    #[test]
    fn test_find_returns_none_above_project() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 0);

        assert_eq!(Project::find(project.root().parent().unwrap()), None);
        assert_eq!(Project::find(temp.path()), None);
    }

    #[test]
    fn test_find_from_file_uses_its_directory() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 0);
        let file = project.root().join("main").join("README.md");
        assert!(file.is_file());

        assert_eq!(Project::find(&file), Some(project));
    }

    #[test]
    fn test_find_missing_path_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(Project::find(&temp.path().join("nope")), None);
    }

    #[test]
    fn test_open_requires_marker() {
        let temp = TempDir::new().unwrap();
        let err = Project::open(temp.path()).unwrap_err();
        assert!(matches!(err, GitspacesError::ProjectNotFound(_)));
    }

    #[test]
    fn test_project_name_and_paths() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 0);

        assert_eq!(project.name(), "proj");
        assert_eq!(project.marker_path(), project.root().join(PROJECT_MARKER));
        assert_eq!(project.sleeper_dir(), project.root().join(".zzz"));
    }

    #[test]
    fn test_list_spaces_orders_active_then_sleeping() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main", "feature", "Zeta"], 2);

        assert_eq!(
            project.list_spaces().unwrap(),
            vec!["Zeta", "feature", "main", ".zzz/slot-0", ".zzz/slot-1"]
        );
    }

    #[test]
    fn test_list_spaces_orders_slots_numerically() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 0);
        for n in [10, 2, 1] {
            fs::create_dir_all(project.sleeper_dir().join(slot_name(n))).unwrap();
        }
        fs::create_dir_all(project.sleeper_dir().join("stray")).unwrap();

        assert_eq!(
            project.sleeping_space_names().unwrap(),
            vec![".zzz/slot-1", ".zzz/slot-2", ".zzz/slot-10", ".zzz/stray"]
        );
    }

    #[test]
    fn test_list_spaces_skips_hidden_reserved_and_files() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 1);
        fs::create_dir_all(project.root().join(".vscode")).unwrap();
        fs::create_dir_all(project.root().join(".cache")).unwrap();
        fs::write(project.root().join("notes.txt"), "").unwrap();
        fs::create_dir_all(project.sleeper_dir().join(".slot-1.partial")).unwrap();

        assert_eq!(project.list_spaces().unwrap(), vec!["main", ".zzz/slot-0"]);
    }

    #[test]
    fn test_list_spaces_without_sleeper_dir() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 0);
        fs::remove_dir_all(project.sleeper_dir()).unwrap();

        assert_eq!(project.list_spaces().unwrap(), vec!["main"]);
    }

    #[test]
    fn test_next_free_slot_path_is_idempotent_and_unused() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 2);

        let first = project.next_free_slot_path();
        let second = project.next_free_slot_path();
        assert_eq!(first, second);
        assert_eq!(first, project.sleeper_dir().join("slot-2"));
        assert!(!first.exists());
    }

    #[test]
    fn test_next_free_slot_path_reuses_gaps() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 3);
        fs::remove_dir_all(project.sleeper_dir().join("slot-1")).unwrap();

        assert_eq!(
            project.next_free_slot_path(),
            project.sleeper_dir().join("slot-1")
        );
    }

    #[test]
    fn test_next_free_slot_path_skips_stray_files() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &[], 0);
        fs::write(project.sleeper_dir().join("slot-0"), "not a dir").unwrap();

        assert_eq!(
            project.next_free_slot_path(),
            project.sleeper_dir().join("slot-1")
        );
    }

    #[test]
    fn test_create_makes_sleeping_slots_only() {
        let temp = TempDir::new().unwrap();
        let project = Project::create(
            temp.path(),
            "https://example.com/org/widget.git",
            3,
            &FakeVcs::default(),
        )
        .unwrap();

        assert_eq!(project.name(), "widget");
        assert!(project.marker_path().is_file());
        assert!(project.active_space_names().unwrap().is_empty());
        assert_eq!(
            project.list_spaces().unwrap(),
            vec![".zzz/slot-0", ".zzz/slot-1", ".zzz/slot-2"]
        );
        for slot in project.spaces().unwrap() {
            assert!(slot.is_sleeping());
            assert!(slot.path().join("README.md").is_file());
        }
    }

    #[test]
    fn test_create_refuses_existing_project_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("widget")).unwrap();

        let err = Project::create(
            temp.path(),
            "https://example.com/org/widget",
            1,
            &FakeVcs::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GitspacesError::AlreadyExists(_)));
    }

    #[test]
    fn test_create_rejects_zero_spaces() {
        let temp = TempDir::new().unwrap();
        let err = Project::create(temp.path(), "https://example.com/w", 0, &FakeVcs::default())
            .unwrap_err();
        assert!(matches!(err, GitspacesError::Usage(_)));
        assert!(!temp.path().join("w").exists());
    }

    #[test]
    fn test_create_removes_project_when_clone_fails() {
        let temp = TempDir::new().unwrap();
        let vcs = FakeVcs {
            fail_clone: true,
        };

        let err = Project::create(temp.path(), "https://example.com/widget.git", 2, &vcs)
            .unwrap_err();
        assert!(matches!(err, GitspacesError::VersionControl(_)));
        assert!(!temp.path().join("widget").exists());
    }

    #[test]
    fn test_create_makes_missing_target_dir() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("code").join("projects");

        let project =
            Project::create(&target, "git@example.com:org/tool.git", 1, &FakeVcs::default())
                .unwrap();
        assert!(project.root().ends_with("code/projects/tool"));
    }

    #[test]
    fn test_find_all_scans_project_dirs() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("code");
        fs::create_dir_all(&base).unwrap();
        let vcs = FakeVcs::default();
        Project::create(&base, "https://example.com/beta.git", 1, &vcs).unwrap();
        Project::create(&base, "https://example.com/alpha.git", 1, &vcs).unwrap();
        fs::create_dir_all(base.join("not-a-project")).unwrap();

        let found = Project::find_all(&[base.clone(), temp.path().join("missing")]);
        let names: Vec<&str> = found.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_space_lookup_by_listed_name() {
        let temp = TempDir::new().unwrap();
        let project = make_project(temp.path(), &["main"], 1);

        assert_eq!(
            project.space("main").unwrap().path(),
            project.root().join("main")
        );
        assert_eq!(
            project.space(".zzz/slot-0").unwrap().path(),
            project.sleeper_dir().join("slot-0")
        );

        let err = project.space("slot-0").unwrap_err();
        match err {
            GitspacesError::SpaceNotFound { name, available } => {
                assert_eq!(name, "slot-0");
                assert_eq!(available, vec!["main"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("slot-0"), Some(0));
        assert_eq!(parse_slot("slot-12"), Some(12));
        assert_eq!(parse_slot(".zzz/slot-3"), Some(3));
        assert_eq!(parse_slot("slot-"), None);
        assert_eq!(parse_slot("slot-01"), None);
        assert_eq!(parse_slot("slot-x"), None);
        assert_eq!(parse_slot("main"), None);
    }

    #[test]
    fn test_validate_space_name() {
        assert!(validate_space_name("main").is_ok());
        assert!(validate_space_name("feature-42").is_ok());
        for bad in ["", ".", "..", "a/b", "a\\b", ".zzz", ".hidden", PROJECT_MARKER] {
            assert!(
                matches!(
                    validate_space_name(bad),
                    Err(GitspacesError::InvalidName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
