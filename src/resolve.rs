//! Addressing: turning a user-supplied token (or its absence) into a space.

use crate::error::{GitspacesError, Result};
use crate::project::{Project, SLEEPER_DIR};
use crate::space::Space;
use std::fmt;
use std::path::{Component, Path};

/// The active space containing `cwd`, if any.
///
/// A `cwd` inside the hidden sleeper directory never has a current space, even
/// when it sits inside one of the sleepers.
pub fn current_space<'p>(project: &'p Project, cwd: &Path) -> Option<Space<'p>> {
    let rel = cwd.strip_prefix(project.root()).ok()?;
    let first = match rel.components().next()? {
        Component::Normal(name) => name.to_str()?,
        _ => return None,
    };
    if first == SLEEPER_DIR {
        return None;
    }

    let names = project.active_space_names().ok()?;
    names
        .iter()
        .any(|n| n == first)
        .then(|| Space::new(project, project.space_path(first)))
}

/// Resolve an explicit token: it must exactly match a listed space name.
pub fn resolve_space<'p>(project: &'p Project, token: &str) -> Result<Space<'p>> {
    project.space(token)
}

/// One entry of the interactive switch menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchChoice {
    /// An active space to switch into.
    Space(String),
    /// Wake one of the `N` sleeping spaces first.
    WakeSleeping(usize),
}

impl fmt::Display for SwitchChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchChoice::Space(name) => write!(f, "{name}"),
            SwitchChoice::WakeSleeping(n) => write!(f, "wake sleeping ({n})"),
        }
    }
}

/// Menu offered by `switch`: every active space except `current`, followed by
/// a wake entry when sleepers exist.
pub fn switch_choices(project: &Project, current: Option<&str>) -> Result<Vec<SwitchChoice>> {
    let mut choices: Vec<SwitchChoice> = project
        .active_space_names()?
        .into_iter()
        .filter(|name| Some(name.as_str()) != current)
        .map(SwitchChoice::Space)
        .collect();

    let sleepers = project.sleeping_space_names()?.len();
    if sleepers > 0 {
        choices.push(SwitchChoice::WakeSleeping(sleepers));
    }
    Ok(choices)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameArgs {
    pub old: String,
    pub new: String,
}

/// Sort out `rename [old] [new]`.
///
/// With one argument it is the new name and the old one is the current space;
/// without a current space that is a usage error.
pub fn rename_arguments(
    first: Option<&str>,
    second: Option<&str>,
    current: Option<&str>,
) -> Result<RenameArgs> {
    match (first, second) {
        (Some(old), Some(new)) => Ok(RenameArgs {
            old: old.to_string(),
            new: new.to_string(),
        }),
        (Some(new), None) => match current {
            Some(old) => Ok(RenameArgs {
                old: old.to_string(),
                new: new.to_string(),
            }),
            None => Err(GitspacesError::Usage(
                "Not inside a space; give both the old and the new name".to_string(),
            )),
        },
        _ => Err(GitspacesError::Usage(
            "Missing the new name for the space".to_string(),
        )),
    }
}

/// Source space for `extend`: the named one, else the current space, else the
/// first active space, else the first space of any kind.
pub fn extend_source<'p>(
    project: &'p Project,
    token: Option<&str>,
    current: Option<Space<'p>>,
) -> Result<Space<'p>> {
    if let Some(token) = token {
        return resolve_space(project, token);
    }
    if let Some(space) = current {
        return Ok(space);
    }

    let names = project.list_spaces()?;
    match names.first() {
        Some(name) => Ok(Space::new(project, project.space_path(name))),
        None => Err(GitspacesError::Usage(format!(
            "Project '{}' has no spaces to copy",
            project.name()
        ))),
    }
}
