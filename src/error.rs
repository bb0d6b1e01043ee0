use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitspacesError {
    #[error("Space '{name}' not found. Available spaces: {}", format_available(.available))]
    SpaceNotFound { name: String, available: Vec<String> },

    #[error("No gitspaces project found from {0}")]
    ProjectNotFound(PathBuf),

    #[error("Project directory already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Target directory already exists: {0}")]
    TargetExists(PathBuf),

    #[error("Space '{0}' is already sleeping")]
    AlreadyAsleep(String),

    #[error("Space '{0}' is not sleeping")]
    NotAsleep(String),

    #[error("Git error: {0}")]
    VersionControl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error("Invalid space name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Signal handler error: {0}")]
    Signal(String),

    #[error("user aborted")]
    Aborted,
}

impl GitspacesError {
    /// True for an intentional cancel, which exits without an error message.
    pub fn is_abort(&self) -> bool {
        matches!(self, GitspacesError::Aborted)
    }

    pub(crate) fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        GitspacesError::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

pub type Result<T> = std::result::Result<T, GitspacesError>;
