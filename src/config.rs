use crate::error::{GitspacesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-user directory name under the home directory.
const USER_DIR_NAME: &str = ".gitspaces";

const CONFIG_FILENAME: &str = "config.yaml";

/// Editor used by `code` when none is configured.
pub const DEFAULT_EDITOR: &str = "code";

/// Keys understood by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["project_paths", "default_editor"];

// ============================================================================
// User Configuration
// ============================================================================

/// User settings stored in `~/.gitspaces/config.yaml`.
///
/// Loaded once at startup and handed to whatever needs it. Missing fields
/// take their defaults, so a partial or empty file is fine.
///
/// ```yaml
/// project_paths:
///   - ~/code
/// default_editor: code
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directories scanned for projects when running outside one. The first
    /// entry is where `clone` puts new projects.
    #[serde(default)]
    pub project_paths: Vec<String>,

    /// Command used to open a space.
    #[serde(default = "default_editor")]
    pub default_editor: String,
}

fn default_editor() -> String {
    DEFAULT_EDITOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_paths: Vec::new(),
            default_editor: default_editor(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing or empty file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            GitspacesError::Config(format!(
                "Failed to parse config file at {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Configured project paths with `~` expanded.
    pub fn project_dirs(&self) -> Vec<PathBuf> {
        self.project_paths.iter().map(|p| expand_home(p)).collect()
    }

    /// Display value of one key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "project_paths" => Ok(self.project_paths.join(", ")),
            "default_editor" => Ok(self.default_editor.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update one key. `project_paths` gains `value` unless it is already
    /// listed; `default_editor` is replaced. Returns whether anything changed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        match key {
            "project_paths" => {
                if self.project_paths.iter().any(|p| p == value) {
                    Ok(false)
                } else {
                    self.project_paths.push(value.to_string());
                    Ok(true)
                }
            }
            "default_editor" => {
                let changed = self.default_editor != value;
                self.default_editor = value.to_string();
                Ok(changed)
            }
            _ => Err(unknown_key(key)),
        }
    }
}

fn unknown_key(key: &str) -> GitspacesError {
    GitspacesError::Config(format!(
        "Unknown key '{}'. Known keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

// ============================================================================
// Paths
// ============================================================================

/// `~/.gitspaces`, home of the config file and the shell handoff files.
pub fn user_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_DIR_NAME))
}

pub fn config_path() -> Option<PathBuf> {
    user_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
