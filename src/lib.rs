pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod fsops;
pub mod git;
pub mod handoff;
pub mod output;
pub mod progress;
pub mod project;
pub mod prompt;
pub mod resolve;
pub mod signal;
pub mod space;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{GitspacesError, Result};
pub use git::{GitCli, VersionControl};
pub use handoff::ShellHandoff;
pub use project::Project;
pub use space::Space;
