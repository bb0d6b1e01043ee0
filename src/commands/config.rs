//! Config command handler.

use crate::config::Config;
use crate::error::{GitspacesError, Result};
use crate::output::{print_config, print_info, print_success};
use std::path::Path;

/// `config` shows every setting, `config <key>` shows one and
/// `config <key> <value>` changes it and saves the file at `path`.
pub fn config_command(
    config: &mut Config,
    path: Option<&Path>,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let Some(key) = key else {
        print_config(config, path);
        return Ok(());
    };

    let Some(value) = value else {
        println!("{}: {}", key, config.get(key)?);
        return Ok(());
    };

    let path = path.ok_or_else(|| {
        GitspacesError::Config("Could not determine home directory".to_string())
    })?;

    if config.set(key, value)? {
        config.save_to(path)?;
        print_success(&format!("Set {} = {}", key, config.get(key)?));
    } else {
        print_info(&format!("{} already contains '{}'", key, value));
    }
    Ok(())
}
