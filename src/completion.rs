//! Shell completion scripts for bash, zsh and fish.
//!
//! ```ignore
//! gitspaces completions zsh > ~/.zfunc/_gitspaces
//! ```

use clap::{Command, ValueEnum};
use clap_complete::{generate, Shell};
use std::io::Write;

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Write the completion script for `cmd` to `out`.
pub fn write_completion_script(shell: ShellType, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell.to_clap_shell(), cmd, name, out);
}

pub fn generate_completion_script(shell: ShellType, cmd: &mut Command) -> String {
    let mut buf = Vec::new();
    write_completion_script(shell, cmd, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn sample_cli() -> Command {
        Command::new("gitspaces")
            .subcommand(Command::new("switch").arg(Arg::new("space")))
            .subcommand(Command::new("sleep"))
    }

    #[test]
    fn test_shell_names() {
        assert_eq!(ShellType::Bash.to_string(), "bash");
        assert_eq!(ShellType::Zsh.to_string(), "zsh");
        assert_eq!(ShellType::Fish.to_string(), "fish");
    }

    #[test]
    fn test_to_clap_shell() {
        assert_eq!(ShellType::Bash.to_clap_shell(), Shell::Bash);
        assert_eq!(ShellType::Zsh.to_clap_shell(), Shell::Zsh);
        assert_eq!(ShellType::Fish.to_clap_shell(), Shell::Fish);
    }

    #[test]
    fn test_generated_scripts_mention_subcommands() {
        for shell in [ShellType::Bash, ShellType::Zsh, ShellType::Fish] {
            let script = generate_completion_script(shell, &mut sample_cli());
            assert!(script.contains("gitspaces"), "{shell} script lacks name");
            assert!(script.contains("switch"), "{shell} script lacks switch");
        }
    }
}
