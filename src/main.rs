//! gitspaces CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::{CommandFactory, Parser, Subcommand};
use gitspaces::commands::{
    clone_command, code_command, config_command, extend_command, rename_command, setup_command,
    sleep_command, switch_command, CommandContext,
};
use gitspaces::completion::{write_completion_script, ShellType};
use gitspaces::config::{self, Config};
use gitspaces::output::print_error;
use gitspaces::prompt::TerminalPrompter;
use gitspaces::signal::install_abort_handler;
use gitspaces::{GitCli, Result, ShellHandoff};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GITSPACES_LOG";

#[derive(Parser)]
#[command(name = "gitspaces")]
#[command(
    version,
    about = "Keep a pool of clones of one repository and switch between them",
    after_help = "EXAMPLES:
    gitspaces clone git@github.com:org/app.git -n 4   # project with 4 spaces
    gitspaces                                         # pick a space to switch to
    gitspaces switch .zzz/slot-2                      # wake a sleeper and enter it
    gitspaces sleep                                   # park the current space
    gitspaces rename feature-login                    # rename the current space

SHELL INTEGRATION:
    A child process cannot change its shell's directory. After switching,
    gitspaces writes the target path to ~/.gitspaces/pid-<PID>; a shell
    function wrapping gitspaces should read that file, delete it and cd."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a project from a repository URL
    Clone {
        /// Repository URL to clone
        url: String,

        /// Number of spaces to create
        #[arg(short = 'n', long = "num-spaces", default_value_t = 3)]
        num_spaces: usize,

        /// Directory to create the project in
        #[arg(short = 'd', long = "directory")]
        directory: Option<PathBuf>,
    },

    /// Switch to another space (the default command)
    Switch {
        /// Space to switch to; sleepers are written .zzz/slot-<n>
        space: Option<String>,
    },

    /// Put a space to sleep
    Sleep {
        /// Space to put to sleep (defaults to the current one)
        space: Option<String>,
    },

    /// Rename a space; with one name, renames the current space
    Rename {
        /// Current name, or the new name when given alone
        old_name: Option<String>,

        /// New name
        new_name: Option<String>,
    },

    /// Add sleeping copies of a space to the project
    Extend {
        /// Number of spaces to add
        #[arg(short = 'n', long = "num-spaces", default_value_t = 1)]
        num_spaces: usize,

        /// Space to copy (defaults to the current one)
        space: Option<String>,
    },

    /// Open a space in the configured editor
    Code {
        /// Space to open (defaults to the current one)
        space: Option<String>,
    },

    /// Show or change settings
    #[command(after_help = "EXAMPLES:
    gitspaces config                              # show all settings
    gitspaces config default_editor               # show one setting
    gitspaces config default_editor vim           # change the editor
    gitspaces config project_paths ~/work         # add a project directory")]
    Config {
        /// Setting name (project_paths or default_editor)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Interactive first-time configuration
    Setup,

    /// Output shell completion script
    #[command(hide = true)]
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Initialize tracing to stderr so stdout stays clean for the user.
fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("gitspaces=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gitspaces=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = config::config_path();
    let mut config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    let mut prompter = TerminalPrompter;

    let command = cli.command.unwrap_or(Commands::Switch { space: None });

    // Commands that only touch the configuration.
    match &command {
        Commands::Config { key, value } => {
            return config_command(
                &mut config,
                config_path.as_deref(),
                key.as_deref(),
                value.as_deref(),
            );
        }
        Commands::Setup => {
            return setup_command(&mut prompter, &mut config, config_path.as_deref());
        }
        Commands::Completions { shell } => {
            write_completion_script(*shell, &mut Cli::command(), &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let vcs = GitCli;
    let handoff =
        ShellHandoff::for_user().unwrap_or_else(|| ShellHandoff::new(std::env::temp_dir()));
    let mut ctx = CommandContext::new(&config, &vcs, &handoff, &mut prompter)?;

    match command {
        Commands::Clone {
            url,
            num_spaces,
            directory,
        } => clone_command(&mut ctx, &url, num_spaces, directory.as_deref()),
        Commands::Switch { space } => switch_command(&mut ctx, space.as_deref()),
        Commands::Sleep { space } => sleep_command(&mut ctx, space.as_deref()),
        Commands::Rename { old_name, new_name } => {
            rename_command(&mut ctx, old_name.as_deref(), new_name.as_deref())
        }
        Commands::Extend { num_spaces, space } => {
            extend_command(&mut ctx, num_spaces, space.as_deref())
        }
        Commands::Code { space } => code_command(&mut ctx, space.as_deref()),
        // Handled above
        Commands::Config { .. } | Commands::Setup | Commands::Completions { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = install_abort_handler() {
        tracing::warn!(error = %e, "Ctrl+C handler not installed");
    }

    if let Err(e) = run(cli) {
        if e.is_abort() {
            return;
        }
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
