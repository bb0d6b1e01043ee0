//! Project and space reports.

use crate::config::Config;
use crate::project::Project;
use std::path::Path;

use super::colors::*;

/// Print the spaces of a project, marking the current one.
pub fn print_space_list(project: &Project, names: &[String], current: Option<&str>) {
    println!("{BLUE}Project:{RESET} {BOLD}{}{RESET}", project.name());
    if names.is_empty() {
        println!("{GRAY}  (no spaces){RESET}");
        return;
    }
    for name in names {
        if Some(name.as_str()) == current {
            println!("  {GREEN}*{RESET} {BOLD}{}{RESET}", name);
        } else if name.starts_with('.') {
            println!("{GRAY}    {}{RESET}", name);
        } else {
            println!("    {}", name);
        }
    }
}

/// Print where the shell is being sent.
pub fn print_entered(verb: &str, name: &str, path: &Path) {
    println!("{GREEN}✓{RESET} {} {BOLD}{}{RESET}", verb, name);
    println!("  {GRAY}Path:{RESET} {}", path.display());
}

pub fn print_project_created(project: &Project, spaces: usize) {
    println!(
        "{GREEN}✓{RESET} Created project {BOLD}{}{RESET} with {} sleeping space{}",
        project.name(),
        spaces,
        if spaces == 1 { "" } else { "s" }
    );
    println!("  {GRAY}Path:{RESET} {}", project.root().display());
}

pub fn print_spaces_added(added: usize, total: usize) {
    println!(
        "{GREEN}✓{RESET} Added {} sleeping space{} ({} total)",
        added,
        if added == 1 { "" } else { "s" },
        total
    );
    println!("Use '{CYAN}gitspaces switch{RESET}' to wake and name them.");
}

/// Print every configuration value.
pub fn print_config(config: &Config, path: Option<&Path>) {
    println!("{BOLD}gitspaces configuration{RESET}");
    if let Some(path) = path {
        println!("{GRAY}{}{RESET}", path.display());
    }
    println!();
    println!("{BLUE}project_paths:{RESET}");
    if config.project_paths.is_empty() {
        println!("{GRAY}  (none){RESET}");
    }
    for path in &config.project_paths {
        println!("  - {}", path);
    }
    println!("{BLUE}default_editor:{RESET} {}", config.default_editor);
}
