//! Basic message output functions.

use super::colors::*;

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{YELLOW}Warning:{RESET} {}", msg);
}

pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

pub fn print_success(msg: &str) {
    println!("{GREEN}✓{RESET} {}", msg);
}

/// Print the message shown when the user presses Ctrl+C.
pub fn print_interrupted() {
    eprintln!();
    eprintln!("{YELLOW}Aborted by user{RESET}");
}
