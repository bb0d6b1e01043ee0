//! Ctrl+C handling.
//!
//! Every gitspaces command is short and synchronous, and most of its waiting
//! happens inside a blocking stdin read. An interrupt therefore ends the
//! process right away instead of setting a flag for a loop to poll.

use crate::error::{GitspacesError, Result};
use crate::output::print_interrupted;

/// Exit status after Ctrl+C (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Register the SIGINT handler. Can only succeed once per process.
pub fn install_abort_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        print_interrupted();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(|e| GitspacesError::Signal(e.to_string()))
}
