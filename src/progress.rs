use crate::output::{GREEN, RESET};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use terminal_size::{terminal_size, Width};

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const DEFAULT_TERMINAL_WIDTH: u16 = 80;
// Spinner glyph plus the space after it.
const SPINNER_OVERHEAD: usize = 2;

fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH) as usize
}

// ============================================================================
// Spinner: one line of feedback while cloning or copying
// ============================================================================

/// Spinner shown during slow filesystem and clone work. Cleared when dropped.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars(SPINNER_CHARS)
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(fit_to_terminal(message));
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    pub fn update(&self, message: &str) {
        self.bar.set_message(fit_to_terminal(message));
    }

    pub fn finish_success(self, message: &str) {
        self.bar.finish_and_clear();
        println!("{GREEN}✓{RESET} {}", message);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn fit_to_terminal(message: &str) -> String {
    let available = get_terminal_width().saturating_sub(SPINNER_OVERHEAD);
    truncate(message, available.max(20))
}

/// Cut `text` to `max_len` characters, ending in `...` when shortened.
fn truncate(text: &str, max_len: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let kept: String = first_line.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
