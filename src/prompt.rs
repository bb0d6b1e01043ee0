//! Interactive prompts.
//!
//! Commands ask their questions through [`Prompter`] so that tests can answer
//! them from a script. [`TerminalPrompter`] reads answers from stdin; end of
//! input is treated as the user walking away and yields
//! [`GitspacesError::Aborted`].

use std::io::{self, BufRead, Write};

use crate::error::{GitspacesError, Result};
use crate::output::{BOLD, CYAN, GRAY, GREEN, RESET, YELLOW};

pub trait Prompter {
    /// Pick one of `options`; returns its index.
    ///
    /// Callers look the index up with [`checked_choice`] rather than trusting
    /// every implementation to stay in range.
    fn select(&mut self, question: &str, options: &[String]) -> Result<usize>;

    /// Pick one of `options` and return it.
    fn choose(&mut self, question: &str, options: &[String]) -> Result<String> {
        let index = self.select(question, options)?;
        checked_choice(options, index).cloned()
    }

    /// Free text, with `default` used for an empty answer.
    fn input(&mut self, question: &str, default: &str) -> Result<String>;

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// The entry at `index`, or a `Usage` error when a prompter answered with an
/// index outside `items`.
pub fn checked_choice<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or_else(|| {
        GitspacesError::Usage(format!(
            "Choice {} is out of range (1-{})",
            index + 1,
            items.len()
        ))
    })
}

/// [`Prompter`] on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            println!();
            return Err(GitspacesError::Aborted);
        }
        Ok(input.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, question: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(GitspacesError::Usage("Nothing to choose from".to_string()));
        }

        println!("{CYAN}?{RESET} {}", question);
        println!();
        for (i, option) in options.iter().enumerate() {
            let marker = if i == 0 {
                format!("{GREEN}>{RESET}")
            } else {
                " ".to_string()
            };
            println!("  {} {BOLD}{}{RESET}. {}", marker, i + 1, option);
        }

        loop {
            println!();
            print!("{GRAY}Enter choice [1]:{RESET} ");
            let answer = self.read_line()?;
            match parse_choice(&answer, options.len()) {
                Some(index) => return Ok(index),
                None => println!(
                    "{YELLOW}Please enter a number between 1 and {}{RESET}",
                    options.len()
                ),
            }
        }
    }

    fn input(&mut self, question: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            print!("{CYAN}?{RESET} {} ", question);
        } else {
            print!("{CYAN}?{RESET} {} {GRAY}[{}]{RESET} ", question, default);
        }
        let answer = self.read_line()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        print!("{CYAN}?{RESET} {} {GRAY}{}{RESET} ", question, hint);
        let answer = self.read_line()?;
        Ok(parse_confirm(&answer, default))
    }
}

/// 1-based menu answer to a 0-based index. Empty picks the first entry.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    if answer.is_empty() {
        return Some(0);
    }
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Some(n - 1),
        _ => None,
    }
}

fn parse_confirm(answer: &str, default: bool) -> bool {
    match answer.to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
