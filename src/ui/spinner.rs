//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::shell::OutputLine;

use super::theme::BootTheme;
use super::{SpinnerHandle, StatusKind};

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.yellow} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn finished_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    fn finish(&self, kind: StatusKind, msg: &str) {
        self.bar.set_style(finished_style());
        self.bar
            .finish_with_message(BootTheme::for_terminal().line(kind, msg));
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(StatusKind::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(StatusKind::Failed, msg);
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        Some(self.bar.clone())
    }
}

/// Longest streamed line shown under a spinner, in characters.
const TAIL_WIDTH: usize = 72;

/// The last few non-empty lines of a child's output.
#[derive(Debug)]
struct OutputTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl OutputTail {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Returns false when the line is blank and was ignored.
    fn push(&mut self, raw: &str) -> bool {
        let text = raw.trim_end();
        if text.is_empty() {
            return false;
        }
        let shown = if text.chars().count() > TAIL_WIDTH {
            let head: String = text.chars().take(TAIL_WIDTH - 3).collect();
            format!("{}...", head)
        } else {
            text.to_string()
        };
        self.lines.push_back(shown);
        if self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
        true
    }

    fn render(&self, base: &str, indent: usize, theme: &BootTheme) -> String {
        let prefix = " ".repeat(indent);
        self.lines.iter().fold(base.to_string(), |mut msg, line| {
            msg.push('\n');
            msg.push_str(&prefix);
            msg.push_str(&theme.dim.apply_to(format!("» {}", line)).to_string());
            msg
        })
    }
}

/// Show a child's live output under a spinner.
///
/// Only the last `max_lines` non-empty lines are kept, so a long
/// `pip install` visibly makes progress without flooding the terminal.
pub fn live_output_callback(
    bar: ProgressBar,
    base_message: String,
    indent: usize,
    max_lines: usize,
) -> crate::shell::OutputCallback {
    let tail = Arc::new(Mutex::new(OutputTail::new(max_lines)));
    let theme = BootTheme::for_terminal();

    Box::new(move |line: OutputLine| {
        let (OutputLine::Stdout(text) | OutputLine::Stderr(text)) = &line;
        let Ok(mut tail) = tail.lock() else {
            return;
        };
        if tail.push(text) {
            bar.set_message(tail.render(&base_message, indent, &theme));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_finish_success() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("Installing...");
        spinner.finish_success("Installation successful!");
    }

    #[test]
    fn spinner_finish_error() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_error("Failed to install missing packages.");
    }

    #[test]
    fn progress_bar_returns_clone() {
        let spinner = ProgressSpinner::hidden();
        assert!(spinner.progress_bar().is_some());
    }

    #[test]
    fn tail_drops_oldest_and_blank_lines() {
        let mut tail = OutputTail::new(2);
        assert!(!tail.push("   "));
        tail.push("one");
        tail.push("two\n");
        tail.push("three");
        assert_eq!(tail.lines, ["two", "three"]);
        assert_eq!(
            tail.render("Installing...", 2, &BootTheme::plain()),
            "Installing...\n  » two\n  » three"
        );
    }

    #[test]
    fn live_output_callback_keeps_last_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing...".to_string(), 2, 2);

        callback(OutputLine::Stdout("Collecting tqdm".to_string()));
        let msg = bar.message();
        assert!(msg.contains("Installing..."));
        assert!(msg.contains("Collecting tqdm"));

        callback(OutputLine::Stderr("Downloading tqdm-4.66.whl".to_string()));
        callback(OutputLine::Stdout("Successfully installed tqdm".to_string()));
        let msg = bar.message();
        assert!(!msg.contains("Collecting tqdm"));
        assert!(msg.contains("Downloading"));
        assert!(msg.contains("Successfully installed"));

        bar.finish();
    }

    #[test]
    fn live_output_callback_skips_empty_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing...".to_string(), 2, 2);

        callback(OutputLine::Stdout(String::new()));
        callback(OutputLine::Stdout("real output".to_string()));
        let msg = bar.message();
        assert!(msg.contains("real output"));
        assert_eq!(msg.matches('\n').count(), 1);

        bar.finish();
    }

    #[test]
    fn live_output_callback_truncates_long_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing...".to_string(), 2, 2);

        callback(OutputLine::Stdout("x".repeat(100)));
        let msg = bar.message();
        assert!(msg.contains("..."));
        assert!(!msg.contains(&"x".repeat(100)));

        bar.finish();
    }
}
