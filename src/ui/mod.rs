//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - Prompts, spinners, and status lines
//!
//! # Example
//!
//! ```
//! use weaver_boot::ui::{create_ui, OutputMode, StatusKind};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Dune Weaver");
//! ui.status(StatusKind::Success, "fastapi is installed");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI, UiEvent};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use spinner::{live_output_callback, ProgressSpinner};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BootTheme};

use crate::error::Result;

/// Everything weaver-boot prints or asks goes through this trait.
///
/// Status lines, plain messages, and hints belong on stdout. Warnings and
/// errors belong on stderr. Implementations decide per [`OutputMode`] what
/// is actually shown, except that errors are never suppressed.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    fn message(&mut self, msg: &str);

    /// A one-off positive outcome, e.g. `Installation successful!`.
    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    /// An icon-prefixed line such as `✓ fastapi is installed`.
    fn status(&mut self, kind: StatusKind, msg: &str);

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    fn show_header(&mut self, title: &str);

    /// An indented suggestion, usually the command that fixes a problem.
    fn show_hint(&mut self, hint: &str);

    fn is_interactive(&self) -> bool;
}

/// A running spinner; finishing it leaves one outcome line behind.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);

    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);

    /// Underlying progress bar, for streaming live output into the spinner.
    fn progress_bar(&self) -> Option<indicatif::ProgressBar> {
        None
    }
}

/// A yes/no question for the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Stable key; non-interactive runs answer it from
    /// `WEAVER_BOOT_PROMPT_<KEY>`.
    pub key: String,
    pub question: String,
    /// Answer used on enter, and whenever nobody can be asked.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question.
    pub fn confirm(key: &str, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            default: Some(if default { "yes" } else { "no" }.to_string()),
        }
    }
}

/// An answer. Confirms answered from text (defaults, env overrides)
/// arrive as `String`.
#[derive(Debug, Clone)]
pub enum PromptResult {
    Bool(bool),
    String(String),
}

/// Read `yes`/`no` style text; anything unrecognized is `None`.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

impl PromptResult {
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) => parse_yes_no(s),
        }
    }
}
