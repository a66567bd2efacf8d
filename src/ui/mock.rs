//! Mock UI implementation for testing.
//!
//! `MockUI` records every interaction as a [`UiEvent`] in the order it
//! happened, so tests can assert both on what was shown and on the order
//! of the narrative. Prompt answers can be scripted per key.
//!
//! # Example
//!
//! ```
//! use weaver_boot::ui::{MockUI, StatusKind, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_missing", "no");
//!
//! ui.status(StatusKind::Success, "fastapi is installed");
//! ui.message("Attempting to install missing packages...");
//!
//! assert!(ui.has_status("fastapi is installed"));
//! assert_eq!(
//!     ui.transcript(),
//!     vec!["✓ fastapi is installed", "Attempting to install missing packages..."]
//! );
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{
    parse_yes_no, OutputMode, Prompt, PromptResult, SpinnerHandle, StatusKind, UserInterface,
};

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Status(StatusKind, String),
    Header(String),
    Hint(String),
    Spinner(String),
    Prompt(String),
}

impl UiEvent {
    /// The line as a plain terminal would show it, if it prints one.
    pub fn rendered(&self) -> Option<String> {
        match self {
            Self::Message(m) | Self::Header(m) | Self::Spinner(m) => Some(m.clone()),
            Self::Hint(m) => Some(format!("  {}", m)),
            Self::Success(m) => Some(StatusKind::Success.format_plain(m)),
            Self::Warning(m) => Some(StatusKind::Warning.format_plain(m)),
            Self::Error(m) => Some(StatusKind::Failed.format_plain(m)),
            Self::Status(kind, m) => Some(kind.format_plain(m)),
            Self::Prompt(_) => None,
        }
    }
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    events: Vec<UiEvent>,
    prompt_responses: HashMap<String, String>,
}

macro_rules! texts {
    ($self:ident, $variant:ident) => {
        $self
            .events
            .iter()
            .filter_map(|e| match e {
                UiEvent::$variant(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    };
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Script the answer for the prompt with `key`.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Every recorded interaction, in order.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// The printed lines, in order.
    pub fn transcript(&self) -> Vec<String> {
        self.events.iter().filter_map(UiEvent::rendered).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        texts!(self, Message)
    }

    pub fn successes(&self) -> Vec<String> {
        texts!(self, Success)
    }

    pub fn warnings(&self) -> Vec<String> {
        texts!(self, Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        texts!(self, Error)
    }

    pub fn headers(&self) -> Vec<String> {
        texts!(self, Header)
    }

    pub fn hints(&self) -> Vec<String> {
        texts!(self, Hint)
    }

    pub fn spinners(&self) -> Vec<String> {
        texts!(self, Spinner)
    }

    /// Keys of the prompts that were shown.
    pub fn prompts_shown(&self) -> Vec<String> {
        texts!(self, Prompt)
    }

    pub fn statuses(&self) -> Vec<(StatusKind, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Status(kind, m) => Some((*kind, m.clone())),
                _ => None,
            })
            .collect()
    }

    /// Status lines rendered the way the terminal shows them.
    pub fn status_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter(|e| matches!(e, UiEvent::Status(..)))
            .filter_map(UiEvent::rendered)
            .collect()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages().iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes().iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors().iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(msg))
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints().iter().any(|m| m.contains(msg))
    }

    pub fn has_status(&self, msg: &str) -> bool {
        self.statuses().iter().any(|(_, m)| m.contains(msg))
    }

    /// Forget everything recorded so far (scripted answers are kept).
    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, event: UiEvent) {
        self.events.push(event);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.record(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.record(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.record(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.record(UiEvent::Error(msg.to_string()));
    }

    fn status(&mut self, kind: StatusKind, msg: &str) {
        self.record(UiEvent::Status(kind, msg.to_string()));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.record(UiEvent::Prompt(prompt.key.clone()));

        let answer = self
            .prompt_responses
            .get(&prompt.key)
            .or(prompt.default.as_ref())
            .and_then(|r| parse_yes_no(r))
            .unwrap_or(false);

        Ok(PromptResult::Bool(answer))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(UiEvent::Spinner(message.to_string()));
        Box::new(MockSpinner::default())
    }

    fn show_header(&mut self, title: &str) {
        self.record(UiEvent::Header(title.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.record(UiEvent::Hint(hint.to_string()));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner that remembers how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finished: Option<(bool, String)>,
}

impl MockSpinner {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `(succeeded, final message)` once finished.
    pub fn finished(&self) -> Option<(bool, &str)> {
        self.finished.as_ref().map(|(ok, m)| (*ok, m.as_str()))
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finished = Some((true, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finished = Some((false, msg.to_string()));
    }
}
