//! Non-interactive UI for containers, CI, and headless environments.

use std::collections::HashMap;

use crate::error::{BootError, Result};

use super::{OutputMode, Prompt, PromptResult, SpinnerHandle, StatusKind, UserInterface};

/// Prefix for environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "WEAVER_BOOT_PROMPT_";

/// Environment variable that answers the prompt with `key`.
pub fn prompt_env_var(key: &str) -> String {
    format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase())
}

/// Plain-text UI for containers, CI, and `--non-interactive`.
///
/// Nothing is styled so container logs stay readable. Prompts are never
/// shown: each is answered from `WEAVER_BOOT_PROMPT_<KEY>` when set, else
/// from its default, else it is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    answers: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Answers are read from the process environment.
    pub fn new(mode: OutputMode) -> Self {
        let answers = std::env::vars()
            .filter_map(|(name, value)| {
                name.strip_prefix(PROMPT_ENV_PREFIX)
                    .map(|key| (key.to_lowercase(), value))
            })
            .collect();
        Self::with_answers(mode, answers)
    }

    /// Answers keyed by prompt key, e.g. `install_missing`.
    pub fn with_answers(mode: OutputMode, answers: HashMap<String, String>) -> Self {
        Self { mode, answers }
    }

    fn out(&self, line: &str) {
        if self.mode.shows_status() {
            println!("{}", line);
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.out(msg);
    }

    fn success(&mut self, msg: &str) {
        self.out(&StatusKind::Success.format_plain(msg));
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", StatusKind::Warning.format_plain(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", StatusKind::Failed.format_plain(msg));
    }

    fn status(&mut self, kind: StatusKind, msg: &str) {
        self.out(&kind.format_plain(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        tracing::debug!(key = %prompt.key, "answering prompt without a terminal");
        self.answers
            .get(&prompt.key.to_lowercase())
            .or(prompt.default.as_ref())
            .map(|answer| PromptResult::String(answer.clone()))
            .ok_or_else(|| BootError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode; set {}",
                    prompt.key,
                    prompt_env_var(&prompt.key)
                ),
            })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let shown = self.mode.shows_spinners();
        if shown {
            println!("{}", message);
        }
        Box::new(NoopSpinner { shown })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_decoration() {
            println!("\n{}\n", title);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        self.out(&format!("  {}", hint));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its final line, and only when spinners show.
struct NoopSpinner {
    shown: bool,
}

impl NoopSpinner {
    fn finish(&self, kind: StatusKind, msg: &str) {
        if self.shown {
            println!("{}", kind.format_plain(msg));
        }
    }
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finish(StatusKind::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(StatusKind::Failed, msg);
    }
}
