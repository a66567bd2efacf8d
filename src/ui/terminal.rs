//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_user, BootTheme, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt, PromptResult,
    SpinnerHandle, StatusKind, UserInterface,
};

/// Which terminal a line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Out,
    Err,
}

/// Interactive terminal UI implementation.
///
/// Status, messages, and hints go to stdout. Warnings and errors go to
/// stderr, and errors are shown even in silent mode.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: BootTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: BootTheme::for_terminal(),
            mode,
        }
    }

    fn emit(&mut self, stream: Stream, shown: bool, line: &str) {
        if !shown {
            return;
        }
        let term = match stream {
            Stream::Out => &mut self.out,
            Stream::Err => &mut self.err,
        };
        let _ = writeln!(term, "{}", line);
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.emit(Stream::Out, self.mode.shows_status(), msg);
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.line(StatusKind::Success, msg);
        self.emit(Stream::Out, self.mode.shows_status(), &line);
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.line(StatusKind::Warning, msg);
        self.emit(Stream::Err, self.mode.shows_status(), &line);
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.line(StatusKind::Failed, msg);
        self.emit(Stream::Err, true, &line);
    }

    fn status(&mut self, kind: StatusKind, msg: &str) {
        let line = kind.format(&self.theme, msg);
        self.emit(Stream::Out, self.mode.shows_status(), &line);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.out)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(if self.mode.shows_spinners() {
            ProgressSpinner::new(message)
        } else {
            ProgressSpinner::hidden()
        })
    }

    fn show_header(&mut self, title: &str) {
        let banner = format!("\n{}\n", self.theme.format_header(title));
        self.emit(Stream::Out, self.mode.shows_decoration(), &banner);
    }

    fn show_hint(&mut self, hint: &str) {
        let line = format!("  {}", self.theme.hint.apply_to(hint));
        self.emit(Stream::Out, self.mode.shows_status(), &line);
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
