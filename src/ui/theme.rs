//! Visual theme and styling.

use console::Style;

use super::StatusKind;

/// weaver-boot's visual theme.
#[derive(Debug, Clone)]
pub struct BootTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Secondary text: skipped checks, streamed installer output.
    pub dim: Style,
    pub highlight: Style,
    pub header: Style,
    pub hint: Style,
}

impl Default for BootTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BootTheme {
    /// The colored theme. Headers and hints share the sand tone.
    pub fn new() -> Self {
        let sand = 179;
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().color256(sand),
            hint: Style::new().color256(sand).dim(),
        }
    }

    /// A theme that leaves text untouched (non-TTY or `--no-color`).
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            highlight: none.clone(),
            header: none.clone(),
            hint: none,
        }
    }

    /// Pick the colored or plain theme for the current terminal.
    pub fn for_terminal() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Style used for a status kind.
    pub fn style_for(&self, kind: StatusKind) -> &Style {
        match kind {
            StatusKind::Success => &self.success,
            StatusKind::Failed => &self.error,
            StatusKind::Skipped => &self.dim,
            StatusKind::Warning => &self.warning,
        }
    }

    /// A whole line (icon and text) in the kind's style.
    ///
    /// Used for the one-off outcome lines (`success`, `error`, finished
    /// spinners), where status lines only color the icon.
    pub fn line(&self, kind: StatusKind, msg: &str) -> String {
        self.style_for(kind)
            .apply_to(kind.format_plain(msg))
            .to_string()
    }

    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⏳"),
            self.highlight.apply_to(title)
        )
    }
}

/// Colors are on unless `NO_COLOR` is set or stdout is not a terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
