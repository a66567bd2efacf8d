//! Status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides the canonical set of status icons and colors
//! used for module lines, smoke checks, and install summaries.

use super::theme::BootTheme;

/// Canonical status kinds used across weaver-boot output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Check passed.
    Success,
    /// Check failed.
    Failed,
    /// Check was not run.
    Skipped,
    /// Non-fatal warning.
    Warning,
}

impl StatusKind {
    /// Unicode icon.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Skipped => "○",
            Self::Warning => "⚠",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &BootTheme) -> String {
        theme.style_for(self).apply_to(self.icon()).to_string()
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &BootTheme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }

    /// Format a status line without styling.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.icon(), msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StatusKind; 4] = [
        StatusKind::Success,
        StatusKind::Failed,
        StatusKind::Skipped,
        StatusKind::Warning,
    ];

    #[test]
    fn icon_returns_unicode_symbols() {
        assert_eq!(StatusKind::Success.icon(), "✓");
        assert_eq!(StatusKind::Failed.icon(), "✗");
        assert_eq!(StatusKind::Skipped.icon(), "○");
        assert_eq!(StatusKind::Warning.icon(), "⚠");
    }

    #[test]
    fn styled_returns_string_with_icon() {
        let theme = BootTheme::plain();
        for kind in ALL {
            assert!(
                kind.styled(&theme).contains(kind.icon()),
                "styled({:?}) missing icon",
                kind
            );
        }
    }

    #[test]
    fn plain_theme_format_matches_format_plain() {
        let theme = BootTheme::plain();
        assert_eq!(
            StatusKind::Success.format(&theme, "fastapi is installed"),
            "✓ fastapi is installed"
        );
        assert_eq!(
            StatusKind::Failed.format_plain("ghost is still not installed"),
            "✗ ghost is still not installed"
        );
    }

    #[test]
    fn all_variants_have_unique_icons() {
        let mut icons: Vec<&str> = ALL.iter().map(|k| k.icon()).collect();
        icons.sort();
        icons.dedup();
        assert_eq!(icons.len(), ALL.len());
    }
}
