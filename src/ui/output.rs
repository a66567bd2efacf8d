//! Output verbosity.

/// How much weaver-boot prints. `-v`, `-q` and `-s` pick the non-default modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Verbose,
    /// Banner, status lines, and the installer's own output.
    #[default]
    Normal,
    /// Status lines only; installer output is summarized on a spinner.
    Quiet,
    /// Errors only.
    Silent,
}

impl OutputMode {
    /// `pip` writes straight to the terminal instead of a spinner.
    pub fn streams_child_output(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Headers and blank-line framing.
    pub fn shows_decoration(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
