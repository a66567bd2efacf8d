//! Command dispatching and exit codes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::args::{Cli, Commands, StartArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::config::ConfigCommand;
use super::context::GlobalOptions;
use super::doctor::DoctorCommand;
use super::install::InstallCommand;
use super::start::StartCommand;

/// A CLI subcommand.
pub trait Command {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// How a command finished, as the process exit code.
///
/// `start` passes the application's own exit code through, so any value
/// is possible here. [`ExitCode`] conversion folds codes outside
/// `0..=255` into 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// 0 when `ok`, 1 otherwise.
    pub fn from_ok(ok: bool) -> Self {
        Self {
            exit_code: if ok { 0 } else { 1 },
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<CommandResult> for ExitCode {
    fn from(result: CommandResult) -> Self {
        ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
    }
}

/// Routes the parsed CLI to a command for one project.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the command the CLI asks for. No subcommand means `start`.
    pub fn command_for(&self, cli: &Cli) -> Box<dyn Command> {
        let globals = GlobalOptions::from_cli(cli);
        let root = self.project_root.as_path();

        match cli.command.clone() {
            Some(Commands::Check(args)) => Box::new(CheckCommand::new(root, globals, args)),
            Some(Commands::Install(args)) => Box::new(InstallCommand::new(root, globals, args)),
            Some(Commands::Start(args)) => Box::new(StartCommand::new(root, globals, args)),
            None => Box::new(StartCommand::new(root, globals, StartArgs::default())),
            Some(Commands::Doctor(args)) => Box::new(DoctorCommand::new(root, globals, args)),
            Some(Commands::Config(args)) => Box::new(ConfigCommand::new(root, globals, args)),
            Some(Commands::Completions(args)) => Box::new(CompletionsCommand::new(args)),
        }
    }

    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = self.command_for(cli);
        tracing::debug!(root = %self.project_root.display(), "dispatching");
        command.execute(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn exit_codes() {
        assert!(CommandResult::success().succeeded());
        assert_eq!(CommandResult::failure(7).exit_code, 7);
        assert_eq!(CommandResult::from_ok(false), CommandResult::failure(1));
        assert!(CommandResult::from_ok(true).succeeded());
    }

    #[test]
    fn out_of_range_codes_become_one() {
        assert_eq!(ExitCode::from(CommandResult::failure(300)), ExitCode::from(1));
        assert_eq!(ExitCode::from(CommandResult::failure(-2)), ExitCode::from(1));
        assert_eq!(ExitCode::from(CommandResult::failure(42)), ExitCode::from(42));
    }

    #[test]
    fn completions_run_without_a_project() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/nonexistent/weaver"));
        assert_eq!(dispatcher.project_root(), Path::new("/nonexistent/weaver"));

        let cli = Cli::parse_from(["weaver-boot", "completions", "bash"]);
        let mut ui = crate::ui::MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.succeeded());
    }
}
