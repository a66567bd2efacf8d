//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. The dependency commands share
//! their setup through [`BootContext`].

pub mod check;
pub mod completions;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod doctor;
pub mod install;
pub mod start;

pub use context::{BootContext, GlobalOptions};
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
