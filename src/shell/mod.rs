//! Child process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{
    display_command, execute, execute_streaming, OutputCallback, OutputLine, ProcessOptions,
    ProcessOutput,
};
#[cfg(unix)]
pub use command::replace_process;
pub use platform::{default_python, is_ci};
