//! Interactive prompts.

use console::Term;
use dialoguer::Confirm;

use crate::error::{BootError, Result};

use super::{parse_yes_no, Prompt, PromptResult};

/// Convert dialoguer errors to BootError.
fn map_dialoguer_err(e: dialoguer::Error) -> BootError {
    BootError::Io(e.into())
}

/// Interpret a prompt default as a yes/no answer; absent means yes.
fn confirm_default(default: Option<&str>) -> bool {
    default.and_then(parse_yes_no).unwrap_or(true)
}

/// Ask a yes/no question on the terminal.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(confirm_default(prompt.default.as_deref()))
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}
