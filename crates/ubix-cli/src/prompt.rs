//! Prompter selection for `ubix init`.
//!
//! Interactive prompting needs the `interactive` feature and a terminal on
//! stdin. Everything else answers with defaults.

use std::io::IsTerminal as _;

use ubix_adapters::DefaultsPrompter;
use ubix_core::application::Prompter;

use crate::error::CliResult;

/// Whether `init` should ask questions.
pub fn is_interactive(yes: bool) -> bool {
    cfg!(feature = "interactive") && !yes && std::io::stdin().is_terminal()
}

/// The prompter matching [`is_interactive`].
#[cfg(feature = "interactive")]
pub fn prompter(interactive: bool) -> Box<dyn Prompter> {
    if interactive {
        Box::new(interactive::DialoguerPrompter)
    } else {
        Box::new(DefaultsPrompter)
    }
}

#[cfg(not(feature = "interactive"))]
pub fn prompter(_interactive: bool) -> Box<dyn Prompter> {
    Box::new(DefaultsPrompter)
}

/// Ask a yes/no question, defaulting to yes.
#[cfg(feature = "interactive")]
pub fn confirm(question: &str) -> CliResult<bool> {
    use crate::error::IntoCli as _;

    dialoguer::Confirm::new()
        .with_prompt(question)
        .default(true)
        .interact()
        .map_err(std::io::Error::other)
        .with_cli_context(|| "reading confirmation")
}

#[cfg(not(feature = "interactive"))]
pub fn confirm(_question: &str) -> CliResult<bool> {
    Ok(true)
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::Input;
    use ubix_core::{
        application::{
            ApplicationError,
            ports::{PromptField, Prompter},
        },
        domain::validate_param,
        error::UbixResult,
    };

    /// Terminal prompts with inline validation.
    pub struct DialoguerPrompter;

    impl Prompter for DialoguerPrompter {
        fn prompt(&self, field: &PromptField) -> UbixResult<String> {
            let answer: String = Input::new()
                .with_prompt(field.description)
                .default(field.default.clone())
                .allow_empty(!field.required)
                .validate_with(|input: &String| -> Result<(), String> {
                    match validate_param(Some(input.as_str()), field.key, &field.rule) {
                        Ok(Some(_)) => Ok(()),
                        Ok(None) if field.required => Err(format!("{} is required", field.key)),
                        Ok(None) => Ok(()),
                        Err(e) => Err(e.to_string()),
                    }
                })
                .interact_text()
                .map_err(|e| ApplicationError::Prompt {
                    reason: e.to_string(),
                })?;
            Ok(answer)
        }
    }
}
