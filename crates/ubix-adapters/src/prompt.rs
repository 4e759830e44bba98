//! Non-interactive prompters.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use ubix_core::{
    application::ports::{PromptField, Prompter},
    error::UbixResult,
};

/// Answers every question with its default.
///
/// Used for `init --yes` and when stdin is not a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn prompt(&self, field: &PromptField) -> UbixResult<String> {
        debug!(field = field.key, default = %field.default, "Using default");
        Ok(field.default.clone())
    }
}

/// Canned answers keyed by field, for tests.
///
/// Fields without an answer get their default. Every question asked is
/// recorded in order.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: HashMap<&'static str, String>,
    asked: Mutex<Vec<&'static str>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.answers.insert(key, value.into());
        self
    }

    /// Keys of the fields prompted so far.
    pub fn asked(&self) -> Vec<&'static str> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, field: &PromptField) -> UbixResult<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(field.key);
        }
        Ok(self
            .answers
            .get(field.key)
            .cloned()
            .unwrap_or_else(|| field.default.clone()))
    }
}
