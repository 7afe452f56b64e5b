//! Run configuration: which model to ask, with which prompt, and where to page output.

use std::env;
use std::path::Path;

use crate::error::ReviewError;
use crate::review::prompt::PromptVariant;

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Model CLI executable used when none is given.
pub const DEFAULT_LLM_COMMAND: &str = "gemini";

/// Pager used when neither `--pager` nor the environment names one.
pub const DEFAULT_PAGER: &str = "delta";

/// Environment variable to override the default pager.
pub const PAGER_ENV_VAR: &str = "REWORD_PAGER";

/// Settings for the model call, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    /// Model CLI executable.
    pub command: String,
    /// Model identifier passed with `-m`.
    pub model: String,
    /// Guideline prompt passed with `-p`.
    pub prompt: String,
}

impl ReviewConfig {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            command: DEFAULT_LLM_COMMAND.to_string(),
            model: model.into(),
            prompt: prompt.into(),
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Use one of the built-in prompts.
    pub fn with_variant(mut self, variant: PromptVariant) -> Self {
        self.prompt = variant.text().to_string();
        self
    }

    /// Replace the prompt with the contents of a file.
    pub fn with_prompt_file(mut self, path: &Path) -> Result<Self, ReviewError> {
        self.prompt = std::fs::read_to_string(path).map_err(ReviewError::PromptFile)?;
        Ok(self)
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        ReviewConfig::new(DEFAULT_MODEL, PromptVariant::default().text())
    }
}

/// Get the pager command.
///
/// Reads from REWORD_PAGER if set and non-empty, otherwise uses `delta`.
pub fn default_pager() -> String {
    match env::var(PAGER_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => DEFAULT_PAGER.to_string(),
    }
}
