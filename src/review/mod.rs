//! Commit message review through an external model CLI.

pub mod prompt;
pub mod response;
pub mod subprocess;

use tracing::debug;

use crate::config::ReviewConfig;
use crate::error::ReviewError;
use crate::process::CommandRunner;

pub use prompt::{PromptVariant, build_review_input};
pub use response::parse_model_response;
pub use subprocess::{check_model_installed, run_model};

/// Ask the model for a rewritten version of `message`.
///
/// Single attempt, no retry. Any failure is returned to the caller, which
/// aborts the run.
pub async fn review_message<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &ReviewConfig,
    message: &str,
) -> Result<String, ReviewError> {
    let input = build_review_input(message);
    debug!("Review input length: {} chars", input.len());

    let stdout = run_model(runner, config, &input).await?;
    parse_model_response(&stdout)
}
