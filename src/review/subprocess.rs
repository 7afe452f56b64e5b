//! Model CLI spawning.

use crate::config::ReviewConfig;
use crate::error::ReviewError;
use crate::process::{CommandRunner, Invocation};

/// Check if the model CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_model_installed(command: &str) -> Result<(), ReviewError> {
    which::which(command)
        .map(|_| ())
        .map_err(|_| ReviewError::NotInstalled(command.to_string()))
}

/// Build the model invocation: prompt and model as flags, JSON output, `input` on stdin.
pub fn model_invocation(config: &ReviewConfig, input: &str) -> Invocation {
    Invocation::new(&config.command)
        .arg("-p")
        .arg(&config.prompt)
        .arg("-m")
        .arg(&config.model)
        .arg("--output-format=json")
        .stdin(input)
}

/// Run the model CLI and return its raw stdout.
///
/// There is no timeout: a hung model process hangs the run.
pub async fn run_model<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &ReviewConfig,
    input: &str,
) -> Result<String, ReviewError> {
    let output = runner
        .output(&model_invocation(config, input))
        .await
        .map_err(ReviewError::SpawnFailed)?;

    if !output.success() {
        let code = output.code.unwrap_or(-1);
        return Err(ReviewError::NonZeroExit {
            code,
            stderr: output.stderr,
        });
    }

    Ok(output.stdout)
}
