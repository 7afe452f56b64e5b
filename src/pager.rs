//! Showing the rendered review in a pager.

use std::io::Write;

use tracing::{debug, warn};

use crate::error::PagerError;
use crate::process::{CommandRunner, Invocation};

/// Pager invocation for a command line such as `less -R`.
///
/// Returns None for an empty command.
pub fn pager_invocation(command: &str, text: &str) -> Option<Invocation> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some(Invocation::new(program).args(parts).stdin(text))
}

/// Whether the pager's executable is on PATH.
pub fn pager_available(command: &str) -> bool {
    command
        .split_whitespace()
        .next()
        .is_some_and(|program| which::which(program).is_ok())
}

/// Stream `text` into the pager and wait for the user to quit it.
///
/// A non-zero exit from the pager is logged, not returned.
pub async fn page<R: CommandRunner + ?Sized>(
    runner: &R,
    command: &str,
    text: &str,
) -> Result<(), PagerError> {
    let Some(invocation) = pager_invocation(command, text) else {
        return print_to_stdout(text);
    };

    let code = runner
        .interactive(&invocation)
        .await
        .map_err(|source| PagerError::SpawnFailed {
            command: command.to_string(),
            source,
        })?;

    match code {
        Some(0) => debug!("Pager exited cleanly"),
        other => warn!("Pager '{}' exited with {:?}", command, other),
    }

    Ok(())
}

/// Write `text` to stdout as-is.
pub fn print_to_stdout(text: &str) -> Result<(), PagerError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(PagerError::StdoutFailed)
}
