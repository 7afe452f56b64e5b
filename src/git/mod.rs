//! Git operations, run through the system `git` binary.
//!
//! Git failures are deliberately lenient: a non-zero exit is logged and the
//! captured stdout (usually empty) is used as-is. Only a failure to spawn git
//! at all is an error.

pub mod commits;
pub mod range;

use std::path::Path;

use tracing::warn;

use crate::error::GitError;
use crate::process::{CommandRunner, Invocation};

pub use commits::{CommitId, extract_message_body, read_commit_message};
pub use range::{CommitRange, list_commits, resolve_range};

/// Check that git is installed and on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map(|_| ()).map_err(|_| GitError::NotInstalled)
}

/// Run `git <args>` in `repo_dir` and return its stdout, even on failure.
pub(crate) async fn run_git<R: CommandRunner + ?Sized>(
    runner: &R,
    repo_dir: &Path,
    args: &[&str],
    operation: &'static str,
) -> Result<String, GitError> {
    let invocation = Invocation::new("git")
        .args(args.iter().copied())
        .current_dir(repo_dir);

    let output = runner
        .output(&invocation)
        .await
        .map_err(|source| GitError::SpawnFailed { operation, source })?;

    if !output.success() {
        warn!(
            "git {} exited with {}: {}",
            operation,
            output
                .code
                .map_or("a signal".to_string(), |c| format!("code {c}")),
            output.stderr.trim()
        );
    }

    Ok(output.stdout)
}
