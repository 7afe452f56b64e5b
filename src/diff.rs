//! Rendering the difference between an original and a suggested message.

use std::fs;

use tempfile::TempDir;
use tracing::warn;

use crate::error::DiffError;
use crate::git::CommitId;
use crate::process::{CommandRunner, Invocation};

/// Suffix of the file holding the commit's current message.
pub const ORIGINAL_SUFFIX: &str = "_original";

/// Suffix of the file holding the model's suggestion.
pub const SUGGESTION_SUFFIX: &str = "_suggestion";

/// File names used for one commit's diff, derived from the short commit id.
pub fn diff_file_names(commit: &CommitId) -> (String, String) {
    let prefix = commit.short();
    (
        format!("{prefix}{ORIGINAL_SUFFIX}"),
        format!("{prefix}{SUGGESTION_SUFFIX}"),
    )
}

/// Diff `original` against `suggestion` with `git diff --no-index`.
///
/// Both texts are written, with one trailing newline, into a fresh temporary
/// directory that is removed when this returns. Identical texts give an
/// empty string. Git's exit status never fails the call.
pub async fn render_diff<R: CommandRunner + ?Sized>(
    runner: &R,
    commit: &CommitId,
    original: &str,
    suggestion: &str,
) -> Result<String, DiffError> {
    let dir = TempDir::new().map_err(DiffError::TempDir)?;
    let (original_file, suggestion_file) = diff_file_names(commit);

    for (file, text) in [(&original_file, original), (&suggestion_file, suggestion)] {
        fs::write(dir.path().join(file), format!("{text}\n")).map_err(|source| {
            DiffError::WriteFailed {
                file: file.clone(),
                source,
            }
        })?;
    }

    let invocation = Invocation::new("git")
        .args([
            "--no-pager",
            "diff",
            "--no-index",
            "--no-color",
            "--no-ext-diff",
            "--",
        ])
        .arg(&original_file)
        .arg(&suggestion_file)
        .current_dir(dir.path());

    let output = runner
        .output(&invocation)
        .await
        .map_err(DiffError::SpawnFailed)?;

    // 0 means identical, 1 means the files differ.
    if !matches!(output.code, Some(0) | Some(1)) {
        warn!(
            "git diff for {} exited with {:?}: {}",
            commit.short(),
            output.code,
            output.stderr.trim()
        );
    }

    Ok(output.stdout)
}
