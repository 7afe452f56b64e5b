//! Commit range resolution.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::GitError;
use crate::process::CommandRunner;

use super::commits::CommitId;
use super::run_git;

/// Revision range with the user-provided endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub from_ref: String,
    pub to_ref: String,
}

impl CommitRange {
    /// The `<from>..<to>` argument handed to `git rev-list`.
    pub fn rev_spec(&self) -> String {
        format!("{}..{}", self.from_ref, self.to_ref)
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rev_spec())
    }
}

/// Build a commit range from user-provided references.
///
/// If `to` is None, uses HEAD.
pub fn resolve_range(from: &str, to: Option<&str>) -> CommitRange {
    CommitRange {
        from_ref: from.to_string(),
        to_ref: to.unwrap_or("HEAD").to_string(),
    }
}

/// List the commits reachable from `to` but not from `from`, in `git rev-list` order.
///
/// An invalid range is not an error: git's failure is logged and the
/// (empty) output yields an empty list.
pub async fn list_commits<R: CommandRunner + ?Sized>(
    runner: &R,
    repo_dir: &Path,
    range: &CommitRange,
) -> Result<Vec<CommitId>, GitError> {
    let rev_spec = range.rev_spec();
    let stdout = run_git(runner, repo_dir, &["rev-list", &rev_spec], "rev-list").await?;

    let commits = parse_rev_list(&stdout);
    debug!("{} commits in {}", commits.len(), range);
    Ok(commits)
}

/// Split `git rev-list` output into trimmed, non-empty commit ids.
fn parse_rev_list(output: &str) -> Vec<CommitId> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(CommitId::from)
        .collect()
}
