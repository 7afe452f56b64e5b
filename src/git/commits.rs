//! Commit ids and message extraction from raw commit objects.

use std::fmt;
use std::path::Path;

use crate::error::GitError;
use crate::process::CommandRunner;

use super::run_git;

/// Length of the abbreviated id used to name diff files.
pub const SHORT_ID_LEN: usize = 8;

/// A commit identifier as printed by `git rev-list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first eight characters of the id, or the whole id if shorter.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the message body of `commit` via `git cat-file -p`.
pub async fn read_commit_message<R: CommandRunner + ?Sized>(
    runner: &R,
    repo_dir: &Path,
    commit: &CommitId,
) -> Result<String, GitError> {
    let raw = run_git(runner, repo_dir, &["cat-file", "-p", commit.as_str()], "cat-file").await?;
    Ok(extract_message_body(&raw))
}

/// Extract the message from a raw commit object.
///
/// Every line is right-trimmed. Everything up to and including the first
/// empty line is the header and is dropped; the rest is joined with `\n`.
/// An object without an empty line has no message.
pub fn extract_message_body(raw: &str) -> String {
    raw.lines()
        .map(str::trim_end)
        .skip_while(|line| !line.is_empty())
        .skip(1)
        .collect::<Vec<_>>()
        .join("\n")
}
