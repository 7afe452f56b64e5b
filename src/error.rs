//! Error types for reword modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found on PATH")]
    NotInstalled,

    #[error("Failed to spawn git {operation}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the language-model CLI.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Model CLI '{0}' not found on PATH")]
    NotInstalled(String),

    #[error("Failed to spawn model process")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Model CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Model response has no 'response' field{}", .0.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    MissingResponse(Option<String>),

    #[error("Failed to read prompt file")]
    PromptFile(#[source] std::io::Error),
}

/// Errors from rendering a message diff.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to create temporary directory")]
    TempDir(#[source] std::io::Error),

    #[error("Failed to write {file}")]
    WriteFailed {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn git diff")]
    SpawnFailed(#[source] std::io::Error),
}

/// Errors from the pager.
#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Failed to run pager '{command}'")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout")]
    StdoutFailed(#[source] std::io::Error),
}

/// Errors that abort a review run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Review failed for commit {commit} ({position} of {total})")]
    Review {
        commit: String,
        /// 1-based position of the commit in the range.
        position: usize,
        total: usize,
        #[source]
        source: ReviewError,
    },

    #[error("Failed to diff commit {commit}")]
    Diff {
        commit: String,
        #[source]
        source: DiffError,
    },

    #[error(transparent)]
    Pager(#[from] PagerError),
}
