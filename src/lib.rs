//! reword - A CLI tool that reviews commit messages with an LLM.
//!
//! # Overview
//!
//! reword lists the commits in a revision range, asks a language-model CLI to
//! rewrite each commit message according to a style guideline, and shows the
//! difference between the original and the suggested message for every commit
//! in a pager.

pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod pager;
pub mod pipeline;
pub mod process;
pub mod review;

// Re-export commonly used types
pub use config::ReviewConfig;
pub use error::{DiffError, GitError, PagerError, PipelineError, ReviewError};
pub use git::{CommitId, CommitRange};
pub use pipeline::{CommitReview, Pipeline};
pub use process::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use review::PromptVariant;
