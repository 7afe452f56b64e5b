//! The review pipeline: list commits, then extract, review and diff each one in order.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ReviewConfig;
use crate::diff::render_diff;
use crate::error::PipelineError;
use crate::git::{CommitId, CommitRange, list_commits, read_commit_message};
use crate::pager::page;
use crate::process::CommandRunner;
use crate::review::review_message;

/// Outcome of reviewing one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReview {
    pub commit: CommitId,
    pub original: String,
    pub suggestion: String,
    /// Unified diff from original to suggestion; empty when they match.
    pub diff: String,
}

/// Sequential review of a commit range.
pub struct Pipeline<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    repo_dir: PathBuf,
    config: ReviewConfig,
}

impl<'r, R: CommandRunner + ?Sized> Pipeline<'r, R> {
    pub fn new(runner: &'r R, repo_dir: impl Into<PathBuf>, config: ReviewConfig) -> Self {
        Self {
            runner,
            repo_dir: repo_dir.into(),
            config,
        }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Commits in `range`, in `git rev-list` order.
    pub async fn commits(&self, range: &CommitRange) -> Result<Vec<CommitId>, PipelineError> {
        Ok(list_commits(self.runner, &self.repo_dir, range).await?)
    }

    /// Review every commit in `range`.
    pub async fn review_range(
        &self,
        range: &CommitRange,
    ) -> Result<Vec<CommitReview>, PipelineError> {
        let commits = self.commits(range).await?;
        self.review_commits(&commits).await
    }

    /// Review `commits` one at a time, in order.
    ///
    /// Stops at the first review failure; nothing reviewed so far is returned.
    pub async fn review_commits(
        &self,
        commits: &[CommitId],
    ) -> Result<Vec<CommitReview>, PipelineError> {
        let total = commits.len();
        let mut reviews = Vec::with_capacity(total);

        for (idx, commit) in commits.iter().enumerate() {
            info!("Reviewing {} ({}/{})", commit.short(), idx + 1, total);
            reviews.push(self.review_commit(commit, idx + 1, total).await?);
        }

        Ok(reviews)
    }

    /// Review `commits` and stream the rendered diffs into `pager`.
    ///
    /// The pager is only started once every review has succeeded, and not at
    /// all for an empty list.
    pub async fn review_and_page(
        &self,
        commits: &[CommitId],
        pager: &str,
    ) -> Result<(), PipelineError> {
        let reviews = self.review_commits(commits).await?;
        if reviews.is_empty() {
            return Ok(());
        }

        page(self.runner, pager, &render(&reviews)).await?;
        Ok(())
    }

    async fn review_commit(
        &self,
        commit: &CommitId,
        position: usize,
        total: usize,
    ) -> Result<CommitReview, PipelineError> {
        let original = read_commit_message(self.runner, &self.repo_dir, commit).await?;

        let suggestion = review_message(self.runner, &self.config, &original)
            .await
            .map_err(|source| PipelineError::Review {
                commit: commit.to_string(),
                position,
                total,
                source,
            })?;

        let diff = render_diff(self.runner, commit, &original, &suggestion)
            .await
            .map_err(|source| PipelineError::Diff {
                commit: commit.to_string(),
                source,
            })?;

        if diff.is_empty() {
            debug!("{}: no changes suggested", commit.short());
        } else {
            debug!("{}: changes suggested", commit.short());
        }

        Ok(CommitReview {
            commit: commit.clone(),
            original,
            suggestion,
            diff,
        })
    }
}

/// Join the per-commit diffs with `\n`, in commit order.
pub fn render(reviews: &[CommitReview]) -> String {
    reviews
        .iter()
        .map(|review| review.diff.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
