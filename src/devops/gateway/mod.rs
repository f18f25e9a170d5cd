//! Gateways for the Azure DevOps Git pull request API.
//!
//! The trait-based design enables mocking in tests while the `reqwest`
//! implementation handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod rest;

pub use client::Credentials;
pub use rest::RestGitGateway;

use async_trait::async_trait;

use crate::devops::error::TaskError;
use crate::devops::models::{
    CommentThread, CommitPage, IterationChanges, IterationChangesParams, NewCommentThread,
    PullRequestIteration, PullRequestRef,
};

/// Gateway over the pull request resources the task reads and writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitGateway: Send + Sync {
    /// List every iteration of the pull request.
    async fn pull_request_iterations(
        &self,
        pull_request: &PullRequestRef,
    ) -> Result<Vec<PullRequestIteration>, TaskError>;

    /// Fetch one page of changed files for an iteration.
    async fn pull_request_iteration_changes(
        &self,
        pull_request: &PullRequestRef,
        params: IterationChangesParams,
    ) -> Result<IterationChanges, TaskError>;

    /// Fetch one page of pull request commits.
    ///
    /// Pass the token returned with the previous page to continue.
    async fn pull_request_commits(
        &self,
        pull_request: &PullRequestRef,
        continuation_token: Option<String>,
    ) -> Result<CommitPage, TaskError>;

    /// List every comment thread on the pull request.
    async fn threads(&self, pull_request: &PullRequestRef) -> Result<Vec<CommentThread>, TaskError>;

    /// Create a comment thread on the pull request.
    async fn create_thread(
        &self,
        pull_request: &PullRequestRef,
        thread: &NewCommentThread,
    ) -> Result<CommentThread, TaskError>;
}
