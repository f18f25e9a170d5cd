//! Azure DevOps pull request access.
//!
//! This module wraps the Git REST API behind the [`GitGateway`] trait and
//! maps transport and service failures into [`TaskError`] so that callers
//! can surface precise failures at the task boundary.

pub mod error;
pub mod gateway;
pub mod models;
pub mod pagination;

pub use error::TaskError;
pub use gateway::{Credentials, GitGateway, RestGitGateway};
pub use models::{
    ChangeEntry, CommentThread, CommitPage, CommitRef, IterationChanges, IterationChangesParams,
    NewCommentThread, PullRequestIteration, PullRequestRef,
};
pub use pagination::CommitPager;

#[cfg(test)]
pub use gateway::MockGitGateway;
