//! Autocomment library crate providing conditional pull request comments
//! for Azure DevOps pipelines.
//!
//! A run evaluates the configured conditions (changed-file glob, commit
//! message expression) against one pull request and, when they all hold,
//! posts a comment thread keyed by a digest of those conditions so that
//! repeated runs never duplicate it.

pub mod commentator;
pub mod config;
pub mod devops;
pub mod task;
pub mod validation;
pub mod variables;

pub use commentator::Commentator;
pub use config::{Inputs, TaskConfig};
pub use devops::{Credentials, GitGateway, PullRequestRef, RestGitGateway, TaskError};
pub use task::{TaskResult, TaskRunner, execute, report};
pub use validation::{ResultContext, ValidationResult, validate_all};
pub use variables::{ProcessEnvironment, VariableSource, Variables};
