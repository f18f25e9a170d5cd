//! Condition evaluation over pull request state.
//!
//! Each [`Validator`] inspects one aspect of the pull request and returns a
//! [`ValidationResult`] carrying the evidence it found. [`validate_all`]
//! threads the accumulated [`ResultContext`] through the validators in
//! order and stops at the first unmet condition.

mod commit_expression;
mod factory;
mod file_glob;

pub use commit_expression::CommitExpressionValidator;
pub use factory::ValidatorFactory;
pub use file_glob::FileGlobValidator;

use crate::devops::error::TaskError;
use crate::devops::gateway::GitGateway;

/// A commit whose message did not match the configured expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedCommit {
    /// Full commit identifier.
    pub hash: String,
    /// Commit message.
    pub message: String,
}

/// Evidence accumulated across validators.
///
/// Validators never mutate a context in place; each returns a new context
/// built from the one it received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultContext {
    /// Changed paths that matched the file glob, in listing order.
    pub files: Option<Vec<String>>,
    /// Commits that violated the commit expression, in listing order.
    pub commits: Option<Vec<MatchedCommit>>,
}

impl ResultContext {
    /// Returns a copy of this context with `files` replaced.
    #[must_use]
    pub fn with_files(&self, files: Vec<String>) -> Self {
        Self {
            files: Some(files),
            ..self.clone()
        }
    }

    /// Returns a copy of this context with `commits` replaced.
    #[must_use]
    pub fn with_commits(&self, commits: Vec<MatchedCommit>) -> Self {
        Self {
            commits: Some(commits),
            ..self.clone()
        }
    }
}

/// Outcome of one validator or of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when the validated condition holds.
    pub condition_met: bool,
    /// Evidence gathered so far.
    pub context: ResultContext,
}

impl ValidationResult {
    /// A satisfied condition carrying `context`.
    #[must_use]
    pub const fn met(context: ResultContext) -> Self {
        Self {
            condition_met: true,
            context,
        }
    }

    /// An unmet condition carrying `context` unchanged.
    #[must_use]
    pub const fn not_met(context: ResultContext) -> Self {
        Self {
            condition_met: false,
            context,
        }
    }
}

/// The closed set of conditions the task can evaluate.
pub enum Validator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Changed files must match a glob.
    FileGlob(FileGlobValidator<'client, Gateway>),
    /// Some commit message must violate an expression.
    CommitExpression(CommitExpressionValidator<'client, Gateway>),
}

impl<Gateway> Validator<'_, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Evaluates this condition against the pull request.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures; an unmet condition is not an error.
    pub async fn check(&self, context: &ResultContext) -> Result<ValidationResult, TaskError> {
        match self {
            Self::FileGlob(validator) => validator.check(context).await,
            Self::CommitExpression(validator) => validator.check(context).await,
        }
    }
}

/// Runs `validators` in order, short-circuiting on the first unmet one.
///
/// An empty list yields an unmet result with an empty context.
///
/// # Errors
///
/// Propagates the first validator failure.
pub async fn validate_all<Gateway>(
    validators: &[Validator<'_, Gateway>],
) -> Result<ValidationResult, TaskError>
where
    Gateway: GitGateway + ?Sized,
{
    let mut result = ValidationResult::not_met(ResultContext::default());
    for validator in validators {
        result = validator.check(&result.context).await?;
        if !result.condition_met {
            break;
        }
    }
    Ok(result)
}
