//! Commit message expression condition.

use regex::Regex;
use tracing::info;

use crate::devops::error::TaskError;
use crate::devops::gateway::GitGateway;
use crate::devops::models::PullRequestRef;
use crate::devops::pagination::CommitPager;

use super::{MatchedCommit, ResultContext, ValidationResult};

/// Checks every commit message in the pull request against an expression.
///
/// The condition is inverted: it is met when at least one commit message
/// does **not** match, and those offending commits become the evidence.
pub struct CommitExpressionValidator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    pull_request: &'client PullRequestRef,
    expression: Option<Regex>,
}

impl<'client, Gateway> CommitExpressionValidator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a validator; `None` disables the condition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidExpression`] when the expression does not
    /// compile.
    pub fn new(
        client: &'client Gateway,
        pull_request: &'client PullRequestRef,
        commit_expr: Option<&str>,
    ) -> Result<Self, TaskError> {
        let expression = commit_expr
            .map(|raw| {
                Regex::new(raw).map_err(|error| TaskError::InvalidExpression {
                    expression: raw.to_owned(),
                    message: error.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            client,
            pull_request,
            expression,
        })
    }

    /// Passes when some well-formed commit's message fails to match; those
    /// commits are recorded as `commits` in the returned context.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures from any commit page.
    pub async fn check(&self, context: &ResultContext) -> Result<ValidationResult, TaskError> {
        let Some(expression) = self.expression.as_ref() else {
            return Ok(ValidationResult::met(context.clone()));
        };

        let commits = CommitPager::new(self.client, self.pull_request)
            .all_pull_request_commits()
            .await?;

        let offenders: Vec<MatchedCommit> = commits
            .iter()
            .filter_map(|commit| commit.well_formed())
            .filter(|(_, message)| !expression.is_match(message))
            .map(|(hash, message)| MatchedCommit {
                hash: hash.to_owned(),
                message: message.to_owned(),
            })
            .collect();

        if offenders.is_empty() {
            info!("No match found for the commit expression");
            return Ok(ValidationResult::not_met(context.clone()));
        }

        let listing: Vec<String> = offenders
            .iter()
            .map(|commit| format!("{} {}", commit.hash, commit.message))
            .collect();
        info!(
            "Found the following matches for the commit expression:\n    {}",
            listing.join("\n    ")
        );
        Ok(ValidationResult::met(context.with_commits(offenders)))
    }
}
