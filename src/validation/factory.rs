//! Builds the ordered validator list for a run.

use crate::config::Inputs;
use crate::devops::error::TaskError;
use crate::devops::gateway::GitGateway;
use crate::devops::models::PullRequestRef;

use super::{CommitExpressionValidator, FileGlobValidator, Validator};

/// Wires validators to the shared gateway and task inputs.
pub struct ValidatorFactory<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    pull_request: &'client PullRequestRef,
    inputs: &'client Inputs,
}

impl<'client, Gateway> ValidatorFactory<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a factory for one pull request.
    #[must_use]
    pub const fn new(
        client: &'client Gateway,
        pull_request: &'client PullRequestRef,
        inputs: &'client Inputs,
    ) -> Self {
        Self {
            client,
            pull_request,
            inputs,
        }
    }

    /// Returns the file glob validator followed by the commit expression
    /// validator.
    ///
    /// Both are always present; each passes through when its input is
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidGlob`] or [`TaskError::InvalidExpression`]
    /// for malformed conditions.
    pub fn create_validators(&self) -> Result<Vec<Validator<'client, Gateway>>, TaskError> {
        Ok(vec![
            Validator::FileGlob(FileGlobValidator::new(
                self.client,
                self.pull_request,
                self.inputs.file_glob.as_deref(),
            )?),
            Validator::CommitExpression(CommitExpressionValidator::new(
                self.client,
                self.pull_request,
                self.inputs.commit_expr.as_deref(),
            )?),
        ])
    }
}
