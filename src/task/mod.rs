//! Task orchestration and outcome reporting.
//!
//! [`TaskRunner`] composes condition evaluation with the commentator.
//! [`execute`] is the outer boundary used by the binary: it resolves inputs,
//! pipeline variables and credentials, runs the task, and turns any error
//! into a failed [`TaskResult`].

mod reporter;

pub use reporter::{escape_message, report};

use tracing::{error, info};

use crate::commentator::Commentator;
use crate::config::{Inputs, TaskConfig};
use crate::devops::error::TaskError;
use crate::devops::gateway::{GitGateway, RestGitGateway};
use crate::devops::models::PullRequestRef;
use crate::validation::{ValidatorFactory, validate_all};
use crate::variables::{VariableSource, Variables};

const CONDITIONS_NOT_MET: &str = "One or more conditions were not met";

/// Final outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// True when the task completed without problems.
    pub succeeded: bool,
    /// Status message describing the outcome.
    pub message: String,
}

impl TaskResult {
    /// A successful outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }
}

/// Evaluates the conditions for one pull request and comments when they
/// hold.
pub struct TaskRunner<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    inputs: &'client Inputs,
    pull_request: &'client PullRequestRef,
}

impl<'client, Gateway> TaskRunner<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a runner for one pull request.
    #[must_use]
    pub const fn new(
        client: &'client Gateway,
        inputs: &'client Inputs,
        pull_request: &'client PullRequestRef,
    ) -> Self {
        Self {
            client,
            inputs,
            pull_request,
        }
    }

    /// Runs the validators and, when every condition is met, the
    /// commentator.
    ///
    /// Unmet conditions are a successful outcome.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from building the validators and
    /// gateway failures from validation or commenting.
    pub async fn run(&self) -> Result<TaskResult, TaskError> {
        let validators =
            ValidatorFactory::new(self.client, self.pull_request, self.inputs).create_validators()?;
        let result = validate_all(&validators).await?;

        if !result.condition_met {
            return Ok(TaskResult::success(CONDITIONS_NOT_MET));
        }

        let hash = Commentator::new(self.client, self.inputs)
            .create_comment(self.pull_request, &result.context)
            .await?;
        Ok(TaskResult::success(format!(
            "Conditions successfully met. Comment hash: {hash}"
        )))
    }
}

/// Runs the whole task from raw configuration and pipeline variables.
///
/// Every error, including missing inputs, variables or credentials, is
/// logged and reported as a failed result carrying the error message.
pub async fn execute(config: TaskConfig, variables: &impl VariableSource) -> TaskResult {
    match try_execute(config, variables).await {
        Ok(result) => {
            info!(message = %result.message, "task completed");
            result
        }
        Err(task_error) => {
            error!(error = ?task_error, "task failed");
            TaskResult::failure(task_error.to_string())
        }
    }
}

async fn try_execute(
    config: TaskConfig,
    source: &impl VariableSource,
) -> Result<TaskResult, TaskError> {
    let inputs = Inputs::from_config(config)?;
    let variables = Variables::read(source)?;
    let credentials = variables.credentials(&inputs)?;
    let gateway = RestGitGateway::new(
        &variables.collection_uri,
        &variables.project_name,
        credentials,
    )?;
    let pull_request = variables.pull_request();

    TaskRunner::new(&gateway, &inputs, &pull_request).run().await
}

#[cfg(test)]
mod tests;
