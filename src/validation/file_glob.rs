//! Changed-file glob condition.

use globset::{GlobBuilder, GlobMatcher};
use tracing::info;

use crate::devops::error::TaskError;
use crate::devops::gateway::GitGateway;
use crate::devops::models::{IterationChangesParams, PullRequestRef};

use super::{ResultContext, ValidationResult};

/// Matches the paths changed in the latest iteration against a glob.
///
/// `*` does not cross `/`; `**` spans directories.
pub struct FileGlobValidator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    pull_request: &'client PullRequestRef,
    matcher: Option<GlobMatcher>,
}

impl<'client, Gateway> FileGlobValidator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a validator; `None` disables the condition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidGlob`] when the pattern does not compile.
    pub fn new(
        client: &'client Gateway,
        pull_request: &'client PullRequestRef,
        file_glob: Option<&str>,
    ) -> Result<Self, TaskError> {
        let matcher = file_glob.map(compile_glob).transpose()?;
        Ok(Self {
            client,
            pull_request,
            matcher,
        })
    }

    /// Passes when at least one changed path matches; the matches are
    /// recorded as `files` in the returned context.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures and [`TaskError::MissingIteration`].
    pub async fn check(&self, context: &ResultContext) -> Result<ValidationResult, TaskError> {
        let Some(matcher) = self.matcher.as_ref() else {
            return Ok(ValidationResult::met(context.clone()));
        };

        let files = self.matching_paths(matcher).await?;
        if files.is_empty() {
            info!("No match found for the glob expression");
            return Ok(ValidationResult::not_met(context.clone()));
        }

        info!(
            "Found the following matches for the glob expression:\n    {}",
            files.join("\n    ")
        );
        Ok(ValidationResult::met(context.with_files(files)))
    }

    async fn matching_paths(&self, matcher: &GlobMatcher) -> Result<Vec<String>, TaskError> {
        let iteration_id = self.last_iteration_id().await?;
        let mut params = IterationChangesParams::first_page(iteration_id);
        let mut files = Vec::new();

        loop {
            let changes = self
                .client
                .pull_request_iteration_changes(self.pull_request, params)
                .await?;

            files.extend(
                changes
                    .change_entries
                    .iter()
                    .filter_map(|entry| entry.path.as_deref())
                    .filter(|path| matcher.is_match(path))
                    .map(ToOwned::to_owned),
            );

            if !changes.has_next_page() {
                break;
            }
            params = params.following(&changes);
        }

        Ok(files)
    }

    async fn last_iteration_id(&self) -> Result<u32, TaskError> {
        self.client
            .pull_request_iterations(self.pull_request)
            .await?
            .into_iter()
            .filter_map(|iteration| iteration.id)
            .max()
            .ok_or(TaskError::MissingIteration {
                pull_request_id: self.pull_request.pull_request_id,
            })
    }
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, TaskError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|error| TaskError::InvalidGlob {
            pattern: pattern.to_owned(),
            message: error.to_string(),
        })
}
