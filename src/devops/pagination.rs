//! Continuation-token traversal of pull request commits.
//!
//! The commit listing endpoint returns at most one page per request and
//! advertises further pages through the `x-ms-continuationtoken` header.
//! [`CommitPager`] follows those tokens until the service stops issuing
//! them and hands back a single ordered list.

use tracing::debug;

use super::error::TaskError;
use super::gateway::GitGateway;
use super::models::{CommitRef, PullRequestRef};

/// Materialises every commit of one pull request.
pub struct CommitPager<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    pull_request: &'client PullRequestRef,
}

impl<'client, Gateway> CommitPager<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a pager over the commits of `pull_request`.
    #[must_use]
    pub const fn new(client: &'client Gateway, pull_request: &'client PullRequestRef) -> Self {
        Self {
            client,
            pull_request,
        }
    }

    /// Fetches all commits, concatenating pages in the order served.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure; pages already fetched are
    /// discarded and no retry is attempted.
    pub async fn all_pull_request_commits(&self) -> Result<Vec<CommitRef>, TaskError> {
        let mut commits = Vec::new();
        let mut continuation_token = None;
        let mut pages = 0_usize;

        loop {
            let page = self
                .client
                .pull_request_commits(self.pull_request, continuation_token)
                .await?;
            pages += 1;
            commits.extend(page.commits);

            match page.continuation_token {
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        debug!(
            pages,
            commits = commits.len(),
            "fetched pull request commits"
        );
        Ok(commits)
    }
}
