//! Idempotent pull request commenting.
//!
//! Threads created here carry the digest of the conditional inputs in their
//! `hash` property. A later run with the same conditions finds that thread
//! and posts nothing, so re-running a pipeline never duplicates the comment.

mod content;

use tracing::info;

use crate::config::Inputs;
use crate::devops::error::TaskError;
use crate::devops::gateway::GitGateway;
use crate::devops::models::{
    CommentType, NewComment, NewCommentThread, PullRequestRef, ThreadProperties, ThreadStatus,
};
use crate::validation::ResultContext;

/// Posts the configured comment at most once per set of conditions.
pub struct Commentator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    client: &'client Gateway,
    inputs: &'client Inputs,
}

impl<'client, Gateway> Commentator<'client, Gateway>
where
    Gateway: GitGateway + ?Sized,
{
    /// Creates a commentator for the given inputs.
    #[must_use]
    pub const fn new(client: &'client Gateway, inputs: &'client Inputs) -> Self {
        Self { client, inputs }
    }

    /// Creates the comment thread unless a live thread with the same hash
    /// already exists, and returns the hash either way.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures from listing or creating threads.
    pub async fn create_comment(
        &self,
        pull_request: &PullRequestRef,
        context: &ResultContext,
    ) -> Result<String, TaskError> {
        let hash = self.inputs.hashed_conditions();

        let threads = self.client.threads(pull_request).await?;
        if threads
            .iter()
            .any(|thread| thread.live_hash() == Some(hash.as_str()))
        {
            info!("A comment already exists with the hash: {hash}");
            return Ok(hash);
        }

        let thread = self.new_thread(&hash, context);
        let created = self.client.create_thread(pull_request, &thread).await?;
        info!(thread_id = ?created.id, "New comment created with the hash: {hash}");
        Ok(hash)
    }

    fn new_thread(&self, hash: &str, context: &ResultContext) -> NewCommentThread {
        NewCommentThread {
            comments: vec![NewComment {
                content: content::render(&self.inputs.comment, context),
                comment_type: CommentType::Text,
            }],
            status: ThreadStatus::Active,
            properties: ThreadProperties {
                hash: hash.to_owned(),
            },
            thread_context: content::thread_context(context),
        }
    }
}
