//! Data models for the Azure DevOps Git REST resources used by the task.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types. Outgoing payloads are serialised
//! directly from the public `New*` types.

use serde::{Deserialize, Serialize};

/// Identifies the pull request a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Repository identifier (GUID or name).
    pub repository_id: String,
    /// Numeric pull request identifier within the repository.
    pub pull_request_id: u32,
}

impl PullRequestRef {
    /// Creates a reference from its parts.
    #[must_use]
    pub fn new(repository_id: impl Into<String>, pull_request_id: u32) -> Self {
        Self {
            repository_id: repository_id.into(),
            pull_request_id,
        }
    }
}

/// A versioned snapshot of a pull request's diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullRequestIteration {
    /// Iteration identifier; absent on malformed entries.
    pub id: Option<u32>,
}

/// Parameters for one page of iteration changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationChangesParams {
    /// Iteration whose changes are listed.
    pub iteration_id: u32,
    /// Iteration to compare against; the service defaults to the base.
    pub compare_to: Option<u32>,
    /// Page size cursor returned by the previous page.
    pub top: Option<i64>,
    /// Skip cursor returned by the previous page.
    pub skip: Option<i64>,
}

impl IterationChangesParams {
    /// Parameters for the first page of an iteration's changes.
    #[must_use]
    pub const fn first_page(iteration_id: u32) -> Self {
        Self {
            iteration_id,
            compare_to: None,
            top: None,
            skip: None,
        }
    }

    /// Parameters for the page following `changes`.
    #[must_use]
    pub const fn following(self, changes: &IterationChanges) -> Self {
        Self {
            top: changes.next_top,
            skip: changes.next_skip,
            ..self
        }
    }
}

/// One page of changed files for an iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationChanges {
    /// Changed entries on this page.
    pub change_entries: Vec<ChangeEntry>,
    /// Server cursor for the next page size.
    pub next_top: Option<i64>,
    /// Server cursor for the next page offset.
    pub next_skip: Option<i64>,
}

impl IterationChanges {
    /// Returns true while the server reports a positive `nextTop` cursor.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_top.is_some_and(|top| top > 0)
    }
}

/// A single changed file in an iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEntry {
    /// Repository path of the changed item.
    pub path: Option<String>,
}

/// A commit reference as listed on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRef {
    /// Full commit identifier.
    pub commit_id: Option<String>,
    /// Commit message.
    pub comment: Option<String>,
}

impl CommitRef {
    /// Returns the identifier and message when both are present.
    #[must_use]
    pub fn well_formed(&self) -> Option<(&str, &str)> {
        Some((self.commit_id.as_deref()?, self.comment.as_deref()?))
    }
}

/// One page of pull request commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPage {
    /// Commits on this page in service order.
    pub commits: Vec<CommitRef>,
    /// Opaque cursor for the next page, if more remain.
    pub continuation_token: Option<String>,
}

/// An existing comment thread on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    /// Thread identifier.
    pub id: Option<u64>,
    /// Whether the thread has been deleted.
    pub is_deleted: bool,
    /// Idempotency key stored in `properties.hash`, when it is a string.
    pub hash: Option<String>,
}

impl CommentThread {
    /// Returns the hash when this thread was created by the task and is
    /// still live.
    #[must_use]
    pub fn live_hash(&self) -> Option<&str> {
        if self.is_deleted {
            return None;
        }
        self.hash.as_deref()
    }
}

/// Payload for creating a comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentThread {
    /// Comments in the thread; the task always posts one.
    pub comments: Vec<NewComment>,
    /// Initial thread status.
    pub status: ThreadStatus,
    /// Thread properties carrying the idempotency key.
    pub properties: ThreadProperties,
    /// File anchor for the thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_context: Option<ThreadContext>,
}

/// A comment inside a new thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Markdown content.
    pub content: String,
    /// Comment kind.
    pub comment_type: CommentType,
}

/// Kind of comment posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentType {
    /// Plain user-style text comment.
    Text,
}

/// Status of a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThreadStatus {
    /// Open and awaiting resolution.
    Active,
}

/// Properties attached to threads created by the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadProperties {
    /// Digest of the conditional inputs that produced the thread.
    pub hash: String,
}

/// Anchors a thread to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadContext {
    /// Repository path of the anchored file.
    pub file_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiList<T> {
    #[serde(default = "Vec::new")]
    pub(crate) value: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIteration {
    pub(crate) id: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiIterationChanges {
    pub(crate) change_entries: Option<Vec<ApiChangeEntry>>,
    pub(crate) next_top: Option<i64>,
    pub(crate) next_skip: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiChangeEntry {
    pub(crate) item: Option<ApiItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiItem {
    pub(crate) path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCommitRef {
    pub(crate) commit_id: Option<String>,
    pub(crate) comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCommentThread {
    pub(crate) id: Option<u64>,
    pub(crate) is_deleted: Option<bool>,
    pub(crate) properties: Option<ApiThreadProperties>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiThreadProperties {
    pub(crate) hash: Option<ApiPropertyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPropertyValue {
    #[serde(rename = "$value")]
    pub(crate) value: Option<serde_json::Value>,
}

impl From<ApiIteration> for PullRequestIteration {
    fn from(value: ApiIteration) -> Self {
        Self { id: value.id }
    }
}

impl From<ApiIterationChanges> for IterationChanges {
    fn from(value: ApiIterationChanges) -> Self {
        Self {
            change_entries: value
                .change_entries
                .unwrap_or_default()
                .into_iter()
                .map(|entry| ChangeEntry {
                    path: entry.item.and_then(|item| item.path),
                })
                .collect(),
            next_top: value.next_top,
            next_skip: value.next_skip,
        }
    }
}

impl From<ApiCommitRef> for CommitRef {
    fn from(value: ApiCommitRef) -> Self {
        Self {
            commit_id: value.commit_id,
            comment: value.comment,
        }
    }
}

impl From<ApiCommentThread> for CommentThread {
    fn from(value: ApiCommentThread) -> Self {
        let hash = value
            .properties
            .and_then(|properties| properties.hash)
            .and_then(|hash| hash.value)
            .and_then(|raw| raw.as_str().map(ToOwned::to_owned));
        Self {
            id: value.id,
            is_deleted: value.is_deleted.unwrap_or(false),
            hash,
        }
    }
}
