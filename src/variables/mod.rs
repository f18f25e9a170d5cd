//! Pipeline variables describing the pull request under validation.
//!
//! Reads go through the [`VariableSource`] capability so that the rest of
//! the task never touches process-global state directly.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::hash::BuildHasher;

use crate::config::Inputs;
use crate::devops::error::TaskError;
use crate::devops::gateway::Credentials;
use crate::devops::models::PullRequestRef;

const COLLECTION_URI: &str = "SYSTEM_COLLECTIONURI";
const ACCESS_TOKEN: &str = "SYSTEM_ACCESSTOKEN";
const REPOSITORY_ID: &str = "BUILD_REPOSITORY_ID";
const PULL_REQUEST_ID: &str = "SYSTEM_PULLREQUEST_PULLREQUESTID";
const PROJECT_NAME: &str = "SYSTEM_TEAMPROJECT";

/// Source of named pipeline variables.
pub trait VariableSource {
    /// Returns the value of `name`, or `None` when it is not set.
    fn variable(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl VariableSource for ProcessEnvironment {
    fn variable(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl<S: BuildHasher> VariableSource for HashMap<String, String, S> {
    fn variable(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Pipeline variables required by a run.
#[derive(Clone, PartialEq, Eq)]
pub struct Variables {
    /// Organisation or collection URL, e.g. `https://dev.azure.com/org/`.
    pub collection_uri: String,
    /// Pipeline-issued OAuth token, when the job exposes one.
    pub access_token: Option<String>,
    /// Repository identifier.
    pub repository_id: String,
    /// Pull request identifier.
    pub pull_request_id: u32,
    /// Team project name.
    pub project_name: String,
}

impl fmt::Debug for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variables")
            .field("collection_uri", &self.collection_uri)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("repository_id", &self.repository_id)
            .field("pull_request_id", &self.pull_request_id)
            .field("project_name", &self.project_name)
            .finish()
    }
}

impl Variables {
    /// Reads every variable from `source`.
    ///
    /// The access token is optional here; it is only required when no
    /// personal access token input is supplied (see [`Self::credentials`]).
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingVariable`] for the first unset variable
    /// and [`TaskError::InvalidVariable`] when the pull request id is not a
    /// positive integer.
    pub fn read(source: &impl VariableSource) -> Result<Self, TaskError> {
        Ok(Self {
            collection_uri: required(source, COLLECTION_URI)?,
            access_token: source.variable(ACCESS_TOKEN),
            repository_id: required(source, REPOSITORY_ID)?,
            pull_request_id: parse_pull_request_id(&required(source, PULL_REQUEST_ID)?)?,
            project_name: required(source, PROJECT_NAME)?,
        })
    }

    /// The pull request this run targets.
    #[must_use]
    pub fn pull_request(&self) -> PullRequestRef {
        PullRequestRef::new(self.repository_id.clone(), self.pull_request_id)
    }

    /// Chooses credentials: the `PAT` input wins over the system token.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingAuthentication`] when neither is present.
    pub fn credentials(&self, inputs: &Inputs) -> Result<Credentials, TaskError> {
        if let Some(pat) = inputs.pat.as_deref() {
            return Ok(Credentials::PersonalAccessToken(pat.to_owned()));
        }
        self.access_token
            .clone()
            .map(Credentials::Bearer)
            .ok_or(TaskError::MissingAuthentication)
    }
}

fn required(source: &impl VariableSource, name: &str) -> Result<String, TaskError> {
    source
        .variable(name)
        .ok_or_else(|| TaskError::MissingVariable {
            name: name.to_owned(),
        })
}

fn parse_pull_request_id(raw: &str) -> Result<u32, TaskError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| TaskError::InvalidVariable {
            name: PULL_REQUEST_ID.to_owned(),
            value: raw.to_owned(),
        })
}
