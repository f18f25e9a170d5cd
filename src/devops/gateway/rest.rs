//! `reqwest`-backed gateway for the Azure DevOps Git REST API.

use async_trait::async_trait;
use http::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::devops::error::TaskError;
use crate::devops::models::{
    ApiCommentThread, ApiCommitRef, ApiIteration, ApiIterationChanges, ApiList, CommentThread,
    CommitPage, IterationChanges, IterationChangesParams, NewCommentThread, PullRequestIteration,
    PullRequestRef,
};

use super::GitGateway;
use super::client::{Credentials, build_http_client};
use super::error_mapping::{map_http_error, map_reqwest_error};
use super::http_utils::{continuation_token, extract_service_message};

const API_VERSION: &str = "7.0";
const COMMIT_PAGE_SIZE: &str = "100";

/// Gateway that talks to an Azure DevOps collection over HTTPS.
#[derive(Debug)]
pub struct RestGitGateway {
    client: Client,
    credentials: Credentials,
    collection: Url,
    project: String,
}

impl RestGitGateway {
    /// Creates a gateway for one project of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidVariable`] when `collection_uri` is not an
    /// absolute URL, or [`TaskError::Configuration`] when the HTTP client
    /// cannot be built.
    pub fn new(
        collection_uri: &str,
        project: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, TaskError> {
        let collection = Url::parse(collection_uri)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| TaskError::InvalidVariable {
                name: "SYSTEM_COLLECTIONURI".to_owned(),
                value: collection_uri.to_owned(),
            })?;

        Ok(Self {
            client: build_http_client()?,
            credentials,
            collection,
            project: project.into(),
        })
    }

    /// Builds `<collection>/<project>/_apis/git/repositories/<repo>/pullRequests/<id>/<tail>`.
    fn pull_request_url(&self, pull_request: &PullRequestRef, tail: &[&str]) -> Url {
        let mut url = self.collection.clone();
        let pull_request_id = pull_request.pull_request_id.to_string();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    self.project.as_str(),
                    "_apis",
                    "git",
                    "repositories",
                    pull_request.repository_id.as_str(),
                    "pullRequests",
                    pull_request_id.as_str(),
                ])
                .extend(tail);
        }
        url
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        self.credentials
            .apply(builder)
            .query(&[("api-version", API_VERSION)])
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> Result<(T, HeaderMap), TaskError> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(
                operation,
                status,
                extract_service_message(&body),
            ));
        }

        let headers = response.headers().clone();
        let payload = response
            .json::<T>()
            .await
            .map_err(|error| map_reqwest_error(operation, &error))?;
        Ok((payload, headers))
    }
}

#[async_trait]
impl GitGateway for RestGitGateway {
    async fn pull_request_iterations(
        &self,
        pull_request: &PullRequestRef,
    ) -> Result<Vec<PullRequestIteration>, TaskError> {
        let url = self.pull_request_url(pull_request, &["iterations"]);
        let (list, _): (ApiList<ApiIteration>, _) = self
            .send_json("list iterations", self.client.get(url))
            .await?;
        Ok(list.value.into_iter().map(Into::into).collect())
    }

    async fn pull_request_iteration_changes(
        &self,
        pull_request: &PullRequestRef,
        params: IterationChangesParams,
    ) -> Result<IterationChanges, TaskError> {
        let iteration_id = params.iteration_id.to_string();
        let url = self.pull_request_url(
            pull_request,
            &["iterations", iteration_id.as_str(), "changes"],
        );

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(top) = params.top {
            query.push(("$top", top.to_string()));
        }
        if let Some(skip) = params.skip {
            query.push(("$skip", skip.to_string()));
        }
        if let Some(compare_to) = params.compare_to {
            query.push(("$compareTo", compare_to.to_string()));
        }

        let (changes, _): (ApiIterationChanges, _) = self
            .send_json("list iteration changes", self.client.get(url).query(&query))
            .await?;
        Ok(changes.into())
    }

    async fn pull_request_commits(
        &self,
        pull_request: &PullRequestRef,
        continuation_token_value: Option<String>,
    ) -> Result<CommitPage, TaskError> {
        let url = self.pull_request_url(pull_request, &["commits"]);

        let mut query = vec![("$top", COMMIT_PAGE_SIZE.to_owned())];
        if let Some(token) = continuation_token_value {
            query.push(("continuationToken", token));
        }

        let (list, headers): (ApiList<ApiCommitRef>, _) = self
            .send_json("list commits", self.client.get(url).query(&query))
            .await?;
        Ok(CommitPage {
            commits: list.value.into_iter().map(Into::into).collect(),
            continuation_token: continuation_token(&headers),
        })
    }

    async fn threads(&self, pull_request: &PullRequestRef) -> Result<Vec<CommentThread>, TaskError> {
        let url = self.pull_request_url(pull_request, &["threads"]);
        let (list, _): (ApiList<ApiCommentThread>, _) =
            self.send_json("list threads", self.client.get(url)).await?;
        Ok(list.value.into_iter().map(Into::into).collect())
    }

    async fn create_thread(
        &self,
        pull_request: &PullRequestRef,
        thread: &NewCommentThread,
    ) -> Result<CommentThread, TaskError> {
        let url = self.pull_request_url(pull_request, &["threads"]);
        let (created, _): (ApiCommentThread, _) = self
            .send_json("create thread", self.client.post(url).json(thread))
            .await?;
        Ok(created.into())
    }
}
