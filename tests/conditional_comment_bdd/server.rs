//! Mock Azure DevOps Git service for behavioural tests.

use std::collections::HashMap;
use std::future::Future;
use std::io;

use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PULL_REQUEST_PATH: &str = "/org/proj/_apis/git/repositories/repo-1/pullRequests/42";

/// A Wiremock server impersonating one pull request, with the runtime that
/// drives it.
pub(crate) struct DevOpsServer {
    runtime: Runtime,
    server: MockServer,
}

impl DevOpsServer {
    /// Starts the runtime and the mock server.
    pub(crate) fn start() -> io::Result<Self> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self { runtime, server })
    }

    /// Drives `future` to completion on the scenario runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Pipeline variables pointing the task at this server.
    pub(crate) fn pipeline_variables(&self) -> HashMap<String, String> {
        let collection_uri = format!("{}/org/", self.server.uri());
        [
            ("SYSTEM_COLLECTIONURI", collection_uri.as_str()),
            ("SYSTEM_ACCESSTOKEN", "system-token"),
            ("BUILD_REPOSITORY_ID", "repo-1"),
            ("SYSTEM_PULLREQUEST_PULLREQUESTID", "42"),
            ("SYSTEM_TEAMPROJECT", "proj"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
    }

    /// Serves a single iteration whose changes touch `paths`.
    pub(crate) fn serve_changed_files(&self, paths: &[String]) {
        let entries: Vec<Value> = paths
            .iter()
            .map(|changed| json!({ "changeType": "edit", "item": { "path": changed } }))
            .collect();
        self.mount_get(
            "iterations",
            json!({ "count": 1, "value": [{ "id": 1 }] }),
        );
        self.mount_get(
            "iterations/1/changes",
            json!({ "changeEntries": entries, "nextSkip": 0, "nextTop": 0 }),
        );
    }

    /// Serves one commit page containing `messages`.
    pub(crate) fn serve_commits(&self, messages: &[String]) {
        let commits: Vec<Value> = messages
            .iter()
            .enumerate()
            .map(|(index, message)| {
                json!({ "commitId": format!("{index:040x}"), "comment": message })
            })
            .collect();
        self.mount_get("commits", json!({ "count": commits.len(), "value": commits }));
    }

    /// Serves `threads` as the existing threads and accepts new ones.
    pub(crate) fn serve_threads(&self, threads: Vec<Value>) {
        self.mount_get("threads", json!({ "count": threads.len(), "value": threads }));
        let create = Mock::given(method("POST"))
            .and(path(format!("{PULL_REQUEST_PATH}/threads")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 100 })));
        self.block_on(create.mount(&self.server));
    }

    /// Bodies of every thread the task posted.
    pub(crate) fn created_threads(&self) -> Vec<Value> {
        let thread_path = format!("{PULL_REQUEST_PATH}/threads");
        self.block_on(self.server.received_requests())
            .unwrap_or_default()
            .into_iter()
            .filter(|request| {
                request.method.as_str() == "POST" && request.url.path() == thread_path
            })
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    fn mount_get(&self, tail: &str, body: Value) {
        let mock = Mock::given(method("GET"))
            .and(path(format!("{PULL_REQUEST_PATH}/{tail}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body));
        self.block_on(mock.mount(&self.server));
    }
}
