//! Unit tests for the task runner and its failure boundary.

use std::collections::HashMap;

use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{TaskResult, TaskRunner, execute};
use crate::config::{Inputs, TaskConfig};
use crate::devops::error::TaskError;
use crate::devops::gateway::MockGitGateway;
use crate::devops::models::{
    ChangeEntry, CommentThread, IterationChanges, PullRequestIteration, PullRequestRef,
};

#[fixture]
fn pull_request() -> PullRequestRef {
    PullRequestRef::new("foo", 7357)
}

fn expect_changed_file(gateway: &mut MockGitGateway, file: &'static str) {
    gateway
        .expect_pull_request_iterations()
        .times(1)
        .returning(|_| Ok(vec![PullRequestIteration { id: Some(1) }]));
    gateway
        .expect_pull_request_iteration_changes()
        .times(1)
        .returning(move |_, _| {
            Ok(IterationChanges {
                change_entries: vec![ChangeEntry {
                    path: Some(file.to_owned()),
                }],
                next_top: None,
                next_skip: None,
            })
        });
}

#[rstest]
#[tokio::test]
async fn unmet_conditions_succeed_without_comment(pull_request: PullRequestRef) {
    let mut gateway = MockGitGateway::new();
    expect_changed_file(&mut gateway, "/docs/readme.md");
    gateway.expect_threads().times(0);
    gateway.expect_create_thread().times(0);
    let inputs = Inputs::new("Hello").with_file_glob("/src/**");

    let result = TaskRunner::new(&gateway, &inputs, &pull_request).run().await;

    assert_eq!(
        result,
        Ok(TaskResult::success("One or more conditions were not met"))
    );
}

#[rstest]
#[tokio::test]
async fn met_conditions_report_comment_hash(pull_request: PullRequestRef) {
    let mut gateway = MockGitGateway::new();
    expect_changed_file(&mut gateway, "/src/lib.rs");
    gateway
        .expect_threads()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    gateway
        .expect_create_thread()
        .times(1)
        .returning(|_, _| Ok(CommentThread::default()));
    let inputs = Inputs::new("Hello").with_file_glob("/src/**");
    let hash = inputs.hashed_conditions();

    let result = TaskRunner::new(&gateway, &inputs, &pull_request).run().await;

    assert_eq!(
        result,
        Ok(TaskResult::success(format!(
            "Conditions successfully met. Comment hash: {hash}"
        )))
    );
}

#[rstest]
#[tokio::test]
async fn gateway_failures_propagate(pull_request: PullRequestRef) {
    let mut gateway = MockGitGateway::new();
    gateway.expect_pull_request_iterations().returning(|_| {
        Err(TaskError::Network {
            message: "connection reset".to_owned(),
        })
    });
    let inputs = Inputs::new("Hello").with_file_glob("/src/**");

    let result = TaskRunner::new(&gateway, &inputs, &pull_request).run().await;

    assert_eq!(
        result,
        Err(TaskError::Network {
            message: "connection reset".to_owned(),
        })
    );
}

#[rstest]
#[tokio::test]
async fn malformed_expression_fails_before_any_request(pull_request: PullRequestRef) {
    let gateway = MockGitGateway::new();
    let inputs = Inputs::new("Hello").with_commit_expr("[unclosed");

    let result = TaskRunner::new(&gateway, &inputs, &pull_request).run().await;

    assert!(matches!(result, Err(TaskError::InvalidExpression { .. })));
}

fn config(comment: Option<&str>) -> TaskConfig {
    TaskConfig {
        comment: comment.map(ToOwned::to_owned),
        ..TaskConfig::default()
    }
}

fn pipeline_variables(collection_uri: &str) -> HashMap<String, String> {
    [
        ("SYSTEM_COLLECTIONURI", collection_uri),
        ("SYSTEM_ACCESSTOKEN", "system-token"),
        ("BUILD_REPOSITORY_ID", "repo-1"),
        ("SYSTEM_PULLREQUEST_PULLREQUESTID", "42"),
        ("SYSTEM_TEAMPROJECT", "proj"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_owned(), value.to_owned()))
    .collect()
}

#[rstest]
#[case::missing_comment(
    config(None),
    &[],
    "Input required: comment"
)]
#[case::missing_variable(
    config(Some("Hello")),
    &["BUILD_REPOSITORY_ID"],
    "Environment variable 'BUILD_REPOSITORY_ID' is required but no value was found"
)]
#[case::missing_authentication(
    config(Some("Hello")),
    &["SYSTEM_ACCESSTOKEN"],
    "No valid authentication type found"
)]
#[tokio::test]
async fn boundary_reports_errors_as_failures(
    #[case] task_config: TaskConfig,
    #[case] removed: &[&str],
    #[case] expected: &str,
) {
    let mut variables = pipeline_variables("https://dev.azure.com/org/");
    for name in removed {
        variables.remove(*name);
    }

    let result = execute(task_config, &variables).await;

    assert_eq!(result, TaskResult::failure(expected));
}

#[tokio::test]
async fn boundary_runs_against_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/org/proj/_apis/git/repositories/repo-1/pullRequests/42/threads",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(
            "/org/proj/_apis/git/repositories/repo-1/pullRequests/42/threads",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;
    let variables = pipeline_variables(&format!("{}/org/", server.uri()));

    let result = execute(config(Some("Hello")), &variables).await;

    assert!(result.succeeded, "unexpected failure: {}", result.message);
    assert!(
        result
            .message
            .starts_with("Conditions successfully met. Comment hash: "),
        "unexpected message: {}",
        result.message
    );
}
