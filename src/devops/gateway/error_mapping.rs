//! Error mapping helpers for the REST gateway.

use http::StatusCode;

use crate::devops::error::TaskError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_reqwest_error(operation: &str, error: &reqwest::Error) -> TaskError {
    if error.is_decode() {
        return TaskError::Api {
            message: format!("{operation} returned an unexpected body: {error}"),
        };
    }

    TaskError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> TaskError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        TaskError::Authentication {
            message: format!("{operation} failed: Azure DevOps returned {status} {message}"),
        }
    } else {
        TaskError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}
