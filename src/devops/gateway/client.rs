//! HTTP client construction and authentication for the REST gateway.

use std::fmt;

use reqwest::{Client, RequestBuilder};

use crate::devops::error::TaskError;

const USER_AGENT: &str = concat!("autocomment/", env!("CARGO_PKG_VERSION"));

/// Credentials presented to Azure DevOps.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pipeline-issued OAuth token sent as a bearer token.
    Bearer(String),
    /// Personal access token sent with HTTP basic authentication.
    PersonalAccessToken(String),
}

impl Credentials {
    pub(super) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token),
            Self::PersonalAccessToken(token) => request.basic_auth("", Some(token)),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::PersonalAccessToken(_) => "personal access token",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials({})", self.kind())
    }
}

/// Builds the shared `reqwest` client.
///
/// # Errors
///
/// Returns [`TaskError::Configuration`] when the TLS backend cannot be
/// initialised.
pub(super) fn build_http_client() -> Result<Client, TaskError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| TaskError::Configuration {
            message: format!("failed to configure HTTP client: {error}"),
        })
}
