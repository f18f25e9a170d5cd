//! Error types exposed by the Azure DevOps task layer.

use thiserror::Error;

/// Errors surfaced while reading configuration or talking to Azure DevOps.
///
/// Negative validation outcomes and duplicate comments are not errors; they
/// are reported through [`crate::task::TaskResult`] instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// A required pipeline variable was not set.
    #[error("Environment variable '{name}' is required but no value was found")]
    MissingVariable {
        /// Name of the pipeline variable.
        name: String,
    },

    /// Neither a personal access token nor a system access token is present.
    #[error("No valid authentication type found")]
    MissingAuthentication,

    /// A pipeline variable was set to a value that cannot be used.
    #[error("Environment variable '{name}' has an invalid value: {value}")]
    InvalidVariable {
        /// Name of the pipeline variable.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// A required task input was not supplied.
    #[error("Input required: {name}")]
    MissingInput {
        /// Name of the task input.
        name: String,
    },

    /// The configured file glob could not be compiled.
    #[error("file glob '{pattern}' is invalid: {message}")]
    InvalidGlob {
        /// The glob as configured.
        pattern: String,
        /// Parser detail.
        message: String,
    },

    /// The configured commit expression is not a valid regular expression.
    #[error("commit expression '{expression}' is invalid: {message}")]
    InvalidExpression {
        /// The expression as configured.
        expression: String,
        /// Parser detail.
        message: String,
    },

    /// The pull request reported no iteration with an identifier.
    #[error("pull request {pull_request_id} has no iterations")]
    MissingIteration {
        /// Pull request whose iterations were listed.
        pull_request_id: u32,
    },

    /// Azure DevOps rejected the credentials.
    #[error("Azure DevOps rejected the credentials: {message}")]
    Authentication {
        /// Status and message returned with the 401/403 response.
        message: String,
    },

    /// Azure DevOps returned a non-authentication API error.
    #[error("Azure DevOps API error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling Azure DevOps.
    #[error("network error talking to Azure DevOps: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
