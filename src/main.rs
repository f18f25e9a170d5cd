//! Autocomment pipeline task entrypoint.

use std::io;
use std::process::ExitCode;

use autocomment::{ProcessEnvironment, TaskConfig, TaskError, TaskResult, execute, report};
use ortho_config::OrthoConfig;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let result = match load_config() {
        Ok(config) => execute(config, &ProcessEnvironment).await,
        Err(config_error) => {
            error!(error = ?config_error, "task failed");
            TaskResult::failure(config_error.to_string())
        }
    };

    match write_result(&result) {
        Ok(()) if result.succeeded => ExitCode::SUCCESS,
        Ok(()) => ExitCode::FAILURE,
        Err(write_error) => {
            error!(error = ?write_error, "could not report the task result");
            ExitCode::FAILURE
        }
    }
}

/// Loads task inputs from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TaskError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TaskConfig, TaskError> {
    TaskConfig::load().map_err(|error| TaskError::Configuration {
        message: error.to_string(),
    })
}

fn write_result(result: &TaskResult) -> Result<(), TaskError> {
    report(result, &mut io::stdout().lock()).map_err(|error| TaskError::Io {
        message: error.to_string(),
    })
}

/// Logs to stderr so stdout carries only pipeline logging commands.
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
