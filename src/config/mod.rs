//! Task inputs loaded from CLI, environment, and files.
//!
//! [`TaskConfig`] merges the raw inputs using ortho-config's layered
//! approach; [`Inputs`] is the validated, immutable view the rest of the
//! task works with.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – every input unset
//! 2. **Configuration file** – `.autocomment.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** – `AUTOCOMMENT_COMMENT`,
//!    `AUTOCOMMENT_FILE_GLOB`, `AUTOCOMMENT_COMMIT_EXPR`, ...
//! 4. **Command-line arguments** – `--comment`, `--file-glob`, ...
//!
//! # Configuration File
//!
//! ```toml
//! comment = "Please update the changelog."
//! file_glob = "/src/**/*.rs"
//! commit_expr = "^(feat|fix|chore): "
//! ```

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::devops::error::TaskError;

/// Raw task inputs supporting CLI, environment, and file sources.
///
/// Conditional inputs (`file_glob`, `commit_expr`, `target_branch`,
/// `source_branch`) gate the validators and feed the thread hash. An empty
/// string is a configured value, distinct from an unset input.
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "AUTOCOMMENT",
    discovery(
        dotfile_name = ".autocomment.toml",
        config_file_name = "autocomment.toml",
        app_name = "autocomment"
    )
)]
pub struct TaskConfig {
    /// Markdown text of the comment to post.
    ///
    /// Can be provided via:
    /// - CLI: `--comment <TEXT>` or `-c <TEXT>`
    /// - Environment: `AUTOCOMMENT_COMMENT`
    /// - Config file: `comment = "..."`
    #[ortho_config(cli_short = 'c')]
    pub comment: Option<String>,

    /// Glob matched against the paths changed in the latest iteration.
    ///
    /// Can be provided via:
    /// - CLI: `--file-glob <GLOB>` or `-g <GLOB>`
    /// - Environment: `AUTOCOMMENT_FILE_GLOB`
    /// - Config file: `file_glob = "..."`
    #[ortho_config(cli_short = 'g')]
    pub file_glob: Option<String>,

    /// Regular expression every commit message is expected to match.
    ///
    /// Can be provided via:
    /// - CLI: `--commit-expr <REGEX>` or `-e <REGEX>`
    /// - Environment: `AUTOCOMMENT_COMMIT_EXPR`
    /// - Config file: `commit_expr = "..."`
    #[ortho_config(cli_short = 'e')]
    pub commit_expr: Option<String>,

    /// Target branch condition.
    #[ortho_config()]
    pub target_branch: Option<String>,

    /// Source branch condition.
    #[ortho_config()]
    pub source_branch: Option<String>,

    /// Personal access token used instead of the pipeline's system token.
    ///
    /// Can be provided via:
    /// - CLI: `--pat <TOKEN>`
    /// - Environment: `AUTOCOMMENT_PAT`
    /// - Config file: `pat = "..."`
    #[ortho_config()]
    pub pat: Option<String>,

    /// Resolve the thread automatically once the conditions stop matching.
    ///
    /// Can be provided via:
    /// - CLI: `--auto-resolve`
    /// - Config file: `auto_resolve = true`
    #[ortho_config()]
    pub auto_resolve: bool,
}

/// Validated task inputs, read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Comment text posted when all conditions are met.
    pub comment: String,
    /// Changed-file glob condition.
    pub file_glob: Option<String>,
    /// Commit message expression condition.
    pub commit_expr: Option<String>,
    /// Target branch condition.
    pub target_branch: Option<String>,
    /// Source branch condition.
    pub source_branch: Option<String>,
    /// Personal access token override.
    pub pat: Option<String>,
    /// Auto-resolve preference.
    pub auto_resolve: bool,
}

impl Inputs {
    /// Creates inputs with the given comment and no conditions.
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            file_glob: None,
            commit_expr: None,
            target_branch: None,
            source_branch: None,
            pat: None,
            auto_resolve: false,
        }
    }

    /// Validates raw configuration into inputs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MissingInput`] when `comment` is unset or blank.
    pub fn from_config(config: TaskConfig) -> Result<Self, TaskError> {
        let comment = config
            .comment
            .filter(|comment| !comment.trim().is_empty())
            .ok_or_else(|| TaskError::MissingInput {
                name: "comment".to_owned(),
            })?;

        Ok(Self {
            comment,
            file_glob: config.file_glob,
            commit_expr: config.commit_expr,
            target_branch: config.target_branch,
            source_branch: config.source_branch,
            pat: config.pat,
            auto_resolve: config.auto_resolve,
        })
    }

    /// Sets the file glob condition.
    #[must_use]
    pub fn with_file_glob(mut self, file_glob: impl Into<String>) -> Self {
        self.file_glob = Some(file_glob.into());
        self
    }

    /// Sets the commit expression condition.
    #[must_use]
    pub fn with_commit_expr(mut self, commit_expr: impl Into<String>) -> Self {
        self.commit_expr = Some(commit_expr.into());
        self
    }

    /// Deterministic digest of the conditional inputs.
    ///
    /// Only `file_glob`, `commit_expr`, `target_branch` and `source_branch`
    /// contribute, so editing the comment text or credentials keeps
    /// previously posted threads recognisable. The inputs are encoded as a
    /// JSON array with `null` for unset values before hashing, which keeps
    /// unset and empty apart.
    #[must_use]
    pub fn hashed_conditions(&self) -> String {
        let conditions = vec![
            self.file_glob.as_deref(),
            self.commit_expr.as_deref(),
            self.target_branch.as_deref(),
            self.source_branch.as_deref(),
        ];
        let encoded = serde_json::Value::from(conditions).to_string();
        hex::encode(Sha256::digest(encoded.as_bytes()))
    }
}
