//! Python interpreter validator port.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of classifying a resolved python script.
///
/// A genuine python entry point carries only `exec`, the resolved
/// interpreter. A wrapper/bootstrap script may additionally designate a
/// different target script and environment requirements; any subset of the
/// optional fields may be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPython {
    /// Resolved interpreter (or wrapper-designated executable) path.
    pub exec: PathBuf,
    /// Substitute script path designated by a wrapper, if any.
    pub pythonscript: Option<PathBuf>,
    /// Environment variables required by a wrapper, if any.
    pub env: Option<HashMap<String, String>>,
}

impl ValidatedPython {
    /// Result for a genuine python entry point.
    #[must_use]
    pub const fn interpreter(exec: PathBuf) -> Self {
        Self {
            exec,
            pythonscript: None,
            env: None,
        }
    }

    /// Designate a substitute target script.
    #[must_use]
    pub fn with_pythonscript(mut self, pythonscript: PathBuf) -> Self {
        self.pythonscript = Some(pythonscript);
        self
    }

    /// Designate required environment variables.
    #[must_use]
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Classification or interpreter resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The script could not be read.
    #[error("failed to read script {path}: {reason}")]
    Unreadable {
        /// Path of the unreadable script.
        path: PathBuf,
        /// Underlying I/O failure, stringified.
        reason: String,
    },
    /// The script is neither a python entry point nor a known wrapper shape.
    #[error("unrecognized script format: {0}")]
    Unrecognized(PathBuf),
    /// The designated interpreter could not be resolved.
    #[error("interpreter not found: {0}")]
    InterpreterNotFound(String),
}

/// Determines the true interpreter behind a resolved script path.
#[async_trait]
pub trait PythonValidator: Send + Sync {
    /// Classify `script` and resolve its interpreter, starting from the
    /// provider's default interpreter name.
    async fn validate(
        &self,
        script: &Path,
        default_exec: &str,
    ) -> Result<ValidatedPython, ValidateError>;
}
