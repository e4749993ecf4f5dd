//! Resolution error taxonomy.
//!
//! The message strings are part of the external contract with the settings
//! UI, which matches on them to decide whether to prompt the user for a
//! manual override. Do not reword them.

use thiserror::Error;

/// Errors produced by provider resolution.
///
/// Every variant is terminal: the resolver never retries and never downgrades
/// a failure, it surfaces the first one unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Unknown provider id.
    #[error("Invalid streaming provider: {0}")]
    InvalidProvider(String),

    /// Neither a default nor an override executable name is available.
    #[error("Missing executable name for streaming provider")]
    MissingExecutable,

    /// Python is required but no script is configured for the platform.
    #[error("Missing python script for streaming provider")]
    MissingPythonScript,

    /// The executable probe exhausted all candidates.
    #[error("Couldn't find executable")]
    ExecutableNotFound,

    /// The python script probe exhausted all candidates.
    #[error("Couldn't find python script")]
    PythonScriptNotFound,

    /// The script could not be classified or its interpreter resolved.
    #[error("Couldn't validate python script")]
    PythonInterpreterNotFound,

    /// The user-supplied python executable override could not be found.
    #[error("Couldn't find python executable")]
    PythonExecutableNotFound,

    /// The owning stream was abandoned before resolution started.
    #[error("Stream resolution was aborted")]
    Aborted,
}
