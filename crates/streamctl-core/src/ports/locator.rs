//! Executable locator port.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Predicate a candidate file must satisfy to count as a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileCheck {
    /// The candidate exists and is executable.
    #[default]
    Executable,
    /// The candidate exists and is a regular file.
    RegularFile,
}

/// The locator exhausted every candidate without a match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// No search-path or fallback candidate satisfied the check.
    #[error("no candidate found for {name}")]
    Exhausted {
        /// The name or path that was searched for.
        name: String,
    },
}

impl LocateError {
    /// Convenience constructor for the exhausted case.
    #[must_use]
    pub fn exhausted(name: impl Into<String>) -> Self {
        Self::Exhausted { name: name.into() }
    }
}

/// Searches for a named file on the OS search path and in an ordered list of
/// fallback directories.
///
/// The search-path lookup is attempted first, honoring `check`; only when it
/// fails are the fallback directories probed, in exactly the caller-supplied
/// order. The first match wins and probing is strictly sequential, which
/// keeps the probe sequence deterministic for identical inputs.
#[async_trait]
pub trait ExecutableLocator: Send + Sync {
    /// Resolve `name` to an absolute path.
    async fn locate(
        &self,
        name: &str,
        fallback_dirs: Option<&[PathBuf]>,
        check: FileCheck,
    ) -> Result<PathBuf, LocateError>;
}
