//! Filesystem-backed executable locator.
//!
//! Resolution order matches the contract of the locator port: the OS search
//! path is consulted first, honoring the requested check; only when that
//! fails are the caller-supplied fallback directories probed, in order.
//! Probing is strictly sequential and the first match wins, so identical
//! inputs always produce the same probe sequence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, trace};

use streamctl_core::ports::{ExecutableLocator, FileCheck, LocateError};

/// Locator over the real filesystem and `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsExecutableLocator;

impl FsExecutableLocator {
    /// Create a locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Search-path lookup (or direct probe, for names that are paths).
    async fn search_path(name: &str, check: FileCheck) -> Option<PathBuf> {
        match check {
            FileCheck::Executable => {
                // `which` performs the platform-correct executability test
                // and also accepts explicit relative/absolute paths.
                let name = name.to_owned();
                tokio::task::spawn_blocking(move || which::which(name).ok())
                    .await
                    .ok()
                    .flatten()
            }
            FileCheck::RegularFile => {
                if is_explicit_path(name) {
                    return absolute_match(Path::new(name).to_path_buf(), check).await;
                }
                let dirs: Vec<PathBuf> = std::env::var_os("PATH")
                    .map(|path| std::env::split_paths(&path).collect())
                    .unwrap_or_default();
                for dir in dirs {
                    if let Some(found) = absolute_match(dir.join(name), check).await {
                        return Some(found);
                    }
                }
                None
            }
        }
    }
}

#[async_trait]
impl ExecutableLocator for FsExecutableLocator {
    async fn locate(
        &self,
        name: &str,
        fallback_dirs: Option<&[PathBuf]>,
        check: FileCheck,
    ) -> Result<PathBuf, LocateError> {
        if let Some(found) = Self::search_path(name, check).await {
            trace!(name, path = %found.display(), "resolved via search path");
            return Ok(found);
        }

        if let Some(dirs) = fallback_dirs {
            for dir in dirs {
                if let Some(found) = absolute_match(dir.join(name), check).await {
                    debug!(name, path = %found.display(), "resolved via fallback directory");
                    return Ok(found);
                }
            }
        }

        debug!(name, "no candidate satisfied the check");
        Err(LocateError::exhausted(name))
    }
}

/// Whether `name` carries directory components and should be probed directly
/// instead of searched for.
fn is_explicit_path(name: &str) -> bool {
    Path::new(name).is_absolute() || Path::new(name).components().count() > 1
}

/// Probe one candidate; a match is returned as an absolute path.
async fn absolute_match(candidate: PathBuf, check: FileCheck) -> Option<PathBuf> {
    if !satisfies(&candidate, check).await {
        return None;
    }
    if candidate.is_absolute() {
        Some(candidate)
    } else {
        std::path::absolute(&candidate).ok()
    }
}

async fn satisfies(path: &Path, check: FileCheck) -> bool {
    let Ok(metadata) = fs::metadata(path).await else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    match check {
        FileCheck::RegularFile => true,
        FileCheck::Executable => is_executable(&metadata),
    }
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

// Windows executability is encoded in the extension; the search-path branch
// defers to `which` for that, and fallback probes accept any regular file.
#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, executable: bool) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        writeln!(file, "content").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        }
        let _ = executable;
        path
    }

    #[tokio::test]
    async fn fallback_directories_are_probed_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_file(&second, "prov", true);
        let expected = write_file(&first, "prov", true);

        let locator = FsExecutableLocator::new();
        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = locator
            .locate("prov", Some(&dirs), FileCheck::Executable)
            .await
            .unwrap();

        // First match wins even though both directories hold a candidate.
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn missing_name_exhausts_all_candidates() {
        let dir = TempDir::new().unwrap();
        let locator = FsExecutableLocator::new();
        let dirs = vec![dir.path().to_path_buf()];

        let err = locator
            .locate("definitely-not-here", Some(&dirs), FileCheck::Executable)
            .await
            .unwrap_err();

        assert_eq!(err, LocateError::exhausted("definitely-not-here"));
    }

    #[tokio::test]
    async fn no_fallback_dirs_means_search_path_only() {
        let locator = FsExecutableLocator::new();

        let err = locator
            .locate("definitely-not-here", None, FileCheck::Executable)
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::Exhausted { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn executable_check_skips_plain_files() {
        let dir = TempDir::new().unwrap();
        // Named to avoid colliding with real binaries on the OS search path
        // (e.g. util-linux ships a `script` executable).
        write_file(&dir, "plain-script-fixture", false);

        let locator = FsExecutableLocator::new();
        let dirs = vec![dir.path().to_path_buf()];

        let err = locator
            .locate("plain-script-fixture", Some(&dirs), FileCheck::Executable)
            .await
            .unwrap_err();
        assert!(matches!(err, LocateError::Exhausted { .. }));

        // The same candidate satisfies the regular-file check.
        let found = locator
            .locate("plain-script-fixture", Some(&dirs), FileCheck::RegularFile)
            .await
            .unwrap();
        assert_eq!(found, dir.path().join("plain-script-fixture"));
    }

    #[tokio::test]
    async fn explicit_absolute_path_is_probed_directly() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "wrapper", false);

        let locator = FsExecutableLocator::new();
        let found = locator
            .locate(path.to_str().unwrap(), None, FileCheck::RegularFile)
            .await
            .unwrap();

        assert_eq!(found, path);
    }

    #[tokio::test]
    async fn directories_never_match() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("prov")).unwrap();

        let locator = FsExecutableLocator::new();
        let dirs = vec![dir.path().to_path_buf()];
        let err = locator
            .locate("prov", Some(&dirs), FileCheck::RegularFile)
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::Exhausted { .. }));
    }
}
