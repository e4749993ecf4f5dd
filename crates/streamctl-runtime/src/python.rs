//! Shebang-based python script validator.
//!
//! Distro packages ship python providers in two shapes: the entry-point
//! script itself (a python file with a python shebang), or a shell wrapper
//! that re-dispatches to an interpreter and a target script, possibly with
//! environment requirements. This adapter classifies a resolved script by its
//! shebang and, for wrappers, parses the trailing `exec` line.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use streamctl_core::ports::{
    ExecutableLocator, FileCheck, PythonValidator, ValidateError, ValidatedPython,
};

/// Interpreter names accepted as shell wrappers.
const SHELL_INTERPRETERS: &[&str] = &["sh", "bash", "dash", "zsh"];

/// Validator that classifies scripts by shebang.
pub struct ShebangValidator {
    locator: Arc<dyn ExecutableLocator>,
}

impl ShebangValidator {
    /// Create a validator that resolves interpreters through `locator`.
    pub fn new(locator: Arc<dyn ExecutableLocator>) -> Self {
        Self { locator }
    }

    async fn resolve_interpreter(&self, name: &str) -> Result<PathBuf, ValidateError> {
        self.locator
            .locate(name, None, FileCheck::Executable)
            .await
            .map_err(|_| ValidateError::InterpreterNotFound(name.to_owned()))
    }
}

#[async_trait]
impl PythonValidator for ShebangValidator {
    async fn validate(
        &self,
        script: &Path,
        default_exec: &str,
    ) -> Result<ValidatedPython, ValidateError> {
        let bytes = tokio::fs::read(script)
            .await
            .map_err(|err| ValidateError::Unreadable {
                path: script.to_path_buf(),
                reason: err.to_string(),
            })?;
        let body = String::from_utf8_lossy(&bytes);

        match classify(&body, script) {
            Classification::Python => {
                let exec = self.resolve_interpreter(default_exec).await?;
                debug!(script = %script.display(), exec = %exec.display(), "python entry point");
                Ok(ValidatedPython::interpreter(exec))
            }
            Classification::Wrapper => {
                let spec = parse_wrapper(&body)
                    .ok_or_else(|| ValidateError::Unrecognized(script.to_path_buf()))?;
                let exec = self.resolve_interpreter(&spec.exec).await?;
                debug!(
                    script = %script.display(),
                    exec = %exec.display(),
                    "wrapper script re-dispatches"
                );
                let mut validated = ValidatedPython::interpreter(exec);
                if let Some(target) = spec.script {
                    validated = validated.with_pythonscript(target);
                }
                if !spec.env.is_empty() {
                    validated = validated.with_env(spec.env);
                }
                Ok(validated)
            }
            Classification::Unknown => Err(ValidateError::Unrecognized(script.to_path_buf())),
        }
    }
}

enum Classification {
    Python,
    Wrapper,
    Unknown,
}

/// Interpreter named by the shebang line, if any.
fn shebang_interpreter(body: &str) -> Option<String> {
    let line = body.lines().next()?.strip_prefix("#!")?.trim();
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let command = Path::new(first).file_name()?.to_string_lossy().into_owned();
    if command == "env" {
        words.next().map(str::to_owned)
    } else {
        Some(command)
    }
}

fn classify(body: &str, script: &Path) -> Classification {
    if let Some(interpreter) = shebang_interpreter(body) {
        if interpreter.contains("python") {
            return Classification::Python;
        }
        if SHELL_INTERPRETERS.contains(&interpreter.as_str()) {
            return Classification::Wrapper;
        }
        return Classification::Unknown;
    }
    // No shebang: accept a plain .py payload as a python entry point.
    if script.extension().is_some_and(|ext| ext == "py") {
        return Classification::Python;
    }
    Classification::Unknown
}

struct WrapperSpec {
    exec: String,
    script: Option<PathBuf>,
    env: HashMap<String, String>,
}

/// Parse a shell wrapper body: leading `VAR=value` / `export VAR=value`
/// assignments, then an `exec <interpreter> [<script>]` dispatch line.
fn parse_wrapper(body: &str) -> Option<WrapperSpec> {
    let mut env = HashMap::new();

    for raw in body.lines().skip(1) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let assignment = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = parse_assignment(assignment) {
            env.insert(key, value);
            continue;
        }
        if let Some(rest) = line.strip_prefix("exec ") {
            let mut words = rest
                .split_whitespace()
                .map(unquote)
                .filter(|word| !word.starts_with('-') && !word.starts_with('$'));
            let exec = words.next()?.to_owned();
            let script = words.next().map(PathBuf::from);
            return Some(WrapperSpec { exec, script, env });
        }
    }
    None
}

fn parse_assignment(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !key.starts_with(|c: char| c.is_ascii_digit());
    if !valid {
        return None;
    }
    Some((key.to_owned(), unquote(value.trim()).to_owned()))
}

fn unquote(word: &str) -> &str {
    word.trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use streamctl_core::ports::LocateError;
    use tempfile::TempDir;

    /// Locator fake resolving a fixed set of names.
    #[derive(Default)]
    struct MockLocator {
        known: HashMap<String, PathBuf>,
        calls: Mutex<Vec<String>>,
    }

    impl MockLocator {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(name, path)| ((*name).to_owned(), PathBuf::from(path)))
                    .collect(),
                calls: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl ExecutableLocator for MockLocator {
        async fn locate(
            &self,
            name: &str,
            _fallback_dirs: Option<&[PathBuf]>,
            _check: FileCheck,
        ) -> Result<PathBuf, LocateError> {
            self.calls.lock().unwrap().push(name.to_owned());
            self.known
                .get(name)
                .cloned()
                .ok_or_else(|| LocateError::exhausted(name))
        }
    }

    fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn python_shebang_resolves_the_default_interpreter() {
        let dir = TempDir::new().unwrap();
        let script = write_script(
            &dir,
            "streamlink",
            "#!/usr/bin/env python3\nimport streamlink_cli.main\n",
        );
        let locator = Arc::new(MockLocator::with(&[("python3", "/usr/bin/python3")]));
        let validator = ShebangValidator::new(locator.clone());

        let result = validator.validate(&script, "python3").await.unwrap();

        assert_eq!(
            result,
            ValidatedPython::interpreter(PathBuf::from("/usr/bin/python3"))
        );
        assert_eq!(*locator.calls.lock().unwrap(), vec!["python3".to_owned()]);
    }

    #[tokio::test]
    async fn direct_python_shebang_is_an_entry_point() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "streamlink", "#!/usr/bin/python3.12\nmain()\n");
        let validator = ShebangValidator::new(Arc::new(MockLocator::with(&[(
            "python3",
            "/usr/bin/python3",
        )])));

        let result = validator.validate(&script, "python3").await.unwrap();
        assert!(result.pythonscript.is_none());
        assert!(result.env.is_none());
    }

    #[tokio::test]
    async fn py_extension_without_shebang_is_an_entry_point() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "streamlink-script.py", "import streamlink_cli\n");
        let validator = ShebangValidator::new(Arc::new(MockLocator::with(&[(
            "python.exe",
            "C:\\Python313\\python.exe",
        )])));

        let result = validator.validate(&script, "python.exe").await.unwrap();
        assert_eq!(result.exec, PathBuf::from("C:\\Python313\\python.exe"));
    }

    #[tokio::test]
    async fn wrapper_exec_line_designates_interpreter_script_and_env() {
        let dir = TempDir::new().unwrap();
        let script = write_script(
            &dir,
            "streamlink",
            "#!/bin/sh\n\
             export PYTHONPATH=/opt/streamlink/lib\n\
             LC_ALL=\"C.UTF-8\"\n\
             exec /opt/streamlink/python3 \"/opt/streamlink/run.py\" \"$@\"\n",
        );
        let locator = Arc::new(MockLocator::with(&[(
            "/opt/streamlink/python3",
            "/opt/streamlink/python3",
        )]));
        let validator = ShebangValidator::new(locator);

        let result = validator.validate(&script, "python3").await.unwrap();

        assert_eq!(result.exec, PathBuf::from("/opt/streamlink/python3"));
        assert_eq!(
            result.pythonscript,
            Some(PathBuf::from("/opt/streamlink/run.py"))
        );
        assert_eq!(
            result.env,
            Some(HashMap::from([
                ("PYTHONPATH".to_owned(), "/opt/streamlink/lib".to_owned()),
                ("LC_ALL".to_owned(), "C.UTF-8".to_owned()),
            ]))
        );
    }

    #[tokio::test]
    async fn wrapper_without_exec_line_is_unrecognized() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "streamlink", "#!/bin/bash\necho no dispatch here\n");
        let validator = ShebangValidator::new(Arc::new(MockLocator::default()));

        let err = validator.validate(&script, "python3").await.unwrap_err();
        assert!(matches!(err, ValidateError::Unrecognized(_)));
    }

    #[tokio::test]
    async fn foreign_shebang_is_unrecognized() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "streamlink", "#!/usr/bin/perl\nprint\n");
        let validator = ShebangValidator::new(Arc::new(MockLocator::default()));

        let err = validator.validate(&script, "python3").await.unwrap_err();
        assert!(matches!(err, ValidateError::Unrecognized(_)));
    }

    #[tokio::test]
    async fn unresolvable_interpreter_fails_validation() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "streamlink", "#!/usr/bin/env python3\n");
        let validator = ShebangValidator::new(Arc::new(MockLocator::default()));

        let err = validator.validate(&script, "python3").await.unwrap_err();
        assert_eq!(err, ValidateError::InterpreterNotFound("python3".into()));
    }

    #[tokio::test]
    async fn missing_script_is_unreadable() {
        let validator = ShebangValidator::new(Arc::new(MockLocator::default()));

        let err = validator
            .validate(Path::new("/no/such/script"), "python3")
            .await
            .unwrap_err();
        assert!(matches!(err, ValidateError::Unreadable { .. }));
    }
}
