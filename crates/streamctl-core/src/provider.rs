//! Provider registry and resolution domain types.
//!
//! A provider is a named streaming backend the user can select. Its
//! configuration describes, per platform, the default executable to invoke
//! and the extra directories to probe when a plain search-path lookup fails.
//! Python-based providers additionally name the script the interpreter runs
//! and the directories that script is commonly installed to.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque identity of an in-flight stream.
///
/// Used only for cancellation checks and cache scoping; the resolver never
/// looks inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamHandle(u64);

impl StreamHandle {
    /// Create a handle from the owning stream's id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The owning stream's id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Per-provider user overrides entered in the settings UI.
///
/// At most one override record exists per provider id. An empty record means
/// the user kept the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderOverride {
    /// Replacement executable name or path. Searched literally, without the
    /// provider's fallback directories.
    pub exec: Option<String>,
    /// Replacement python script name or path.
    pub pythonscript: Option<String>,
}

impl ProviderOverride {
    /// Override only the executable.
    #[must_use]
    pub fn exec(name: impl Into<String>) -> Self {
        Self {
            exec: Some(name.into()),
            pythonscript: None,
        }
    }

    /// Override only the python script.
    #[must_use]
    pub fn pythonscript(name: impl Into<String>) -> Self {
        Self {
            exec: None,
            pythonscript: Some(name.into()),
        }
    }
}

/// The resolved invocation descriptor handed to the process spawner.
///
/// Immutable once created: the resolver builds it, stores it in the cache and
/// returns it; nothing mutates it afterwards. `exec` is an absolute path that
/// existed at resolution time, and `pythonscript` is present exactly when the
/// provider requires python.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecObj {
    /// Absolute path of the executable to spawn.
    pub exec: PathBuf,
    /// Absolute path of the python script, for python-based providers.
    pub pythonscript: Option<PathBuf>,
    /// Extra environment variables required by the invocation.
    pub env: Option<HashMap<String, String>>,
}

impl ExecObj {
    /// Descriptor for a plain (non-python) executable.
    #[must_use]
    pub const fn new(exec: PathBuf) -> Self {
        Self {
            exec,
            pythonscript: None,
            env: None,
        }
    }

    /// Set the python script path.
    #[must_use]
    pub fn with_pythonscript(mut self, pythonscript: PathBuf) -> Self {
        self.pythonscript = Some(pythonscript);
        self
    }

    /// Set extra environment variables.
    #[must_use]
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Static, platform-keyed description of one provider.
///
/// The per-platform maps use `Option<String>` values so a registry document
/// can explicitly null out an entry for a platform without removing the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Whether this provider is a python script run through an interpreter.
    pub python: bool,
    /// Default executable name or path, per platform.
    pub exec: HashMap<String, Option<String>>,
    /// Ordered extra directories to probe for the executable, per platform.
    pub fallback: HashMap<String, Vec<PathBuf>>,
    /// Default python script name or path, per platform. Present iff `python`.
    pub pythonscript: HashMap<String, Option<String>>,
    /// Ordered extra directories to probe for the python script.
    pub pythonscriptfallback: Vec<PathBuf>,
}

impl ProviderConfig {
    /// Start a config for a plain executable provider.
    #[must_use]
    pub fn executable() -> Self {
        Self::default()
    }

    /// Start a config for a python-based provider.
    #[must_use]
    pub fn python() -> Self {
        Self {
            python: true,
            ..Self::default()
        }
    }

    /// Set the default executable name for a platform.
    #[must_use]
    pub fn with_exec(mut self, platform: impl Into<String>, name: impl Into<String>) -> Self {
        self.exec.insert(platform.into(), Some(name.into()));
        self
    }

    /// Set the executable fallback directories for a platform.
    #[must_use]
    pub fn with_fallback(mut self, platform: impl Into<String>, dirs: Vec<PathBuf>) -> Self {
        self.fallback.insert(platform.into(), dirs);
        self
    }

    /// Set the default python script name for a platform.
    #[must_use]
    pub fn with_pythonscript(
        mut self,
        platform: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.pythonscript.insert(platform.into(), Some(name.into()));
        self
    }

    /// Set the python script fallback directories.
    #[must_use]
    pub fn with_pythonscript_fallback(mut self, dirs: Vec<PathBuf>) -> Self {
        self.pythonscriptfallback = dirs;
        self
    }

    /// Default executable name for `platform`, if configured and non-null.
    #[must_use]
    pub fn exec_for(&self, platform: &str) -> Option<&str> {
        self.exec.get(platform).and_then(|name| name.as_deref())
    }

    /// Executable fallback directories for `platform`, if any are configured.
    #[must_use]
    pub fn fallback_for(&self, platform: &str) -> Option<&[PathBuf]> {
        self.fallback.get(platform).map(Vec::as_slice)
    }

    /// Default python script name for `platform`, if configured and non-null.
    #[must_use]
    pub fn pythonscript_for(&self, platform: &str) -> Option<&str> {
        self.pythonscript
            .get(platform)
            .and_then(|name| name.as_deref())
    }

    /// Python script fallback directories.
    #[must_use]
    pub fn pythonscript_fallback(&self) -> &[PathBuf] {
        &self.pythonscriptfallback
    }
}

/// Read-only table of all known providers, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    /// Build a registry from an explicit provider table.
    #[must_use]
    pub fn new(providers: HashMap<String, ProviderConfig>) -> Self {
        Self { providers }
    }

    /// The provider table shipped with the client.
    #[must_use]
    pub fn builtin() -> Self {
        let mut providers = HashMap::new();
        providers.insert(
            "streamlink".to_owned(),
            ProviderConfig::python()
                .with_exec("linux", "python3")
                .with_exec("darwin", "python3")
                .with_exec("win32", "python.exe")
                .with_fallback(
                    "win32",
                    vec![
                        PathBuf::from("C:\\Python313"),
                        PathBuf::from("C:\\Python312"),
                        PathBuf::from("C:\\Python311"),
                    ],
                )
                .with_pythonscript("linux", "streamlink")
                .with_pythonscript("darwin", "streamlink")
                .with_pythonscript("win32", "streamlink-script.py")
                .with_pythonscript_fallback(vec![
                    PathBuf::from("/usr/bin"),
                    PathBuf::from("/usr/local/bin"),
                    PathBuf::from("/opt/homebrew/bin"),
                ]),
        );
        providers.insert(
            "streamlink-standalone".to_owned(),
            ProviderConfig::executable()
                .with_exec("linux", "streamlink")
                .with_exec("darwin", "streamlink")
                .with_exec("win32", "streamlink.exe")
                .with_fallback(
                    "linux",
                    vec![PathBuf::from("/usr/bin"), PathBuf::from("/usr/local/bin")],
                )
                .with_fallback(
                    "darwin",
                    vec![PathBuf::from(
                        "/Applications/Streamlink.app/Contents/MacOS",
                    )],
                )
                .with_fallback(
                    "win32",
                    vec![PathBuf::from("C:\\Program Files\\Streamlink\\bin")],
                ),
        );
        Self { providers }
    }

    /// Look up a provider's configuration.
    #[must_use]
    pub fn get(&self, provider_id: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_id)
    }

    /// Iterate over all configured providers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProviderConfig)> {
        self.providers
            .iter()
            .map(|(id, config)| (id.as_str(), config))
    }

    /// Number of configured providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry has no providers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
