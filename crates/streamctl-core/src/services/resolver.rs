//! Provider resolver - decides which executable a provider invocation uses.
//!
//! For a user-selected streaming provider this service determines the exact
//! executable to spawn and, for python-based providers, the interpreter, the
//! script path and any extra environment variables. The decision order is
//! fixed: abort check, cache lookup, registry validation, executable name
//! computation, then filesystem probes. The first failing guard wins and
//! every failure is terminal; nothing is retried or downgraded.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::ResolveError;
use crate::ports::{
    AbortGuard, ExecutableLocator, FileCheck, PythonValidator, ResolutionCache, ValidatedPython,
};
use crate::provider::{ExecObj, ProviderConfig, ProviderOverride, ProviderRegistry, StreamHandle};

/// Resolution orchestrator over injected port implementations.
///
/// The cache and abort guard are scoped to one owning stream by whoever
/// constructs the resolver; resolutions for different providers are
/// independent and may run concurrently on the same instance.
pub struct ProviderResolver {
    registry: Arc<ProviderRegistry>,
    platform: String,
    locator: Arc<dyn ExecutableLocator>,
    validator: Arc<dyn PythonValidator>,
    cache: Arc<dyn ResolutionCache>,
    abort: Arc<dyn AbortGuard>,
}

impl ProviderResolver {
    /// Create a resolver for `platform` over the given collaborators.
    pub fn new(
        registry: Arc<ProviderRegistry>,
        platform: impl Into<String>,
        locator: Arc<dyn ExecutableLocator>,
        validator: Arc<dyn PythonValidator>,
        cache: Arc<dyn ResolutionCache>,
        abort: Arc<dyn AbortGuard>,
    ) -> Self {
        Self {
            registry,
            platform: platform.into(),
            locator,
            validator,
            cache,
            abort,
        }
    }

    /// Resolve the invocation descriptor for `provider_id`.
    ///
    /// Filesystem probes are the only suspension points and are strictly
    /// sequential. A cache hit is returned verbatim with no re-validation
    /// against the filesystem; on a miss the freshly built descriptor is
    /// stored before it is returned.
    pub async fn resolve(
        &self,
        stream: &StreamHandle,
        provider_id: &str,
        overrides: &HashMap<String, ProviderOverride>,
    ) -> Result<ExecObj, ResolveError> {
        if self.abort.is_aborted(stream) {
            debug!(stream = stream.id(), provider = provider_id, "stream already abandoned");
            return Err(ResolveError::Aborted);
        }

        if let Some(cached) = self.cache.get(provider_id).await {
            debug!(provider = provider_id, "using cached provider resolution");
            return Ok(cached);
        }

        let config = self
            .registry
            .get(provider_id)
            .ok_or_else(|| ResolveError::InvalidProvider(provider_id.to_owned()))?;
        let user = overrides.get(provider_id).cloned().unwrap_or_default();

        let exec_name = user
            .exec
            .as_deref()
            .or_else(|| config.exec_for(&self.platform))
            .ok_or(ResolveError::MissingExecutable)?;

        let exec_obj = if config.python {
            self.resolve_python(config, &user, exec_name).await?
        } else {
            self.resolve_executable(config, &user, exec_name).await?
        };

        debug!(
            provider = provider_id,
            exec = %exec_obj.exec.display(),
            "resolved streaming provider"
        );
        self.cache.put(provider_id, exec_obj.clone()).await;
        Ok(exec_obj)
    }

    /// Plain executable provider: one probe, fallback directories only when
    /// the name came from configuration. A user-supplied name is trusted and
    /// searched literally.
    async fn resolve_executable(
        &self,
        config: &ProviderConfig,
        user: &ProviderOverride,
        exec_name: &str,
    ) -> Result<ExecObj, ResolveError> {
        let fallback = if user.exec.is_some() {
            None
        } else {
            config.fallback_for(&self.platform)
        };
        let exec = self
            .locator
            .locate(exec_name, fallback, FileCheck::Executable)
            .await
            .map_err(|err| {
                debug!(%err, "executable probe exhausted");
                ResolveError::ExecutableNotFound
            })?;
        Ok(ExecObj::new(exec))
    }

    /// Python provider: resolve the script, validate its interpreter, then
    /// apply a user exec override on top of the validator's verdict.
    async fn resolve_python(
        &self,
        config: &ProviderConfig,
        user: &ProviderOverride,
        exec_name: &str,
    ) -> Result<ExecObj, ResolveError> {
        let default_script = config
            .pythonscript_for(&self.platform)
            .ok_or(ResolveError::MissingPythonScript)?;
        let script_name = user.pythonscript.as_deref().unwrap_or(default_script);

        let script = self
            .locator
            .locate(
                script_name,
                Some(config.pythonscript_fallback()),
                FileCheck::RegularFile,
            )
            .await
            .map_err(|err| {
                debug!(%err, "python script probe exhausted");
                ResolveError::PythonScriptNotFound
            })?;

        // The validator works from the configured default interpreter name;
        // a user exec override is applied afterwards, on top of its verdict.
        let default_exec = config.exec_for(&self.platform).unwrap_or(exec_name);
        let ValidatedPython {
            exec: validated_exec,
            pythonscript,
            env,
        } = self
            .validator
            .validate(&script, default_exec)
            .await
            .map_err(|err| {
                debug!(%err, "python script validation failed");
                ResolveError::PythonInterpreterNotFound
            })?;

        let exec = if let Some(user_exec) = user.exec.as_deref() {
            self.locator
                .locate(user_exec, None, FileCheck::Executable)
                .await
                .map_err(|err| {
                    debug!(%err, "python executable override probe exhausted");
                    ResolveError::PythonExecutableNotFound
                })?
        } else {
            validated_exec
        };

        let mut exec_obj = ExecObj::new(exec).with_pythonscript(pythonscript.unwrap_or(script));
        if let Some(env) = env {
            exec_obj = exec_obj.with_env(env);
        }
        Ok(exec_obj)
    }
}
