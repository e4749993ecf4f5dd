//! Wiring of runtime adapters into the core resolver.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use streamctl_core::{ProviderRegistry, ProviderResolver};
use streamctl_runtime::{
    AbortRegistry, FsExecutableLocator, InMemoryResolutionCache, ShebangValidator,
};

/// Load the provider registry, either from a JSON file or the compiled-in
/// table.
pub fn load_registry(config: Option<&Path>) -> anyhow::Result<ProviderRegistry> {
    match config {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read registry file {}", path.display()))?;
            serde_json::from_str(&body)
                .with_context(|| format!("invalid registry file {}", path.display()))
        }
        None => Ok(ProviderRegistry::builtin()),
    }
}

/// Build a resolver over the real filesystem adapters.
#[must_use]
pub fn build_resolver(registry: ProviderRegistry, platform: &str) -> ProviderResolver {
    let locator = Arc::new(FsExecutableLocator::new());
    ProviderResolver::new(
        Arc::new(registry),
        platform,
        locator.clone(),
        Arc::new(ShebangValidator::new(locator)),
        Arc::new(InMemoryResolutionCache::new()),
        Arc::new(AbortRegistry::new()),
    )
}
