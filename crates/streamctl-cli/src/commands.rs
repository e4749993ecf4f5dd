//! Command handlers.

use std::collections::HashMap;
use std::path::PathBuf;

use streamctl_core::{ProviderOverride, StreamHandle, current_platform};

use crate::bootstrap::{build_resolver, load_registry};

/// `streamctl resolve` arguments, decoupled from the clap surface.
#[derive(Debug)]
pub struct ResolveArgs {
    pub provider: String,
    pub exec: Option<String>,
    pub pythonscript: Option<String>,
    pub config: Option<PathBuf>,
    pub platform: Option<String>,
}

/// Resolve one provider and print the invocation descriptor as JSON.
pub async fn handle_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.config.as_deref())?;
    let platform = args
        .platform
        .unwrap_or_else(|| current_platform().to_owned());
    let resolver = build_resolver(registry, &platform);
    tracing::debug!(provider = %args.provider, %platform, "resolving provider");

    let overrides = HashMap::from([(
        args.provider.clone(),
        ProviderOverride {
            exec: args.exec,
            pythonscript: args.pythonscript,
        },
    )]);

    // The CLI performs one-shot resolutions, so the stream handle is fixed.
    let exec_obj = resolver
        .resolve(&StreamHandle::new(0), &args.provider, &overrides)
        .await?;
    println!("{}", serde_json::to_string_pretty(&exec_obj)?);
    Ok(())
}

/// List the configured providers with their per-platform defaults.
pub fn handle_providers(config: Option<PathBuf>) -> anyhow::Result<()> {
    let registry = load_registry(config.as_deref())?;

    let mut providers: Vec<_> = registry.iter().collect();
    providers.sort_unstable_by_key(|(id, _)| *id);

    for (id, config) in providers {
        let kind = if config.python { "python" } else { "executable" };
        println!("{id} ({kind})");
        for platform in ["linux", "darwin", "win32"] {
            if let Some(exec) = config.exec_for(platform) {
                match config.pythonscript_for(platform) {
                    Some(script) => println!("  {platform}: {exec} {script}"),
                    None => println!("  {platform}: {exec}"),
                }
            }
        }
    }
    Ok(())
}
