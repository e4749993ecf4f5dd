//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together; handlers
//! delegate to the core resolver.

use clap::Parser;

use streamctl_cli::commands::{ResolveArgs, handle_providers, handle_resolve};
use streamctl_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve {
            provider,
            exec,
            pythonscript,
            config,
            platform,
        } => {
            handle_resolve(ResolveArgs {
                provider,
                exec,
                pythonscript,
                config,
                platform,
            })
            .await
        }
        Commands::Providers { config } => handle_providers(config),
    }
}
