//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Resolve streaming provider executables.
#[derive(Debug, Parser)]
#[command(name = "streamctl", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the invocation for a provider and print it as JSON.
    Resolve {
        /// Provider id (e.g. "streamlink").
        provider: String,

        /// Override the executable name or path (searched literally).
        #[arg(long)]
        exec: Option<String>,

        /// Override the python script name or path.
        #[arg(long)]
        pythonscript: Option<String>,

        /// Load the provider registry from a JSON file instead of the
        /// compiled-in table.
        #[arg(long, value_name = "FILE", env = "STREAMCTL_CONFIG")]
        config: Option<PathBuf>,

        /// Resolve for a specific platform id instead of the host's.
        #[arg(long, value_name = "PLATFORM")]
        platform: Option<String>,
    },

    /// List the configured providers.
    Providers {
        /// Load the provider registry from a JSON file instead of the
        /// compiled-in table.
        #[arg(long, value_name = "FILE", env = "STREAMCTL_CONFIG")]
        config: Option<PathBuf>,
    },
}
