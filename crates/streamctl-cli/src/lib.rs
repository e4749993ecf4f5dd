//! CLI plumbing for the `streamctl` binary.
//!
//! The binary is the composition root: it is the only place where runtime
//! adapters are wired into the core resolver. Command handlers stay thin and
//! delegate to `ProviderResolver`.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod parser;

pub use bootstrap::{build_resolver, load_registry};
pub use parser::{Cli, Commands};
