//! Core domain types and port definitions for streamctl.
//!
//! This crate contains the provider resolution engine: the platform-keyed
//! provider registry, the error taxonomy, the port traits that abstract
//! filesystem and lifecycle concerns, and the resolver service that composes
//! them. It has no filesystem or process dependencies of its own; adapters
//! live in `streamctl-runtime`.

#![deny(unsafe_code)]

pub mod error;
pub mod platform;
pub mod ports;
pub mod provider;
pub mod services;

// Re-export commonly used types for convenience
pub use error::ResolveError;
pub use platform::current_platform;
pub use ports::{
    AbortGuard, ExecutableLocator, FileCheck, LocateError, PythonValidator, ResolutionCache,
    ValidateError, ValidatedPython,
};
pub use provider::{ExecObj, ProviderConfig, ProviderOverride, ProviderRegistry, StreamHandle};
pub use services::ProviderResolver;
