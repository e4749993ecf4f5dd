//! Filesystem and OS adapters for the streamctl provider resolver.
//!
//! Concrete implementations of the ports defined in `streamctl-core`: a
//! filesystem-backed executable locator, a shebang-based python script
//! validator, an in-memory resolution cache and an abort registry. Adapters
//! are wired into `ProviderResolver` by the composition root (the CLI or an
//! embedding client).

#![deny(unsafe_code)]

pub mod abort;
pub mod cache;
pub mod locate;
pub mod python;

pub use abort::AbortRegistry;
pub use cache::InMemoryResolutionCache;
pub use locate::FsExecutableLocator;
pub use python::ShebangValidator;
