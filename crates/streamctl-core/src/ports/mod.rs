//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the resolver expects from infrastructure.
//! They contain no implementation details and use only domain types, so test
//! fakes can be substituted by plain constructor injection.

pub mod abort;
pub mod cache;
pub mod locator;
pub mod validator;

pub use abort::AbortGuard;
pub use cache::ResolutionCache;
pub use locator::{ExecutableLocator, FileCheck, LocateError};
pub use validator::{PythonValidator, ValidateError, ValidatedPython};
