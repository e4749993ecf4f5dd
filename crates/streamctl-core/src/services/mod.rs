//! Services that compose ports into resolution workflows.

pub mod resolver;

pub use resolver::ProviderResolver;
