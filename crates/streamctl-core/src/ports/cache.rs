//! Resolution cache port.

use async_trait::async_trait;

use crate::provider::ExecObj;

/// Key-value store of previously computed resolutions, keyed by provider id.
///
/// Pure key-value semantics: no eviction at this layer. Implementations must
/// support concurrent reads and serialize writes per key. A cache instance is
/// scoped to one owning stream; staleness management belongs to whoever owns
/// the instance.
#[async_trait]
pub trait ResolutionCache: Send + Sync {
    /// Previously stored resolution for `provider_id`, if any.
    async fn get(&self, provider_id: &str) -> Option<ExecObj>;

    /// Store a freshly computed resolution.
    async fn put(&self, provider_id: &str, exec_obj: ExecObj);
}
