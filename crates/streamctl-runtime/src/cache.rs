//! In-memory resolution cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use streamctl_core::ports::ResolutionCache;
use streamctl_core::provider::ExecObj;

/// Cache of resolved invocations for one owning stream.
///
/// Reads take a shared lock so concurrent resolutions of different providers
/// never block each other; writes are serialized by the exclusive lock. The
/// stored value is returned verbatim on a hit, with no re-validation against
/// the filesystem: staleness is managed by the owning client through
/// [`remove`](Self::remove) and [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct InMemoryResolutionCache {
    entries: RwLock<HashMap<String, ExecObj>>,
}

impl InMemoryResolutionCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate one provider's entry (e.g. after a spawn failure).
    pub async fn remove(&self, provider_id: &str) {
        self.entries.write().await.remove(provider_id);
    }

    /// Invalidate everything.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl ResolutionCache for InMemoryResolutionCache {
    async fn get(&self, provider_id: &str) -> Option<ExecObj> {
        self.entries.read().await.get(provider_id).cloned()
    }

    async fn put(&self, provider_id: &str, exec_obj: ExecObj) {
        self.entries
            .write()
            .await
            .insert(provider_id.to_owned(), exec_obj);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn stored_values_are_returned_verbatim() {
        let cache = InMemoryResolutionCache::new();
        let exec_obj = ExecObj::new(PathBuf::from("/usr/bin/streamlink"))
            .with_pythonscript(PathBuf::from("/usr/bin/streamlink-script"));

        assert_eq!(cache.get("streamlink").await, None);
        cache.put("streamlink", exec_obj.clone()).await;
        assert_eq!(cache.get("streamlink").await, Some(exec_obj));
    }

    #[tokio::test]
    async fn entries_are_scoped_per_provider() {
        let cache = InMemoryResolutionCache::new();
        cache
            .put("streamlink", ExecObj::new(PathBuf::from("/a")))
            .await;
        cache
            .put("streamlink-standalone", ExecObj::new(PathBuf::from("/b")))
            .await;

        cache.remove("streamlink").await;

        assert_eq!(cache.get("streamlink").await, None);
        assert!(cache.get("streamlink-standalone").await.is_some());

        cache.clear().await;
        assert_eq!(cache.get("streamlink-standalone").await, None);
    }
}
