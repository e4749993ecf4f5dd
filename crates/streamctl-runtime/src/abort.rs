//! Abort registry.

use std::collections::HashSet;
use std::sync::Mutex;

use streamctl_core::ports::AbortGuard;
use streamctl_core::provider::StreamHandle;

/// Tracks which streams have been abandoned by the user.
///
/// The client marks a handle with [`abort`](Self::abort) when the user closes
/// a stream; the resolver consults the guard once, at entry. The read side is
/// side-effect free.
#[derive(Debug, Default)]
pub struct AbortRegistry {
    aborted: Mutex<HashSet<StreamHandle>>,
}

impl AbortRegistry {
    /// Create a registry with no aborted streams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a stream as abandoned.
    pub fn abort(&self, stream: StreamHandle) {
        self.aborted.lock().unwrap().insert(stream);
    }
}

impl AbortGuard for AbortRegistry {
    fn is_aborted(&self, stream: &StreamHandle) -> bool {
        self.aborted.lock().unwrap().contains(stream)
    }
}
