//! Cancellation guard port.

use crate::provider::StreamHandle;

/// Reports whether the owning request has already been abandoned.
///
/// Checked exactly once, at resolution entry. There is no mid-flight
/// cancellation: once probing has begun a caller that no longer needs the
/// result simply discards it.
pub trait AbortGuard: Send + Sync {
    /// Whether `stream` has been abandoned. Side-effect free.
    fn is_aborted(&self, stream: &StreamHandle) -> bool;
}
