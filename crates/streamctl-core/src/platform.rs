//! Platform identifier used to key provider configuration.
//!
//! Provider tables are keyed by the same identifiers the upstream streaming
//! clients use: `"linux"`, `"darwin"` and `"win32"`. The resolver itself is
//! platform-agnostic and takes the identifier as a plain string, so tests can
//! resolve for any platform regardless of the host.

/// Identifier for Linux hosts.
pub const LINUX: &str = "linux";
/// Identifier for macOS hosts.
pub const DARWIN: &str = "darwin";
/// Identifier for Windows hosts.
pub const WIN32: &str = "win32";

/// Detect the platform identifier of the running host.
#[must_use]
pub const fn current_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        WIN32
    } else if cfg!(target_os = "macos") {
        DARWIN
    } else {
        LINUX
    }
}
