//! Error types.

use thiserror::Error;

/// Result alias for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors returned by synchronization operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Filesystem I/O failed (typically `PermissionDenied` on `/etc/hosts`
    /// or `NotFound` for a missing DHCP hosts file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The target file contains a generated-block header with no footer
    /// after it. Nothing is written until the file is fixed by hand.
    #[error("generated block starting at line {line} has no end marker")]
    MalformedBlock {
        /// 1-based line of the orphaned header marker.
        line: usize,
    },
}

impl SyncError {
    /// Returns `true` if the underlying I/O error is `PermissionDenied`.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}
