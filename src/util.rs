//! Internal utilities.

use std::fs::{File, FileTimes, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Modification time as `(seconds, nanoseconds)` since the epoch.
#[must_use]
pub fn mtime(meta: &Metadata) -> (i64, i64) {
    (meta.mtime(), meta.mtime_nsec())
}

/// Sets the access and modification times of `path` to those in `source`,
/// with nanosecond precision. Symlinks are followed.
///
/// # Errors
///
/// Returns an error if `path` cannot be opened, the caller does not own it,
/// or the platform does not report the source's timestamps.
pub fn copy_file_times(source: &Metadata, path: &Path) -> io::Result<()> {
    let times = FileTimes::new()
        .set_accessed(source.accessed()?)
        .set_modified(source.modified()?);
    File::open(path)?.set_times(times)
}
