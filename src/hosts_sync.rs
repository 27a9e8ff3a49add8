//! Hosts file synchronization.
//!
//! Reads the dnsmasq reservations file, merges its records into the hosts
//! file and stamps the hosts file with the source's access/modification
//! times. Matching modification times mean the hosts file is current.

use crate::block::merge;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::record::extract_records;
use crate::util::{copy_file_times, mtime};
use std::path::Path;

/// Result of a [`HostsSync::sync`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The hosts file was rewritten with this many records.
    Updated {
        /// Number of reservations in the new block.
        records: usize,
    },
    /// Timestamps already matched; nothing was read or written.
    UpToDate,
}

/// Keeps a hosts file in step with a dnsmasq DHCP hosts file.
///
/// # Lifecycle
///
/// 1. [`needs_update`](Self::needs_update) compares modification times.
/// 2. [`update`](Self::update) rewrites the generated block and copies the
///    source's timestamps onto the hosts file.
/// 3. The next [`needs_update`](Self::needs_update) returns `false` until
///    the source changes again.
///
/// # Permissions
///
/// `/etc/hosts` requires root. The caller must handle elevation.
///
/// # Example
///
/// ```rust,ignore
/// use dhcp2hosts::{HostsSync, SyncConfig};
///
/// let sync = HostsSync::new(SyncConfig::new("/etc/dnsmasq.d/hosts.conf"));
/// sync.sync(false)?;
/// ```
pub struct HostsSync {
    config: SyncConfig,
}

impl HostsSync {
    /// Creates a synchronizer for the given paths.
    #[must_use]
    pub const fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Returns the configured paths.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns `true` if the DHCP hosts file and the hosts file have
    /// different modification times.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`](crate::SyncError::Io) if either file cannot
    /// be stat'ed.
    pub fn needs_update(&self) -> Result<bool> {
        let source = std::fs::metadata(&self.config.dhcp_hostsfile)?;
        let target = std::fs::metadata(&self.config.hosts_file)?;
        Ok(mtime(&source) != mtime(&target))
    }

    /// Rewrites the generated block in the hosts file and returns the number
    /// of records written.
    ///
    /// The source's timestamps are captured before it is read, so an edit
    /// landing mid-update leaves the two files out of step and triggers
    /// another update on the next run.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`](crate::SyncError::Io) if a file cannot be
    /// read or written, or
    /// [`SyncError::MalformedBlock`](crate::SyncError::MalformedBlock) if the
    /// hosts file holds an unterminated block. The hosts file is untouched
    /// on error, except for a failure setting its timestamps after the write.
    pub fn update(&self) -> Result<usize> {
        let source_path = &self.config.dhcp_hostsfile;
        let hosts_path = &self.config.hosts_file;
        tracing::debug!(
            hosts = %hosts_path.display(),
            source = %source_path.display(),
            "Begin updating hosts file"
        );

        let source_meta = std::fs::metadata(source_path)?;
        let records = extract_records(&std::fs::read_to_string(source_path)?);
        let current = std::fs::read_to_string(hosts_path)?;
        let merged = merge(&current, &records)?;

        if merged == current {
            tracing::debug!(
                path = %hosts_path.display(),
                "Hosts content unchanged, skipping write"
            );
        } else {
            std::fs::write(hosts_path, merged)?;
        }
        copy_file_times(&source_meta, hosts_path)?;

        tracing::info!(
            records = records.len(),
            path = %hosts_path.display(),
            "Updated hosts file from DHCP reservations"
        );
        Ok(records.len())
    }

    /// Updates the hosts file if [`needs_update`](Self::needs_update) says
    /// so, or unconditionally when `force` is set.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`needs_update`](Self::needs_update) and
    /// [`update`](Self::update).
    pub fn sync(&self, force: bool) -> Result<SyncOutcome> {
        if !force && !self.needs_update()? {
            tracing::info!(path = %self.hosts_path().display(), "No update needed");
            return Ok(SyncOutcome::UpToDate);
        }
        let records = self.update()?;
        Ok(SyncOutcome::Updated { records })
    }

    fn hosts_path(&self) -> &Path {
        &self.config.hosts_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BLOCK_FOOTER, BLOCK_HEADER};
    use crate::error::SyncError;
    use std::time::{Duration, SystemTime};

    const DHCP: &str = "dhcp-range=172.30.50.51,172.30.50.99,12h\n\
                        dhcp-host=00:0c:1e:02:b3:a3,172.30.50.22,family-room\n\
                        dhcp-host=10:40:f3:ec:90:1c,172.30.50.2,appletv\n\
                        dhcp-host=18:b4:30:00:48:b1,nest-thermostat";

    fn setup(hosts: &str) -> (tempfile::TempDir, HostsSync) {
        let dir = tempfile::tempdir().unwrap();
        let dhcp_path = dir.path().join("dhcp-hosts.conf");
        let hosts_path = dir.path().join("hosts");
        std::fs::write(&dhcp_path, DHCP).unwrap();
        std::fs::write(&hosts_path, hosts).unwrap();
        set_mtime(&dhcp_path, 1_330_712_292);
        set_mtime(&hosts_path, 1_230_712_293);

        let sync = HostsSync::new(SyncConfig::new(dhcp_path).with_hosts_file(hosts_path));
        (dir, sync)
    }

    fn set_mtime(path: &Path, secs: u64) {
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    fn hosts(sync: &HostsSync) -> String {
        std::fs::read_to_string(&sync.config().hosts_file).unwrap()
    }

    #[test]
    fn needs_update_when_mtimes_differ() {
        let (_dir, sync) = setup("");
        assert!(sync.needs_update().unwrap());
    }

    #[test]
    fn no_update_when_mtimes_match() {
        let (_dir, sync) = setup("");
        set_mtime(&sync.config().hosts_file, 1_330_712_292);
        assert!(!sync.needs_update().unwrap());
        assert_eq!(sync.sync(false).unwrap(), SyncOutcome::UpToDate);
        assert_eq!(hosts(&sync), "");
    }

    #[test]
    fn update_writes_block_and_copies_mtime() {
        let (_dir, sync) = setup("127.0.0.1 localhost\n");

        assert_eq!(sync.update().unwrap(), 2);
        assert_eq!(
            hosts(&sync),
            format!(
                "127.0.0.1 localhost\n{BLOCK_HEADER}172.30.50.22\tfamily-room\n172.30.50.2\tappletv\n{BLOCK_FOOTER}"
            )
        );

        let source = std::fs::metadata(&sync.config().dhcp_hostsfile).unwrap();
        let target = std::fs::metadata(&sync.config().hosts_file).unwrap();
        assert_eq!(mtime(&source), mtime(&target));
        assert!(!sync.needs_update().unwrap());
    }

    #[test]
    fn sync_reaches_fixed_point() {
        let (_dir, sync) = setup("127.0.0.1 localhost\n");

        assert_eq!(sync.sync(false).unwrap(), SyncOutcome::Updated { records: 2 });
        let first = hosts(&sync);
        assert_eq!(sync.sync(false).unwrap(), SyncOutcome::UpToDate);
        assert_eq!(hosts(&sync), first);
    }

    #[test]
    fn forced_sync_is_idempotent() {
        let (_dir, sync) = setup("127.0.0.1 localhost\n");

        sync.sync(true).unwrap();
        let first = hosts(&sync);
        assert_eq!(sync.sync(true).unwrap(), SyncOutcome::Updated { records: 2 });
        assert_eq!(hosts(&sync), first);
    }

    #[test]
    fn unchanged_content_only_refreshes_timestamps() {
        let (_dir, sync) = setup("127.0.0.1 localhost\n");
        sync.update().unwrap();
        let first = hosts(&sync);

        // Read-only so that a rewrite would fail with PermissionDenied.
        let path = &sync.config().hosts_file;
        set_mtime(path, 1_230_712_293);
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(path, perms).unwrap();

        assert_eq!(sync.update().unwrap(), 2);
        assert_eq!(hosts(&sync), first);
        assert!(!sync.needs_update().unwrap());
    }

    #[test]
    fn missing_source_is_io_error() {
        let (dir, sync) = setup("127.0.0.1 localhost\n");
        std::fs::remove_file(dir.path().join("dhcp-hosts.conf")).unwrap();

        assert!(matches!(sync.sync(true), Err(SyncError::Io(_))));
        assert!(matches!(sync.needs_update(), Err(SyncError::Io(_))));
        assert_eq!(hosts(&sync), "127.0.0.1 localhost\n");
    }

    #[test]
    fn malformed_block_leaves_hosts_untouched() {
        let broken = format!("127.0.0.1 localhost\n{BLOCK_HEADER}10.0.0.5\tnas\n");
        let (_dir, sync) = setup(&broken);

        assert!(matches!(
            sync.sync(false),
            Err(SyncError::MalformedBlock { line: 3 })
        ));
        assert_eq!(hosts(&sync), broken);
        assert!(sync.needs_update().unwrap());
    }
}
