//! Synchronization configuration.

use std::path::PathBuf;

/// Default system hosts file.
pub const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

/// Paths for a single DHCP-to-hosts synchronization.
///
/// # Example
///
/// ```
/// use dhcp2hosts::SyncConfig;
///
/// let config = SyncConfig::new("/etc/dnsmasq.d/hosts.conf")
///     .with_hosts_file("/tmp/hosts");
///
/// assert_eq!(config.dhcp_hostsfile.to_str(), Some("/etc/dnsmasq.d/hosts.conf"));
/// assert_eq!(config.hosts_file.to_str(), Some("/tmp/hosts"));
/// ```
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// dnsmasq file holding the `dhcp-host=` reservations.
    pub dhcp_hostsfile: PathBuf,

    /// Hosts file that receives the generated block.
    pub hosts_file: PathBuf,
}

impl SyncConfig {
    /// Creates a config targeting `/etc/hosts`.
    #[must_use]
    pub fn new(dhcp_hostsfile: impl Into<PathBuf>) -> Self {
        Self {
            dhcp_hostsfile: dhcp_hostsfile.into(),
            hosts_file: PathBuf::from(DEFAULT_HOSTS_FILE),
        }
    }

    /// Overrides the hosts file (useful for testing).
    #[must_use]
    pub fn with_hosts_file(mut self, hosts_file: impl Into<PathBuf>) -> Self {
        self.hosts_file = hosts_file.into();
        self
    }
}
