//! DHCP reservation extraction.
//!
//! Scans dnsmasq configuration text for lines of the form
//!
//! ```text
//! dhcp-host=10:2F:05:87:6D:7B,192.168.1.34,printer
//! ```
//!
//! and turns each one into a [`DhcpRecord`]. Anything else, including
//! reservations without a hostname, is ignored.

use regex::Regex;
use std::sync::LazyLock;

/// A single `(host, ip)` reservation.
///
/// Fields are declared in `(host, ip)` order so the derived ordering sorts
/// by hostname first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DhcpRecord {
    host: String,
    ip: String,
}

impl DhcpRecord {
    /// Creates a record. The hostname is lower-cased; the IP is kept as-is.
    ///
    /// ```
    /// use dhcp2hosts::DhcpRecord;
    ///
    /// let record = DhcpRecord::new("Family-Room", "172.30.50.22");
    /// assert_eq!(record.host(), "family-room");
    /// assert_eq!(record.ip(), "172.30.50.22");
    /// ```
    #[must_use]
    pub fn new(host: &str, ip: impl Into<String>) -> Self {
        Self {
            host: host.to_lowercase(),
            ip: ip.into(),
        }
    }

    /// Lower-cased hostname.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Dotted-quad IP, verbatim from the source.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.ip
    }
}

// MAC: 00:01:FF:AB:09:11 or 00-01-FF-AB-09-11.
// Host: 1-63 letters, digits or hyphens, not starting with a hyphen.
// Trailing hyphens are trimmed after matching since `regex` has no lookbehind.
static DHCP_HOST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)dhcp-host=(?:[0-9A-F]{2}[:-]){5}[0-9A-F]{2},(?P<ip>\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}),(?P<host>[A-Z\d][A-Z\d-]{0,62})",
    )
    .expect("Invalid dhcp-host regex")
});

/// Extracts every hostname reservation from dnsmasq configuration text,
/// in the order they appear.
///
/// ```
/// use dhcp2hosts::{DhcpRecord, extract_records};
///
/// let text = "dhcp-range=172.30.50.51,172.30.50.99,12h\n\
///             dhcp-host=00:0c:1e:02:b3:a3,172.30.50.22,FAMILY-ROOM\n\
///             dhcp-host=18:b4:30:00:48:b1,nest-thermostat\n";
///
/// assert_eq!(
///     extract_records(text),
///     vec![DhcpRecord::new("family-room", "172.30.50.22")]
/// );
/// ```
#[must_use]
pub fn extract_records(text: &str) -> Vec<DhcpRecord> {
    let records: Vec<DhcpRecord> = DHCP_HOST_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let ip = caps.name("ip")?.as_str();
            let host = caps.name("host")?.as_str().trim_end_matches('-');
            Some(DhcpRecord::new(host, ip))
        })
        .collect();

    tracing::debug!(count = records.len(), "Found DHCP reservations");
    records
}
