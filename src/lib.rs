//! # dhcp2hosts
//!
//! Keep `/etc/hosts` in sync with dnsmasq DHCP host reservations.
//!
//! dnsmasq reservations of the form `dhcp-host=<mac>,<ip>,<hostname>` are
//! turned into `<ip>\t<hostname>` lines inside a delimited, machine-owned
//! block at the end of the hosts file. Everything outside that block is
//! left exactly as it was, and re-running with unchanged input produces
//! byte-identical output.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dhcp2hosts::{HostsSync, SyncConfig};
//!
//! let sync = HostsSync::new(SyncConfig::new("/etc/dnsmasq.d/hosts.conf"));
//!
//! // Rewrites the block only if the reservations file changed (requires root).
//! sync.sync(false)?;
//! ```
//!
//! ## Pure core
//!
//! The extraction and merge steps are plain string transformations:
//!
//! ```
//! use dhcp2hosts::{extract_records, merge};
//!
//! let records = extract_records("dhcp-host=00:0c:1e:02:b3:a3,172.30.50.22,family-room\n");
//! let hosts = merge("127.0.0.1 localhost\n", &records).unwrap();
//!
//! assert!(hosts.ends_with("172.30.50.22\tfamily-room\n###   END: Auto-Generated by dhcp2hosts. DO NOT EDIT ###\n"));
//! assert_eq!(merge(&hosts, &records).unwrap(), hosts);
//! ```
//!
//! ## Change detection
//!
//! After each update the hosts file is stamped with the reservations file's
//! access and modification times. Equal modification times mean there is
//! nothing to do, so a periodic job (cron, systemd timer) stays cheap.
//!
//! ## Permissions
//!
//! Writing `/etc/hosts` requires root. The caller is responsible for
//! privilege elevation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod config;
pub mod error;
pub mod hosts_sync;
pub mod record;
pub mod util;

pub use block::{BLOCK_FOOTER, BLOCK_HEADER, generated_block, merge, strip_block};
pub use config::{DEFAULT_HOSTS_FILE, SyncConfig};
pub use error::{Result, SyncError};
pub use hosts_sync::{HostsSync, SyncOutcome};
pub use record::{DhcpRecord, extract_records};
