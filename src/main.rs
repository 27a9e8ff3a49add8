//! `dhcp2hosts` command-line entry point.
//!
//! Intended to run from cron or a systemd timer:
//!
//! ```bash
//! dhcp2hosts --dhcp-hostsfile /etc/dnsmasq.d/dhcp-hosts.conf
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dhcp2hosts::{DEFAULT_HOSTS_FILE, HostsSync, SyncConfig, SyncError, SyncOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dhcp2hosts",
    version,
    about = "Read a dnsmasq DHCP hosts file and write its hostnames and IPs to /etc/hosts"
)]
struct Cli {
    /// dnsmasq file containing `dhcp-host=` reservations
    #[arg(long, alias = "dhcp_hostsfile", value_name = "PATH")]
    dhcp_hostsfile: PathBuf,

    /// Rewrite the hosts file even if timestamps say it is current
    #[arg(long)]
    force: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let sync = HostsSync::new(SyncConfig::new(cli.dhcp_hostsfile));
    match sync.sync(cli.force) {
        Ok(SyncOutcome::Updated { records }) => {
            tracing::debug!(records, "Sync complete");
            ExitCode::SUCCESS
        }
        Ok(SyncOutcome::UpToDate) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to update hosts file");
            if e.is_permission_denied() {
                eprintln!("hint: writing {DEFAULT_HOSTS_FILE} requires root");
            }
            if let SyncError::MalformedBlock { line } = e {
                eprintln!(
                    "hint: remove the generated block near line {line} of {DEFAULT_HOSTS_FILE} and re-run"
                );
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_original_flag_spelling() {
        let cli = Cli::try_parse_from(["dhcp2hosts", "--dhcp_hostsfile", "hosts.conf"]).unwrap();
        assert_eq!(cli.dhcp_hostsfile, PathBuf::from("hosts.conf"));
        assert!(!cli.force);
    }

    #[test]
    fn hostsfile_is_required() {
        assert!(Cli::try_parse_from(["dhcp2hosts"]).is_err());
        assert!(Cli::try_parse_from(["dhcp2hosts", "--force"]).is_err());
    }
}
