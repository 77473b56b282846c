use std::path::PathBuf;

use clap::{Command, CommandFactory, Parser, Subcommand};
use fboss_config::LogFilter;

use crate::families::{config, flush, neighbor, verbosity};

#[derive(Debug, Parser)]
#[command(name = "fbossctl", about = "Command-line client for the FBOSS agent", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Families,
    /// Host name or address of the switch running the agent
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,
    /// Port of the agent's control service
    #[arg(short, long, global = true)]
    pub port: Option<u16>,
    /// Timeout for connecting and for each call, in milliseconds
    #[arg(short, long, global = true, value_name = "MS")]
    pub timeout: Option<u64>,
    /// Read client settings from this file instead of /etc/fbossctl/config.toml
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogFilter>,
    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Families {
    /// Flush neighbor entries within a network
    Flush(flush::Flush),
    /// ARP (IPv4 neighbor) table
    #[command(subcommand)]
    Arp(neighbor::Neighbor),
    /// NDP (IPv6 neighbor) table
    #[command(subcommand)]
    Ndp(neighbor::Neighbor),
    /// Agent configuration
    #[command(subcommand)]
    Config(config::Config),
    /// Set the agent's logging verbosity
    Verbosity(verbosity::Verbosity),
}

pub fn build_cli() -> Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use fboss_core::neighbor::{FlushType, VlanFilter};

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("fbossctl").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_parse_flush() {
        let cli = parse(&["flush", "arp", "10.0.0.0/24", "--vlan", "5"]).unwrap();
        let Families::Flush(flush) = cli.command else {
            panic!("expected flush command");
        };

        assert_eq!(flush.flush_type, FlushType::Arp);
        assert_eq!(flush.network.to_string(), "10.0.0.0/24");
        assert_eq!(flush.vlan_filter(), VlanFilter::Only(5));
    }

    #[test]
    fn test_parse_flush_without_vlan() {
        let cli = parse(&["flush", "NDP", "2401:db00::1"]).unwrap();
        let Families::Flush(flush) = cli.command else {
            panic!("expected flush command");
        };

        assert_eq!(flush.flush_type, FlushType::Ndp);
        assert_eq!(flush.vlan_filter(), VlanFilter::Any);
        assert!(flush.filter().host().is_some());
    }

    #[test]
    fn test_invalid_flush_type_is_rejected() {
        let error = parse(&["flush", "mpls", "10.0.0.0/24"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_invalid_network_is_rejected() {
        let error = parse(&["flush", "arp", "10.0.0.1/24"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);

        let error = parse(&["flush", "arp", "10.0.0.0/24", "--vlan", "-1"]).unwrap_err();
        assert_ne!(error.exit_code(), 0);
    }

    #[test]
    fn test_global_options() {
        let cli = parse(&[
            "arp", "table", "-H", "rsw1aa", "--port", "5910", "--timeout", "500", "--json",
            "--log-level", "debug",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Families::Arp(neighbor::Neighbor::Table)
        ));
        assert_eq!(cli.host.as_deref(), Some("rsw1aa"));
        assert_eq!(cli.port, Some(5910));
        assert_eq!(cli.timeout, Some(500));
        assert!(cli.json);
        assert_eq!(cli.log_level, Some(LogFilter::Debug));
    }

    #[test]
    fn test_parse_config() {
        let cli = parse(&["config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Families::Config(config::Config::Show { config_type }) if config_type == "agent"
        ));

        let cli = parse(&["config", "reload"]).unwrap();
        assert!(matches!(cli.command, Families::Config(config::Config::Reload)));
    }

    #[test]
    fn test_parse_verbosity() {
        let cli = parse(&["verbosity", "3"]).unwrap();
        let Families::Verbosity(verbosity) = cli.command else {
            panic!("expected verbosity command");
        };
        assert_eq!(verbosity.level, "3");
    }
}
