pub use clap::{Args, Parser, Subcommand};

use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use crate::{
    report::OutputFormat,
    threshold::{Threshold, Thresholds},
    transport::{TransportConfig, DEFAULT_PORT},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("At least one non-empty target is required")]
    NoTarget,
    #[error("Timeout must be at least one second")]
    ZeroTimeout,
    #[error("Delay between samples must be at least one second")]
    ZeroDelay,
    #[error("{direction} warning level {warn} is above the critical level {crit}")]
    InvertedThreshold {
        direction: &'static str,
        warn: u64,
        crit: u64,
    },
    #[error("Invalid sysDescr pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "snmp-checks", version, about, long_about = None)]
pub struct Configuration {
    /// SNMP agent to query, may be repeated to check several devices
    #[arg(short, long = "target", default_value = "127.0.0.1")]
    pub targets: Vec<String>,
    /// SNMPv2c community string
    #[arg(short, long, default_value = "public")]
    pub community: String,
    /// UDP port of the SNMP agent
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub check: Check,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Check {
    /// Bandwidth of one interface from two counter samples
    InterfaceUsage(InterfaceUsageArgs),
    /// Details of every interface
    Interfaces,
    /// System description, optionally matched against a pattern
    Sysdescr(SysDescrArgs),
    /// BGP peers that are started but not established
    BgpPeers(BgpPeersArgs),
    /// Device inventory document
    Inventory,
}

impl Check {
    pub fn name(&self) -> &'static str {
        match self {
            Check::InterfaceUsage(_) => "interface-usage",
            Check::Interfaces => "interfaces",
            Check::Sysdescr(_) => "sysdescr",
            Check::BgpPeers(_) => "bgp-peers",
            Check::Inventory => "inventory",
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InterfaceUsageArgs {
    /// ifIndex of the interface
    #[arg(short, long, default_value_t = 1)]
    pub index: u32,
    /// Seconds to wait between the two samples
    #[arg(short, long, default_value_t = 10)]
    pub delay: u64,
    /// Inbound warning level in bps, 0 disables
    #[arg(long, default_value_t = 0)]
    pub warn_in: u64,
    /// Inbound critical level in bps, 0 disables
    #[arg(long, default_value_t = 0)]
    pub crit_in: u64,
    /// Outbound warning level in bps, 0 disables
    #[arg(long, default_value_t = 0)]
    pub warn_out: u64,
    /// Outbound critical level in bps, 0 disables
    #[arg(long, default_value_t = 0)]
    pub crit_out: u64,
    /// Append performance data
    #[arg(long)]
    pub perf_data: bool,
}

impl InterfaceUsageArgs {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            inbound: Threshold::new(self.warn_in, self.crit_in),
            outbound: Threshold::new(self.warn_out, self.crit_out),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay)
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SysDescrArgs {
    /// Regular expression sysDescr must match
    #[arg(long)]
    pub pattern: Option<String>,
    /// Append performance data
    #[arg(long)]
    pub perf_data: bool,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BgpPeersArgs {
    /// Append performance data
    #[arg(long)]
    pub perf_data: bool,
}

impl Configuration {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.targets.is_empty() || self.targets.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigurationError::NoTarget);
        }
        if self.timeout == 0 {
            return Err(ConfigurationError::ZeroTimeout);
        }

        match &self.check {
            Check::InterfaceUsage(args) => {
                if args.delay == 0 {
                    return Err(ConfigurationError::ZeroDelay);
                }
                check_order("Inbound", args.thresholds().inbound)?;
                check_order("Outbound", args.thresholds().outbound)?;
            }
            Check::Sysdescr(SysDescrArgs {
                pattern: Some(pattern),
                ..
            }) => {
                Regex::new(pattern).map_err(|e| ConfigurationError::InvalidPattern(e.to_string()))?;
            }
            _ => {}
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Session parameters for one of the configured targets.
    pub fn transport_config(&self, target: &str) -> TransportConfig {
        TransportConfig {
            target: target.trim().to_string(),
            port: self.port,
            community: self.community.clone(),
            timeout: self.timeout(),
        }
    }
}

fn check_order(direction: &'static str, threshold: Threshold) -> Result<(), ConfigurationError> {
    if threshold.warn > 0 && threshold.crit > 0 && threshold.warn > threshold.crit {
        return Err(ConfigurationError::InvertedThreshold {
            direction,
            warn: threshold.warn,
            crit: threshold.crit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Configuration {
        Configuration::try_parse_from(std::iter::once("snmp-checks").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["interfaces"]);
        assert_eq!(config.targets, vec!["127.0.0.1".to_string()]);
        assert_eq!(config.community, "public");
        assert_eq!(config.port, 161);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(matches!(config.output, OutputFormat::Text));
        assert!(matches!(config.check, Check::Interfaces));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_interface_usage_args() {
        let config = parse(&[
            "-t", "10.0.0.1", "-t", "10.0.0.2", "interface-usage", "--index", "3", "--delay",
            "5", "--warn-in", "5000", "--crit-in", "10000", "--perf-data",
        ]);
        assert_eq!(config.targets.len(), 2);
        match &config.check {
            Check::InterfaceUsage(args) => {
                assert_eq!(args.index, 3);
                assert_eq!(args.delay(), Duration::from_secs(5));
                assert_eq!(args.thresholds().inbound, Threshold::new(5000, 10000));
                assert_eq!(args.thresholds().outbound, Threshold::default());
                assert!(args.perf_data);
            }
            other => panic!("Expected interface-usage, got {:?}", other),
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_delay() {
        let config = parse(&["interface-usage", "--delay", "0"]);
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroDelay));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = parse(&["--timeout", "0", "inventory"]);
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_empty_target() {
        let config = parse(&["-t", " ", "sysdescr"]);
        assert_eq!(config.validate(), Err(ConfigurationError::NoTarget));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = parse(&["interface-usage", "--warn-out", "200", "--crit-out", "100"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvertedThreshold {
                direction: "Outbound",
                ..
            })
        ));

        // Only one bound set is fine.
        let config = parse(&["interface-usage", "--warn-out", "200"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let config = parse(&["sysdescr", "--pattern", "Cisco(IOS"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidPattern(_))
        ));

        let config = parse(&["sysdescr", "--pattern", "^Linux"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_output_and_transport_config() {
        let config = parse(&["-o", "json", "-c", "s3cret", "-p", "1161", "bgp-peers"]);
        assert!(matches!(config.output, OutputFormat::Json));

        let transport = config.transport_config("192.0.2.7");
        assert_eq!(transport.target, "192.0.2.7");
        assert_eq!(transport.community, "s3cret");
        assert_eq!(transport.port, 1161);
    }

    #[test]
    fn test_check_names() {
        assert_eq!(parse(&["bgp-peers"]).check.name(), "bgp-peers");
        assert_eq!(parse(&["sysdescr"]).check.name(), "sysdescr");
    }
}
