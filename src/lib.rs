//! SNMP health checks for network devices, reported in the monitoring-plugin
//! format.
//!
//! The crate polls SNMPv2c agents, assembles the flat variable bindings into
//! typed records, derives interface rates from two counter samples and turns
//! everything into a [`verdict::Verdict`] with a plugin exit code.
//!
//! # Usage
//!
//! Interface bandwidth with thresholds in bits per second:
//! ```bash
//! snmp-checks -t 192.0.2.1 -c public interface-usage --index 3 --warn-in 500000000 --crit-in 800000000 --perf-data
//! ```
//!
//! Inventory of two devices as JSON:
//! ```bash
//! snmp-checks -t 192.0.2.1 -t 192.0.2.2 -o json inventory
//! ```

/// Table assembly from walk results.
pub mod assembler;
/// The individual health checks.
pub mod checks;
/// Command-line configuration and validation.
pub mod configuration;
/// Typed views over assembled records.
pub mod entities;
/// MIB object registry and value decoding.
pub mod mib;
/// Object identifiers.
pub mod oid;
/// Counter sampling and rate computation.
pub mod rate;
/// Text and JSON output.
pub mod report;
/// Concurrent execution over several targets.
pub mod runner;
/// Threshold evaluation.
pub mod threshold;
/// Clocks and timestamps.
pub mod time;
/// SNMP transport.
pub mod transport;
/// Check results and exit codes.
pub mod verdict;
/// Raw values as received from the agent.
pub mod wire;
