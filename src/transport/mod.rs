//! Access to SNMP agents.
//!
//! Checks talk to devices only through the [`Transport`] trait so they can be
//! driven by a scripted device in tests. [`SnmpClient`] is the SNMPv2c
//! implementation used by the binary.

mod client;

use std::{collections::BTreeMap, time::Duration};

use thiserror::Error;

use crate::{oid::Oid, wire::RawValue};

pub use client::{SnmpClient, TransportConfig};

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Cannot open SNMP session to {target} for {oids}: {reason}")]
    Session {
        target: String,
        oids: String,
        reason: String,
    },
    #[error("SNMP target {target} failed to return data for {oids}: {reason}")]
    Request {
        target: String,
        oids: String,
        reason: String,
    },
}

/// Values returned by one GET or WALK, keyed by dotted instance OID.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub values: BTreeMap<String, RawValue>,
    pub latency: Duration,
}

pub trait Transport {
    /// Name of the device this transport talks to, for messages.
    fn target(&self) -> &str;

    /// Fetches exactly the given instance OIDs.
    fn get(&mut self, oids: &[Oid]) -> Result<Response, TransportError>;

    /// Fetches every instance below `base`.
    fn walk(&mut self, base: &Oid) -> Result<Response, TransportError>;
}

/// Joins OIDs for error messages.
pub fn describe_oids(oids: &[Oid]) -> String {
    oids.iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
