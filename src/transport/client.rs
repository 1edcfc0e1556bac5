//! SNMPv2c client built on `snmp2`.
//!
//! A fresh session is opened for every GET or WALK and dropped afterwards;
//! there are no retries. Walks use GETBULK and stop at the first binding
//! outside the requested subtree.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use snmp2::{SyncSession, Value};

use super::{describe_oids, Response, Transport, TransportError, DEFAULT_PORT, DEFAULT_TIMEOUT};
use crate::{
    oid::{Oid, OidError},
    wire::RawValue,
};

/// Bindings requested per GETBULK round trip.
const MAX_REPETITIONS: u32 = 25;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    pub target: String,
    pub port: u16,
    pub community: String,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(target: impl Into<String>, community: impl Into<String>) -> Self {
        TransportConfig {
            target: target.into(),
            port: DEFAULT_PORT,
            community: community.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct SnmpClient {
    config: TransportConfig,
}

impl SnmpClient {
    pub fn new(config: TransportConfig) -> Self {
        SnmpClient { config }
    }

    fn open(&self, oids: &[Oid]) -> Result<SyncSession, TransportError> {
        let addr = (self.config.target.as_str(), self.config.port);
        SyncSession::new_v2c(
            addr,
            self.config.community.as_bytes(),
            Some(self.config.timeout),
            0,
        )
        .map_err(|e| TransportError::Session {
            target: self.config.target.clone(),
            oids: describe_oids(oids),
            reason: e.to_string(),
        })
    }

    fn request_error(&self, oids: &[Oid], reason: String) -> TransportError {
        TransportError::Request {
            target: self.config.target.clone(),
            oids: describe_oids(oids),
            reason,
        }
    }
}

impl Transport for SnmpClient {
    fn target(&self) -> &str {
        &self.config.target
    }

    fn get(&mut self, oids: &[Oid]) -> Result<Response, TransportError> {
        let mut session = self.open(oids)?;
        let mut values = BTreeMap::new();
        let start = Instant::now();

        // One request per OID keeps a single noSuchName from voiding the rest.
        for oid in oids {
            let name = snmp2::Oid::from(&oid.arcs())
                .map_err(|e| self.request_error(oids, format!("{:?}", e)))?;
            let pdu = session
                .get(&name)
                .map_err(|e| self.request_error(oids, format!("{:?}", e)))?;

            if pdu.error_status != 0 {
                log::debug!(
                    "{} answered GET {} with error status {}",
                    self.config.target,
                    oid,
                    pdu.error_status
                );
            }

            for (name, value) in pdu.varbinds {
                values.insert(name.to_string(), to_raw(&value));
            }
        }

        let latency = start.elapsed();
        log::debug!(
            "GET {} from {}: {} values in {:?}",
            describe_oids(oids),
            self.config.target,
            values.len(),
            latency
        );

        Ok(Response { values, latency })
    }

    fn walk(&mut self, base: &Oid) -> Result<Response, TransportError> {
        let bases = std::slice::from_ref(base);
        let mut session = self.open(bases)?;
        let mut values = BTreeMap::new();
        let start = Instant::now();
        let mut cursor = base.clone();

        'walk: loop {
            let name = snmp2::Oid::from(&cursor.arcs())
                .map_err(|e| self.request_error(bases, format!("{:?}", e)))?;
            let pdu = session
                .getbulk(&[&name], 0, MAX_REPETITIONS)
                .map_err(|e| self.request_error(bases, format!("{:?}", e)))?;

            let mut advanced = false;
            for (name, value) in pdu.varbinds {
                let step = walk_step(base, &cursor, &name.to_string(), &value)
                    .map_err(|e| self.request_error(bases, e.to_string()))?;
                match step {
                    WalkStep::Keep(oid) => {
                        values.insert(oid.to_string(), to_raw(&value));
                        cursor = oid;
                        advanced = true;
                    }
                    WalkStep::Stop => break 'walk,
                }
            }

            if !advanced {
                break;
            }
        }

        let latency = start.elapsed();
        log::debug!(
            "WALK {} on {}: {} values in {:?}",
            base,
            self.config.target,
            values.len(),
            latency
        );

        Ok(Response { values, latency })
    }
}

/// What a walk does with one returned binding.
#[derive(Debug, PartialEq, Eq)]
enum WalkStep {
    Keep(Oid),
    Stop,
}

/// Decides whether the binding `name` continues a walk of `base` that last
/// stored `cursor`. The walk stops at the end of the MIB view, at the first
/// name outside the subtree and at an agent that does not advance.
fn walk_step(base: &Oid, cursor: &Oid, name: &str, value: &Value) -> Result<WalkStep, OidError> {
    if matches!(value, Value::EndOfMibView) {
        return Ok(WalkStep::Stop);
    }
    let oid: Oid = name.parse()?;
    if !oid.starts_with(base) || oid <= *cursor {
        return Ok(WalkStep::Stop);
    }
    Ok(WalkStep::Keep(oid))
}

/// Converts a library value into the crate's closed wire type.
fn to_raw(value: &Value) -> RawValue {
    match value {
        Value::Integer(v) => RawValue::Integer(*v),
        Value::OctetString(bytes) => RawValue::OctetString(bytes.to_vec()),
        Value::ObjectIdentifier(oid) => RawValue::ObjectId(oid.to_string()),
        Value::IpAddress(octets) => RawValue::IpAddress(*octets),
        Value::Counter32(v) => RawValue::Counter32(*v),
        Value::Unsigned32(v) => RawValue::Gauge32(*v),
        Value::Timeticks(v) => RawValue::TimeTicks(*v),
        Value::Counter64(v) => RawValue::Counter64(*v),
        _ => RawValue::Null,
    }
}
