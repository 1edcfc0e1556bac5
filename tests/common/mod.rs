//! Scripted SNMP device shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};

use snmp_checks::oid::Oid;
use snmp_checks::time::ManualClock;
use snmp_checks::transport::{describe_oids, Response, Transport, TransportError};
use snmp_checks::wire::RawValue;

/// A device that answers GETs from a queue of snapshots and WALKs from fixed
/// tables. Running out of snapshots, or walking an unknown root, behaves like
/// a request timeout.
pub struct FakeDevice {
    name: String,
    snapshots: VecDeque<BTreeMap<String, RawValue>>,
    tables: BTreeMap<String, BTreeMap<String, RawValue>>,
}

impl FakeDevice {
    pub fn new(name: &str) -> Self {
        FakeDevice {
            name: name.to_string(),
            snapshots: VecDeque::new(),
            tables: BTreeMap::new(),
        }
    }

    pub fn snapshot(mut self, values: &[(&str, RawValue)]) -> Self {
        self.snapshots.push_back(to_map(values));
        self
    }

    pub fn table(mut self, root: &str, values: &[(&str, RawValue)]) -> Self {
        self.tables.insert(root.to_string(), to_map(values));
        self
    }

    fn timeout(&self, oids: String) -> TransportError {
        TransportError::Request {
            target: self.name.clone(),
            oids,
            reason: "Request timed out".to_string(),
        }
    }
}

impl Transport for FakeDevice {
    fn target(&self) -> &str {
        &self.name
    }

    fn get(&mut self, oids: &[Oid]) -> Result<Response, TransportError> {
        let snapshot = match self.snapshots.pop_front() {
            Some(snapshot) => snapshot,
            None => return Err(self.timeout(describe_oids(oids))),
        };

        let values = oids
            .iter()
            .filter_map(|oid| {
                let key = oid.to_string();
                snapshot.get(&key).map(|value| (key, value.clone()))
            })
            .collect();

        Ok(Response {
            values,
            latency: Duration::from_millis(12),
        })
    }

    fn walk(&mut self, base: &Oid) -> Result<Response, TransportError> {
        match self.tables.get(&base.to_string()) {
            Some(values) => Ok(Response {
                values: values.clone(),
                latency: Duration::from_millis(30),
            }),
            None => Err(self.timeout(base.to_string())),
        }
    }
}

fn to_map(values: &[(&str, RawValue)]) -> BTreeMap<String, RawValue> {
    values
        .iter()
        .map(|(oid, value)| (oid.to_string(), value.clone()))
        .collect()
}

pub fn start_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn clock() -> ManualClock {
    ManualClock::new(start_time())
}

/// One ifTable/ifXTable snapshot of interface `index`.
pub fn interface_sample(
    index: u32,
    descr: &str,
    in_octets: u32,
    out_octets: u32,
) -> Vec<(String, RawValue)> {
    vec![
        (format!("1.3.6.1.2.1.2.2.1.2.{}", index), RawValue::OctetString(descr.as_bytes().to_vec())),
        (format!("1.3.6.1.2.1.2.2.1.5.{}", index), RawValue::Gauge32(1_000_000_000)),
        (format!("1.3.6.1.2.1.2.2.1.10.{}", index), RawValue::Counter32(in_octets)),
        (format!("1.3.6.1.2.1.2.2.1.16.{}", index), RawValue::Counter32(out_octets)),
    ]
}

/// Borrows owned OID strings for [`FakeDevice::snapshot`].
pub fn borrowed(values: &[(String, RawValue)]) -> Vec<(&str, RawValue)> {
    values.iter().map(|(o, v)| (o.as_str(), v.clone())).collect()
}
