//! Conversion of wire values into semantic values.

use std::net::Ipv4Addr;

use serde::Serialize;
use thiserror::Error;

use super::{Kind, OidSpec};
use crate::wire::{RawValue, WireType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{oid}: expected {expected}, device sent {actual}")]
    Mismatch {
        oid: String,
        expected: Kind,
        actual: WireType,
    },
    #[error("{0}: not a known object")]
    UnknownOid(String),
}

/// A decoded value, typed by the registry kind it was checked against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Gauge32(u32),
    Counter32(u32),
    Counter64(u64),
    TimeTicks(u32),
    /// MAC or IPv4 address, already rendered.
    Address(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Address(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Integer(v) => Some(v),
            Value::Gauge32(v) | Value::Counter32(v) | Value::TimeTicks(v) => Some(v as i64),
            Value::Counter64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Non-negative numeric view. Negative integers yield `None`.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Integer(v) => u64::try_from(v).ok(),
            Value::Gauge32(v) | Value::Counter32(v) | Value::TimeTicks(v) => Some(v as u64),
            Value::Counter64(v) => Some(v),
            _ => None,
        }
    }
}

/// Decodes `raw`, received for instance `oid`, against the registry entry `spec`.
///
/// No coercion is attempted: a wire type other than the one the kind allows is
/// reported as [`DecodeError::Mismatch`].
pub fn decode(spec: &OidSpec, oid: &str, raw: &RawValue) -> Result<Value, DecodeError> {
    let value = match (spec.kind, raw) {
        (Kind::DisplayString, RawValue::OctetString(bytes)) => {
            Some(Value::Text(display_string(bytes)))
        }
        (Kind::Integer, RawValue::Integer(v)) => Some(Value::Integer(*v)),
        (Kind::Gauge32, RawValue::Gauge32(v)) => Some(Value::Gauge32(*v)),
        (Kind::Counter32, RawValue::Counter32(v)) => Some(Value::Counter32(*v)),
        (Kind::Counter64, RawValue::Counter64(v)) => Some(Value::Counter64(*v)),
        (Kind::TimeTicks, RawValue::TimeTicks(v)) => Some(Value::TimeTicks(*v)),
        (Kind::MacAddress, RawValue::OctetString(bytes)) => Some(Value::Address(mac_string(bytes))),
        (Kind::Ipv4Address, RawValue::IpAddress(octets)) => {
            Some(Value::Address(Ipv4Addr::from(*octets).to_string()))
        }
        (Kind::Ipv4Address, RawValue::OctetString(bytes)) => <[u8; 4]>::try_from(bytes.as_slice())
            .ok()
            .map(|octets| Value::Address(Ipv4Addr::from(octets).to_string())),
        (Kind::ObjectId, RawValue::ObjectId(s)) => {
            Some(Value::Text(crate::oid::normalize(s).to_string()))
        }
        _ => None,
    };

    value.ok_or_else(|| DecodeError::Mismatch {
        oid: oid.to_string(),
        expected: spec.kind,
        actual: raw.wire_type(),
    })
}

/// Renders a DisplayString, dropping the trailing NULs some agents pad with.
fn display_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

/// Formats octets as lower-case colon-separated hex.
fn mac_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
