//! Wire-level SNMP values.
//!
//! The transport converts whatever its client library hands back into this
//! closed set exactly once. Everything downstream matches on [`RawValue`]
//! exhaustively instead of guessing at types.

use std::fmt;

use serde::Serialize;

/// An SNMP variable binding value as received from a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    Integer(i64),
    Gauge32(u32),
    Counter32(u32),
    Counter64(u64),
    TimeTicks(u32),
    OctetString(Vec<u8>),
    ObjectId(String),
    IpAddress([u8; 4]),
    /// Null, noSuchObject, noSuchInstance and endOfMibView all land here.
    Null,
}

/// The tag of a [`RawValue`], used in mismatch reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum WireType {
    Integer,
    Gauge32,
    Counter32,
    Counter64,
    TimeTicks,
    OctetString,
    ObjectId,
    IpAddress,
    Null,
}

impl RawValue {
    pub fn wire_type(&self) -> WireType {
        match self {
            RawValue::Integer(_) => WireType::Integer,
            RawValue::Gauge32(_) => WireType::Gauge32,
            RawValue::Counter32(_) => WireType::Counter32,
            RawValue::Counter64(_) => WireType::Counter64,
            RawValue::TimeTicks(_) => WireType::TimeTicks,
            RawValue::OctetString(_) => WireType::OctetString,
            RawValue::ObjectId(_) => WireType::ObjectId,
            RawValue::IpAddress(_) => WireType::IpAddress,
            RawValue::Null => WireType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WireType::Integer => "INTEGER",
            WireType::Gauge32 => "Gauge32",
            WireType::Counter32 => "Counter32",
            WireType::Counter64 => "Counter64",
            WireType::TimeTicks => "TimeTicks",
            WireType::OctetString => "OCTET STRING",
            WireType::ObjectId => "OBJECT IDENTIFIER",
            WireType::IpAddress => "IpAddress",
            WireType::Null => "NULL",
        };
        write!(f, "{}", name)
    }
}
