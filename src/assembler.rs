//! Folds flat walk results into one record per table row.
//!
//! A walk of ifTable returns one variable binding per cell, column-major:
//! every `ifDescr.N` first, then every `ifType.N`, and so on. Devices may
//! also interleave columns from ifXTable when both were walked. The
//! assembler splits each OID into column and row index, decodes the value
//! against the registry and merges everything sharing an index into a single
//! [`EntityRecord`].

use std::{collections::BTreeMap, net::Ipv4Addr};

use serde::Serialize;
use thiserror::Error;

use crate::{
    mib::{self, DecodeError, Family, Field, IndexKind, Value},
    oid::Oid,
    wire::RawValue,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error("Malformed row index in {oid}")]
    MalformedIndex { oid: String },
}

/// Every decoded field of one table row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub index: u32,
    pub fields: BTreeMap<Field, Value>,
}

impl EntityRecord {
    pub fn new(index: u32) -> Self {
        EntityRecord {
            index,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    /// Text of a field, empty when absent.
    pub fn text(&self, field: Field) -> String {
        self.get(field)
            .and_then(Value::as_text)
            .unwrap_or_default()
            .to_string()
    }

    pub fn number(&self, field: Field) -> Option<u64> {
        self.get(field).and_then(Value::as_u64)
    }

    pub fn integer(&self, field: Field) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// The row index read back as an IPv4 address, for address-indexed tables.
    pub fn index_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.index)
    }
}

/// Assembles the results of one or more walks (or GETs) into records keyed by
/// row index.
///
/// OIDs outside the registry, or belonging to another family, are ignored.
/// Values whose wire type does not match the registry are dropped from their
/// record; the rest of the record is kept. A row index that cannot be parsed
/// fails the whole assembly.
pub fn assemble(
    family: Family,
    walk: &BTreeMap<String, RawValue>,
) -> Result<BTreeMap<u32, EntityRecord>, AssembleError> {
    walk.iter()
        .try_fold(BTreeMap::new(), |mut records: BTreeMap<u32, EntityRecord>, (oid, raw)| {
            let (column, index) = split_index(family.index_kind(), oid)?;

            let spec = match column.parse::<Oid>().ok().as_ref().and_then(mib::lookup) {
                Some(spec) if spec.family == family => spec,
                _ => {
                    log::trace!("{}", DecodeError::UnknownOid(oid.clone()));
                    return Ok(records);
                }
            };

            let record = records
                .entry(index)
                .or_insert_with(|| EntityRecord::new(index));

            if raw.is_null() {
                log::debug!("{} ({}) has no value on this device", oid, spec.name);
                return Ok(records);
            }

            match mib::decode(spec, oid, raw) {
                Ok(value) => {
                    record.fields.insert(spec.field, value);
                }
                Err(e) => log::warn!("Dropping {}: {}", spec.name, e),
            }

            Ok(records)
        })
}

/// Splits an instance OID into its column part and packed row index.
fn split_index(kind: IndexKind, oid: &str) -> Result<(&str, u32), AssembleError> {
    let oid = crate::oid::normalize(oid);
    let malformed = || AssembleError::MalformedIndex {
        oid: oid.to_string(),
    };

    match kind {
        IndexKind::Integer => {
            let (column, index) = oid.rsplit_once('.').ok_or_else(malformed)?;
            let index = index.parse::<u32>().map_err(|_| malformed())?;
            Ok((column, index))
        }
        IndexKind::Ipv4 => {
            let mut parts = oid.rsplitn(5, '.');
            let mut octets = [0u8; 4];
            for slot in octets.iter_mut().rev() {
                let arc = parts.next().ok_or_else(malformed)?;
                *slot = arc.parse::<u8>().map_err(|_| malformed())?;
            }
            let column = parts.next().ok_or_else(malformed)?;
            Ok((column, u32::from(Ipv4Addr::from(octets))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(pairs: &[(&str, RawValue)]) -> BTreeMap<String, RawValue> {
        pairs
            .iter()
            .map(|(oid, raw)| (oid.to_string(), raw.clone()))
            .collect()
    }

    #[test]
    fn test_merges_columns_from_both_interface_tables() {
        let walk = walk(&[
            (".1.3.6.1.2.1.2.2.1.2.3", RawValue::OctetString(b"eth0".to_vec())),
            (".1.3.6.1.2.1.2.2.1.5.3", RawValue::Gauge32(1_000_000_000)),
            (".1.3.6.1.2.1.31.1.1.1.6.3", RawValue::Counter64(42)),
        ]);

        let records = assemble(Family::Interface, &walk).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[&3];
        assert_eq!(record.index, 3);
        assert_eq!(record.text(Field::IfDescr), "eth0");
        assert_eq!(record.number(Field::IfSpeed), Some(1_000_000_000));
        assert_eq!(record.get(Field::IfHcInOctets), Some(&Value::Counter64(42)));
    }

    #[test]
    fn test_indices_never_merge() {
        let walk = walk(&[
            ("1.3.6.1.2.1.2.2.1.2.1", RawValue::OctetString(b"lo".to_vec())),
            ("1.3.6.1.2.1.2.2.1.2.2", RawValue::OctetString(b"eth0".to_vec())),
            ("1.3.6.1.2.1.2.2.1.2.10", RawValue::OctetString(b"eth1".to_vec())),
        ]);

        let records = assemble(Family::Interface, &walk).unwrap();
        let indices: Vec<u32> = records.keys().copied().collect();
        assert_eq!(indices, vec![1, 2, 10]);
        assert_eq!(records[&2].text(Field::IfDescr), "eth0");
        assert_eq!(records[&10].fields.len(), 1);
    }

    #[test]
    fn test_mismatch_drops_only_that_field() {
        let walk = walk(&[
            ("1.3.6.1.2.1.2.2.1.2.3", RawValue::OctetString(b"eth0".to_vec())),
            ("1.3.6.1.2.1.31.1.1.1.6.3", RawValue::Counter32(5)),
        ]);

        let records = assemble(Family::Interface, &walk).unwrap();
        let record = &records[&3];
        assert_eq!(record.text(Field::IfDescr), "eth0");
        assert!(record.get(Field::IfHcInOctets).is_none());
    }

    #[test]
    fn test_malformed_index_fails() {
        let walk = walk(&[
            ("1.3.6.1.2.1.2.2.1.2.3", RawValue::OctetString(b"eth0".to_vec())),
            ("1.3.6.1.2.1.2.2.1.2.-1", RawValue::OctetString(b"bad".to_vec())),
        ]);

        assert_eq!(
            assemble(Family::Interface, &walk),
            Err(AssembleError::MalformedIndex {
                oid: "1.3.6.1.2.1.2.2.1.2.-1".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_and_foreign_columns_ignored() {
        let walk = walk(&[
            ("1.3.6.1.2.1.2.2.1.99.3", RawValue::Integer(1)),
            ("1.3.6.1.2.1.1.5.0", RawValue::OctetString(b"sw1".to_vec())),
            ("1.3.6.1.2.1.2.2.1.2.3", RawValue::OctetString(b"eth0".to_vec())),
        ]);

        let records = assemble(Family::Interface, &walk).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[&3].fields.len(), 1);
    }

    #[test]
    fn test_ipv4_indexed_table() {
        let walk = walk(&[
            ("1.3.6.1.2.1.4.20.1.1.192.168.1.10", RawValue::IpAddress([192, 168, 1, 10])),
            ("1.3.6.1.2.1.4.20.1.2.192.168.1.10", RawValue::Integer(2)),
            ("1.3.6.1.2.1.4.20.1.2.10.0.0.1", RawValue::Integer(5)),
        ]);

        let records = assemble(Family::IpAddress, &walk).unwrap();
        let addrs: Vec<Ipv4Addr> = records.values().map(|r| r.index_addr()).collect();
        assert_eq!(
            addrs,
            vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(192, 168, 1, 10)]
        );

        let key = u32::from(Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(records[&key].text(Field::IpAdEntAddr), "192.168.1.10");
        assert_eq!(records[&key].integer(Field::IpAdEntIfIndex), Some(2));
    }

    #[test]
    fn test_ipv4_index_out_of_range() {
        let walk = walk(&[("1.3.6.1.2.1.15.3.1.2.10.0.0.300", RawValue::Integer(6))]);
        assert!(matches!(
            assemble(Family::BgpPeer, &walk),
            Err(AssembleError::MalformedIndex { .. })
        ));
    }

    #[test]
    fn test_scalars_assemble_under_index_zero() {
        let walk = walk(&[
            ("1.3.6.1.2.1.1.1.0", RawValue::OctetString(b"Linux sw1".to_vec())),
            ("1.3.6.1.2.1.1.3.0", RawValue::TimeTicks(12345)),
        ]);

        let records = assemble(Family::System, &walk).unwrap();
        assert_eq!(records[&0].text(Field::SysDescr), "Linux sw1");
        assert_eq!(records[&0].number(Field::SysUpTime), Some(12345));
    }

    #[test]
    fn test_null_value_skipped() {
        let walk = walk(&[("1.3.6.1.2.1.31.1.1.1.6.3", RawValue::Null)]);
        let records = assemble(Family::Interface, &walk).unwrap();
        assert!(records[&3].fields.is_empty());
    }

    #[test]
    fn test_empty_walk() {
        let records = assemble(Family::Interface, &BTreeMap::new()).unwrap();
        assert!(records.is_empty());
    }
}
