//! Interface listing.
//!
//! ifTable is required; ifXTable only adds names, aliases and 64-bit
//! counters, so a device without it still gets a listing.

use std::collections::BTreeMap;

use crate::{
    assembler::EntityRecord,
    entities::InterfaceDetail,
    mib::{Family, IF_TABLE, IF_X_TABLE},
    oid::Oid,
    transport::Transport,
    verdict::Verdict,
};

use super::{walk_tables, CheckError};

pub fn run(transport: &mut dyn Transport) -> (Verdict, Option<serde_json::Value>) {
    match collect(transport) {
        Ok(interfaces) => {
            let details = serde_json::to_value(&interfaces)
                .map_err(|e| log::warn!("Cannot serialize interfaces: {}", e))
                .ok();
            (Verdict::ok(summary(&interfaces)), details)
        }
        Err(e) => (e.into_verdict(), None),
    }
}

/// Collects every interface, ordered by ifIndex.
pub fn collect(transport: &mut dyn Transport) -> Result<Vec<InterfaceDetail>, CheckError> {
    let primary = walk_tables(transport, Family::Interface, &[IF_TABLE])?;

    let mut records = primary.records;
    match walk_tables(transport, Family::Interface, &[IF_X_TABLE]) {
        Ok(extended) => {
            for (index, record) in extended.records {
                records
                    .entry(index)
                    .or_insert_with(|| EntityRecord::new(index))
                    .fields
                    .extend(record.fields);
            }
        }
        Err(e) => log::warn!(
            "Skipping {} on {}: {}",
            Oid::from_slice(IF_X_TABLE),
            transport.target(),
            e
        ),
    }

    Ok(sorted(records))
}

fn sorted(records: BTreeMap<u32, EntityRecord>) -> Vec<InterfaceDetail> {
    records.values().map(InterfaceDetail::from_record).collect()
}

fn summary(interfaces: &[InterfaceDetail]) -> String {
    let listing: Vec<String> = interfaces.iter().map(|i| i.to_string()).collect();
    format!("{} interfaces found\n{}", interfaces.len(), listing.join("\n\n"))
}
