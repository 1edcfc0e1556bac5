//! Device inventory document.
//!
//! The system group is required. Every other section is collected on its own
//! and left out of the document when the device cannot supply it.

use std::fmt;

use serde::Serialize;

use crate::{
    entities::{CpuUsage, InterfaceDetail, IpBinding, MemoryUsage, PhysicalEntity, SystemInfo},
    mib::{fields_of, Family, Field, ENT_PHYSICAL_TABLE, IP_ADDR_TABLE},
    transport::Transport,
    verdict::Verdict,
};

use super::{get_row, interfaces, walk_tables, CheckError};

const CPU_FIELDS: [Field; 4] = [
    Field::SsCpuRawUser,
    Field::SsCpuRawNice,
    Field::SsCpuRawSystem,
    Field::SsCpuRawIdle,
];

const MEMORY_FIELDS: [Field; 4] = [
    Field::MemTotalSwap,
    Field::MemAvailSwap,
    Field::MemTotalReal,
    Field::MemAvailReal,
];

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Inventory {
    pub system_info: SystemInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<InterfaceDetail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<IpBinding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub physical_entities: Vec<PhysicalEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryUsage>,
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sys = &self.system_info;
        write!(f, "{} ({})", sys.name, sys.description)?;
        write!(f, "\nLocation: {}", sys.location)?;
        write!(f, "\nContact: {}", sys.contact)?;
        write!(f, "\nUptime: {:.0} s", sys.uptime_seconds)?;

        if !self.interfaces.is_empty() {
            write!(f, "\nInterfaces: {}", self.interfaces.len())?;
            for i in &self.interfaces {
                write!(f, "\n  {} {} ({})", i.index, i.description, i.mac_address)?;
            }
        }
        if !self.ip_addresses.is_empty() {
            write!(f, "\nIP addresses: {}", self.ip_addresses.len())?;
            for ip in &self.ip_addresses {
                write!(f, "\n  {}/{} on {}", ip.ip_address, ip.netmask, ip.interface_index)?;
            }
        }
        if !self.physical_entities.is_empty() {
            write!(f, "\nPhysical entities: {}", self.physical_entities.len())?;
            for e in &self.physical_entities {
                write!(f, "\n  {} {} {} {}", e.index, e.name, e.model_name, e.serial_number)?;
            }
        }
        if let Some(cpu) = &self.cpu {
            write!(
                f,
                "\nCPU: user {:.1}% nice {:.1}% system {:.1}% idle {:.1}%",
                cpu.user_percent, cpu.nice_percent, cpu.system_percent, cpu.idle_percent
            )?;
        }
        if let Some(mem) = &self.memory {
            write!(
                f,
                "\nMemory: real {}/{} kB available, swap {}/{} kB available",
                mem.avail_real_kb, mem.total_real_kb, mem.avail_swap_kb, mem.total_swap_kb
            )?;
        }
        Ok(())
    }
}

pub fn run(transport: &mut dyn Transport) -> (Verdict, Option<serde_json::Value>) {
    match collect(transport) {
        Ok(inventory) => {
            let details = serde_json::to_value(&inventory)
                .map_err(|e| log::warn!("Cannot serialize inventory: {}", e))
                .ok();
            (Verdict::ok(inventory.to_string()), details)
        }
        Err(e) => (e.into_verdict(), None),
    }
}

pub fn collect(transport: &mut dyn Transport) -> Result<Inventory, CheckError> {
    let system_fields: Vec<Field> = fields_of(Family::System).map(|spec| spec.field).collect();
    let system = get_row(transport, Family::System, &system_fields, 0)?;
    let system_info = system
        .records
        .get(&0)
        .map(SystemInfo::from_record)
        .ok_or_else(|| CheckError::Missing {
            target: transport.target().to_string(),
            what: "system group".to_string(),
        })?;

    let mut inventory = Inventory {
        system_info,
        ..Default::default()
    };

    if let Some(list) = degrade(transport, "interfaces", interfaces::collect) {
        inventory.interfaces = list;
    }

    if let Some(list) = degrade(transport, "IP addresses", |t| {
        let collected = walk_tables(t, Family::IpAddress, &[IP_ADDR_TABLE])?;
        Ok(collected.records.values().map(IpBinding::from_record).collect())
    }) {
        inventory.ip_addresses = list;
    }

    if let Some(list) = degrade(transport, "physical entities", |t| {
        let collected = walk_tables(t, Family::PhysicalEntity, &[ENT_PHYSICAL_TABLE])?;
        Ok(collected.records.values().map(PhysicalEntity::from_record).collect())
    }) {
        inventory.physical_entities = list;
    }

    inventory.cpu = degrade(transport, "CPU", |t| {
        let collected = get_row(t, Family::Ucd, &CPU_FIELDS, 0)?;
        Ok(collected.records.get(&0).and_then(CpuUsage::from_record))
    })
    .flatten();

    inventory.memory = degrade(transport, "memory", |t| {
        let collected = get_row(t, Family::Ucd, &MEMORY_FIELDS, 0)?;
        Ok(collected.records.get(&0).and_then(MemoryUsage::from_record))
    })
    .flatten();

    Ok(inventory)
}

/// Runs one secondary section, logging and discarding its failure.
fn degrade<T, F>(transport: &mut dyn Transport, section: &str, collect: F) -> Option<T>
where
    F: FnOnce(&mut dyn Transport) -> Result<T, CheckError>,
{
    match collect(transport) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Leaving {} out of the inventory: {}", section, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::ScriptedDevice;
    use crate::verdict::State;
    use crate::wire::RawValue;

    fn system() -> Vec<(&'static str, RawValue)> {
        vec![
            ("1.3.6.1.2.1.1.1.0", RawValue::OctetString(b"Linux sw1 5.10".to_vec())),
            ("1.3.6.1.2.1.1.3.0", RawValue::TimeTicks(12_345_600)),
            ("1.3.6.1.2.1.1.5.0", RawValue::OctetString(b"sw1".to_vec())),
            ("1.3.6.1.2.1.1.6.0", RawValue::OctetString(b"rack 4".to_vec())),
        ]
    }

    #[test]
    fn test_full_inventory() {
        let mut device = ScriptedDevice::default()
            .with_snapshot(&system())
            .with_snapshot(&[
                ("1.3.6.1.4.1.2021.11.50.0", RawValue::Counter32(30)),
                ("1.3.6.1.4.1.2021.11.51.0", RawValue::Counter32(0)),
                ("1.3.6.1.4.1.2021.11.52.0", RawValue::Counter32(20)),
                ("1.3.6.1.4.1.2021.11.53.0", RawValue::Counter32(50)),
            ])
            .with_snapshot(&[
                ("1.3.6.1.4.1.2021.4.5.0", RawValue::Integer(8_000_000)),
                ("1.3.6.1.4.1.2021.4.6.0", RawValue::Integer(2_000_000)),
            ])
            .with_table(
                "1.3.6.1.2.1.2.2",
                &[("1.3.6.1.2.1.2.2.1.2.1", RawValue::OctetString(b"lo".to_vec()))],
            )
            .with_table(
                "1.3.6.1.2.1.4.20",
                &[
                    ("1.3.6.1.2.1.4.20.1.1.10.0.0.5", RawValue::IpAddress([10, 0, 0, 5])),
                    ("1.3.6.1.2.1.4.20.1.2.10.0.0.5", RawValue::Integer(1)),
                    ("1.3.6.1.2.1.4.20.1.3.10.0.0.5", RawValue::IpAddress([255, 255, 255, 0])),
                ],
            )
            .with_table(
                "1.3.6.1.2.1.47.1.1.1",
                &[
                    ("1.3.6.1.2.1.47.1.1.1.1.7.1", RawValue::OctetString(b"chassis".to_vec())),
                    ("1.3.6.1.2.1.47.1.1.1.1.11.1", RawValue::OctetString(b"FDO1234".to_vec())),
                ],
            );

        let inventory = collect(&mut device).unwrap();
        assert_eq!(inventory.system_info.name, "sw1");
        assert_eq!(inventory.system_info.uptime_seconds, 123_456.0);
        assert_eq!(inventory.interfaces.len(), 1);
        assert_eq!(inventory.ip_addresses[0].ip_address, "10.0.0.5");
        assert_eq!(inventory.ip_addresses[0].netmask, "255.255.255.0");
        assert_eq!(inventory.physical_entities[0].serial_number, "FDO1234");
        assert_eq!(inventory.cpu.as_ref().unwrap().user_percent, 30.0);
        assert_eq!(inventory.memory.as_ref().unwrap().avail_real_kb, 2_000_000);

        let json = serde_json::to_value(&inventory).unwrap();
        for key in ["system_info", "interfaces", "ip_addresses", "physical_entities", "cpu", "memory"] {
            assert!(json.get(key).is_some(), "{} missing", key);
        }
    }

    #[test]
    fn test_secondary_sections_degrade() {
        let mut device = ScriptedDevice::default().with_snapshot(&system());

        let (verdict, details) = run(&mut device);
        assert_eq!(verdict.state, State::Ok);
        assert!(verdict.message.starts_with("sw1 (Linux sw1 5.10)"));

        let details = details.unwrap();
        assert_eq!(details["system_info"]["location"], "rack 4");
        for key in ["interfaces", "ip_addresses", "physical_entities", "cpu", "memory"] {
            assert!(details.get(key).is_none(), "{} should be omitted", key);
        }
    }

    #[test]
    fn test_system_failure_is_critical() {
        let mut device = ScriptedDevice::default();
        let (verdict, details) = run(&mut device);
        assert_eq!(verdict.state, State::Critical);
        assert!(verdict.message.contains("1.3.6.1.2.1.1.1.0"));
        assert!(details.is_none());
    }
}
