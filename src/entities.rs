//! Typed views over assembled records.
//!
//! Each view reads the fields it needs from an [`EntityRecord`] and falls back
//! to zero or an empty string when the device did not supply a column.

use std::fmt;

use serde::Serialize;

use crate::{assembler::EntityRecord, mib::Field};

/// bgpPeerState value for a fully established session.
pub const BGP_STATE_ESTABLISHED: i64 = 6;
/// bgpPeerAdminStatus value for an administratively started peer.
pub const BGP_ADMIN_START: i64 = 2;

/// Picks the usable link speed in bits per second.
///
/// ifSpeed saturates at `u32::MAX` for links faster than ~4.3 Gbps; ifHighSpeed
/// (in Mbps) takes over in that case or when ifSpeed is absent.
pub fn link_speed_bps(if_speed: Option<u64>, high_speed_mbps: Option<u64>) -> Option<u64> {
    match (if_speed, high_speed_mbps) {
        (Some(speed), Some(high)) if speed >= u32::MAX as u64 && high > 0 => {
            Some(high.saturating_mul(1_000_000))
        }
        (Some(speed), _) => Some(speed),
        (None, Some(high)) if high > 0 => Some(high.saturating_mul(1_000_000)),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceDetail {
    pub index: u32,
    pub description: String,
    pub name: String,
    pub alias: String,
    #[serde(rename = "type")]
    pub if_type: i64,
    pub mtu: i64,
    pub speed_bps: u64,
    pub high_speed_mbps: u64,
    pub mac_address: String,
    pub admin_status: i64,
    pub oper_status: i64,
    pub last_change: u64,
    pub in_octets: u64,
    pub out_octets: u64,
    pub hc_in_octets: u64,
    pub hc_out_octets: u64,
    pub in_ucast_pkts: u64,
    pub out_ucast_pkts: u64,
    pub in_errors: u64,
    pub out_errors: u64,
    pub in_discards: u64,
    pub out_discards: u64,
}

impl InterfaceDetail {
    pub fn from_record(record: &EntityRecord) -> Self {
        let num = |field| record.number(field).unwrap_or(0);
        let int = |field| record.integer(field).unwrap_or(0);

        InterfaceDetail {
            index: record.index,
            description: record.text(Field::IfDescr),
            name: record.text(Field::IfName),
            alias: record.text(Field::IfAlias),
            if_type: int(Field::IfType),
            mtu: int(Field::IfMtu),
            speed_bps: link_speed_bps(
                record.number(Field::IfSpeed),
                record.number(Field::IfHighSpeed),
            )
            .unwrap_or(0),
            high_speed_mbps: num(Field::IfHighSpeed),
            mac_address: record.text(Field::IfPhysAddress),
            admin_status: int(Field::IfAdminStatus),
            oper_status: int(Field::IfOperStatus),
            last_change: num(Field::IfLastChange),
            in_octets: num(Field::IfInOctets),
            out_octets: num(Field::IfOutOctets),
            hc_in_octets: num(Field::IfHcInOctets),
            hc_out_octets: num(Field::IfHcOutOctets),
            in_ucast_pkts: num(Field::IfInUcastPkts),
            out_ucast_pkts: num(Field::IfOutUcastPkts),
            in_errors: num(Field::IfInErrors),
            out_errors: num(Field::IfOutErrors),
            in_discards: num(Field::IfInDiscards),
            out_discards: num(Field::IfOutDiscards),
        }
    }
}

impl fmt::Display for InterfaceDetail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Interface index: {}", self.index)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Alias: {}", self.alias)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.if_type)?;
        writeln!(f, "MTU: {}", self.mtu)?;
        writeln!(f, "Speed: {}", self.speed_bps)?;
        writeln!(f, "HighSpeed: {}", self.high_speed_mbps)?;
        writeln!(f, "OperStatus: {}", self.oper_status)?;
        writeln!(f, "AdminStatus: {}", self.admin_status)?;
        writeln!(f, "InOctets: {}", self.in_octets)?;
        writeln!(f, "OutOctets: {}", self.out_octets)?;
        writeln!(f, "HCInOctets: {}", self.hc_in_octets)?;
        writeln!(f, "HCOutOctets: {}", self.hc_out_octets)?;
        writeln!(f, "InUcastPkts: {}", self.in_ucast_pkts)?;
        writeln!(f, "OutUcastPkts: {}", self.out_ucast_pkts)?;
        writeln!(f, "InErrors: {}", self.in_errors)?;
        writeln!(f, "OutErrors: {}", self.out_errors)?;
        writeln!(f, "InDiscards: {}", self.in_discards)?;
        writeln!(f, "OutDiscards: {}", self.out_discards)?;
        writeln!(f, "LastChange: {}", self.last_change)?;
        write!(f, "PhysAddress: {}", self.mac_address)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IpBinding {
    pub ip_address: String,
    pub netmask: String,
    pub interface_index: i64,
}

impl IpBinding {
    pub fn from_record(record: &EntityRecord) -> Self {
        let ip_address = match record.text(Field::IpAdEntAddr) {
            addr if addr.is_empty() => record.index_addr().to_string(),
            addr => addr,
        };

        IpBinding {
            ip_address,
            netmask: record.text(Field::IpAdEntNetMask),
            interface_index: record.integer(Field::IpAdEntIfIndex).unwrap_or(0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PhysicalEntity {
    pub index: u32,
    pub description: String,
    pub name: String,
    pub class: i64,
    pub vendor: String,
    pub model_name: String,
    pub serial_number: String,
    pub hardware_rev: String,
    pub firmware_rev: String,
    pub software_rev: String,
}

impl PhysicalEntity {
    pub fn from_record(record: &EntityRecord) -> Self {
        PhysicalEntity {
            index: record.index,
            description: record.text(Field::EntPhysicalDescr),
            name: record.text(Field::EntPhysicalName),
            class: record.integer(Field::EntPhysicalClass).unwrap_or(0),
            vendor: record.text(Field::EntPhysicalMfgName),
            model_name: record.text(Field::EntPhysicalModelName),
            serial_number: record.text(Field::EntPhysicalSerialNum),
            hardware_rev: record.text(Field::EntPhysicalHardwareRev),
            firmware_rev: record.text(Field::EntPhysicalFirmwareRev),
            software_rev: record.text(Field::EntPhysicalSoftwareRev),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BgpPeer {
    pub remote_addr: String,
    pub identifier: String,
    pub state: i64,
    pub admin_status: i64,
    pub remote_as: i64,
    pub established_time: u64,
}

impl BgpPeer {
    pub fn from_record(record: &EntityRecord) -> Self {
        let remote_addr = match record.text(Field::BgpPeerRemoteAddr) {
            addr if addr.is_empty() => record.index_addr().to_string(),
            addr => addr,
        };

        BgpPeer {
            remote_addr,
            identifier: record.text(Field::BgpPeerIdentifier),
            state: record.integer(Field::BgpPeerState).unwrap_or(0),
            admin_status: record.integer(Field::BgpPeerAdminStatus).unwrap_or(0),
            remote_as: record.integer(Field::BgpPeerRemoteAs).unwrap_or(0),
            established_time: record.number(Field::BgpPeerFsmEstablishedTime).unwrap_or(0),
        }
    }

    /// True when the peer is administratively started but not established.
    pub fn is_mismatched(&self) -> bool {
        self.admin_status == BGP_ADMIN_START && self.state != BGP_STATE_ESTABLISHED
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            1 => "idle",
            2 => "connect",
            3 => "active",
            4 => "opensent",
            5 => "openconfirm",
            6 => "established",
            _ => "unknown",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SystemInfo {
    pub description: String,
    pub object_id: String,
    pub uptime_seconds: f64,
    pub contact: String,
    pub name: String,
    pub location: String,
}

impl SystemInfo {
    pub fn from_record(record: &EntityRecord) -> Self {
        SystemInfo {
            description: record.text(Field::SysDescr),
            object_id: record.text(Field::SysObjectId),
            // TimeTicks are hundredths of a second
            uptime_seconds: record.number(Field::SysUpTime).unwrap_or(0) as f64 / 100.0,
            contact: record.text(Field::SysContact),
            name: record.text(Field::SysName),
            location: record.text(Field::SysLocation),
        }
    }
}

/// CPU time shares derived from UCD raw tick counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CpuUsage {
    pub user_percent: f64,
    pub nice_percent: f64,
    pub system_percent: f64,
    pub idle_percent: f64,
}

impl CpuUsage {
    /// Returns `None` when the device reports no ticks at all.
    pub fn from_record(record: &EntityRecord) -> Option<Self> {
        let ticks = |field| record.number(field).unwrap_or(0) as f64;
        let user = ticks(Field::SsCpuRawUser);
        let nice = ticks(Field::SsCpuRawNice);
        let system = ticks(Field::SsCpuRawSystem);
        let idle = ticks(Field::SsCpuRawIdle);

        let total = user + nice + system + idle;
        if total <= 0.0 {
            return None;
        }

        Some(CpuUsage {
            user_percent: user / total * 100.0,
            nice_percent: nice / total * 100.0,
            system_percent: system / total * 100.0,
            idle_percent: idle / total * 100.0,
        })
    }
}

/// Memory figures in kB, as UCD reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    pub total_swap_kb: i64,
    pub avail_swap_kb: i64,
    pub total_real_kb: i64,
    pub avail_real_kb: i64,
}

impl MemoryUsage {
    /// Returns `None` when neither swap nor real memory totals are known.
    pub fn from_record(record: &EntityRecord) -> Option<Self> {
        let kb = |field| record.integer(field).unwrap_or(0);
        let usage = MemoryUsage {
            total_swap_kb: kb(Field::MemTotalSwap),
            avail_swap_kb: kb(Field::MemAvailSwap),
            total_real_kb: kb(Field::MemTotalReal),
            avail_real_kb: kb(Field::MemAvailReal),
        };

        if usage.total_swap_kb > 0 || usage.total_real_kb > 0 {
            Some(usage)
        } else {
            None
        }
    }
}
