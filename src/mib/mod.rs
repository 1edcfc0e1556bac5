//! Registry of the MIB objects the checks understand.
//!
//! Every column or scalar the collectors touch is listed in [`REGISTRY`] with
//! its semantic [`Field`], the table it belongs to and the value [`Kind`] the
//! device is expected to send. Instance suffixes (row index, `.0` for scalars)
//! are never part of a registry OID.
//!
//! Covered subtrees:
//! - system group `.1.3.6.1.2.1.1`
//! - IF-MIB ifTable `.1.3.6.1.2.1.2.2` and ifXTable `.1.3.6.1.2.1.31.1.1`
//! - IP-MIB ipAddrTable `.1.3.6.1.2.1.4.20`
//! - ENTITY-MIB entPhysicalTable `.1.3.6.1.2.1.47.1.1.1`
//! - BGP4-MIB bgpPeerTable `.1.3.6.1.2.1.15.3`
//! - UCD-SNMP-MIB CPU and memory scalars `.1.3.6.1.4.1.2021`

pub mod decode;

use std::fmt;

use serde::Serialize;

use crate::{oid::Oid, wire::WireType};

pub use decode::{decode, DecodeError, Value};

/// Expected value kind for a registry entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    DisplayString,
    Integer,
    Gauge32,
    Counter32,
    Counter64,
    TimeTicks,
    /// Octet string rendered as `aa:bb:cc:dd:ee:ff`.
    MacAddress,
    /// Exactly four octets rendered as dotted decimal.
    Ipv4Address,
    ObjectId,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::DisplayString => write!(f, "DisplayString"),
            Kind::Integer => write!(f, "{}", WireType::Integer),
            Kind::Gauge32 => write!(f, "{}", WireType::Gauge32),
            Kind::Counter32 => write!(f, "{}", WireType::Counter32),
            Kind::Counter64 => write!(f, "{}", WireType::Counter64),
            Kind::TimeTicks => write!(f, "{}", WireType::TimeTicks),
            Kind::MacAddress => write!(f, "PhysAddress"),
            Kind::Ipv4Address => write!(f, "{}", WireType::IpAddress),
            Kind::ObjectId => write!(f, "{}", WireType::ObjectId),
        }
    }
}

/// Shape of the instance suffix that identifies a row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// One trailing sub-identifier (ifIndex, entPhysicalIndex, `.0`).
    Integer,
    /// Four trailing sub-identifiers forming an IPv4 address.
    Ipv4,
}

/// The table (or scalar group) a registry entry belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    System,
    Interface,
    IpAddress,
    PhysicalEntity,
    BgpPeer,
    Ucd,
}

impl Family {
    pub fn index_kind(self) -> IndexKind {
        match self {
            Family::IpAddress | Family::BgpPeer => IndexKind::Ipv4,
            _ => IndexKind::Integer,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::System => write!(f, "system"),
            Family::Interface => write!(f, "interface"),
            Family::IpAddress => write!(f, "ip-address"),
            Family::PhysicalEntity => write!(f, "physical-entity"),
            Family::BgpPeer => write!(f, "bgp-peer"),
            Family::Ucd => write!(f, "ucd"),
        }
    }
}

// -- Walk roots --

pub const SYSTEM_GROUP: &[u32] = &[1, 3, 6, 1, 2, 1, 1];
pub const IF_TABLE: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2];
pub const IF_X_TABLE: &[u32] = &[1, 3, 6, 1, 2, 1, 31, 1, 1];
pub const IP_ADDR_TABLE: &[u32] = &[1, 3, 6, 1, 2, 1, 4, 20];
pub const ENT_PHYSICAL_TABLE: &[u32] = &[1, 3, 6, 1, 2, 1, 47, 1, 1, 1];
pub const BGP_PEER_TABLE: &[u32] = &[1, 3, 6, 1, 2, 1, 15, 3];

/// Semantic name of a MIB object.
///
/// Variants are declared in the same order as [`REGISTRY`], which lets
/// [`Field::spec`] index the table directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    // system
    SysDescr,
    SysObjectId,
    SysUpTime,
    SysContact,
    SysName,
    SysLocation,
    // ifEntry
    IfIndex,
    IfDescr,
    IfType,
    IfMtu,
    IfSpeed,
    IfPhysAddress,
    IfAdminStatus,
    IfOperStatus,
    IfLastChange,
    IfInOctets,
    IfInUcastPkts,
    IfInNUcastPkts,
    IfInDiscards,
    IfInErrors,
    IfInUnknownProtos,
    IfOutOctets,
    IfOutUcastPkts,
    IfOutNUcastPkts,
    IfOutDiscards,
    IfOutErrors,
    // ifXEntry
    IfName,
    IfInMulticastPkts,
    IfInBroadcastPkts,
    IfOutMulticastPkts,
    IfOutBroadcastPkts,
    IfHcInOctets,
    IfHcInUcastPkts,
    IfHcInMulticastPkts,
    IfHcInBroadcastPkts,
    IfHcOutOctets,
    IfHcOutUcastPkts,
    IfHcOutMulticastPkts,
    IfHcOutBroadcastPkts,
    IfLinkUpDownTrapEnable,
    IfHighSpeed,
    IfPromiscuousMode,
    IfConnectorPresent,
    IfAlias,
    IfCounterDiscontinuityTime,
    // ipAddrEntry
    IpAdEntAddr,
    IpAdEntIfIndex,
    IpAdEntNetMask,
    IpAdEntBcastAddr,
    IpAdEntReasmMaxSize,
    // entPhysicalEntry
    EntPhysicalDescr,
    EntPhysicalVendorType,
    EntPhysicalContainedIn,
    EntPhysicalClass,
    EntPhysicalName,
    EntPhysicalHardwareRev,
    EntPhysicalFirmwareRev,
    EntPhysicalSoftwareRev,
    EntPhysicalSerialNum,
    EntPhysicalMfgName,
    EntPhysicalModelName,
    // bgpPeerEntry
    BgpPeerIdentifier,
    BgpPeerState,
    BgpPeerAdminStatus,
    BgpPeerNegotiatedVersion,
    BgpPeerLocalAddr,
    BgpPeerRemoteAddr,
    BgpPeerRemoteAs,
    BgpPeerInUpdates,
    BgpPeerOutUpdates,
    BgpPeerFsmEstablishedTime,
    // UCD-SNMP-MIB
    SsCpuRawUser,
    SsCpuRawNice,
    SsCpuRawSystem,
    SsCpuRawIdle,
    MemTotalSwap,
    MemAvailSwap,
    MemTotalReal,
    MemAvailReal,
}

impl Field {
    /// Returns the registry entry for this field.
    pub fn spec(self) -> &'static OidSpec {
        &REGISTRY[self as usize]
    }

    /// Returns the column (or scalar object) OID without instance suffix.
    pub fn column(self) -> Oid {
        Oid::from_slice(self.spec().oid)
    }

    /// Returns the OID of one instance of this object.
    pub fn instance(self, index: u32) -> Oid {
        self.column().child(index)
    }

    /// MIB descriptor, e.g. `ifHCInOctets`.
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One known MIB leaf.
#[derive(Debug, PartialEq, Eq)]
pub struct OidSpec {
    pub oid: &'static [u32],
    pub name: &'static str,
    pub field: Field,
    pub family: Family,
    pub kind: Kind,
}

impl OidSpec {
    const fn new(
        oid: &'static [u32],
        name: &'static str,
        field: Field,
        family: Family,
        kind: Kind,
    ) -> Self {
        OidSpec {
            oid,
            name,
            field,
            family,
            kind,
        }
    }
}

use Family::*;
use Kind::*;

/// All known MIB objects, in [`Field`] declaration order.
pub static REGISTRY: &[OidSpec] = &[
    // -- system (.1.3.6.1.2.1.1.*) --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 1], "sysDescr", Field::SysDescr, System, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 2], "sysObjectID", Field::SysObjectId, System, ObjectId),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 3], "sysUpTime", Field::SysUpTime, System, TimeTicks),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 4], "sysContact", Field::SysContact, System, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 5], "sysName", Field::SysName, System, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 1, 6], "sysLocation", Field::SysLocation, System, DisplayString),
    // -- ifEntry (.1.3.6.1.2.1.2.2.1.*) --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 1], "ifIndex", Field::IfIndex, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2], "ifDescr", Field::IfDescr, Interface, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 3], "ifType", Field::IfType, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 4], "ifMtu", Field::IfMtu, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 5], "ifSpeed", Field::IfSpeed, Interface, Gauge32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 6], "ifPhysAddress", Field::IfPhysAddress, Interface, MacAddress),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 7], "ifAdminStatus", Field::IfAdminStatus, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 8], "ifOperStatus", Field::IfOperStatus, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 9], "ifLastChange", Field::IfLastChange, Interface, TimeTicks),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10], "ifInOctets", Field::IfInOctets, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 11], "ifInUcastPkts", Field::IfInUcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 12], "ifInNUcastPkts", Field::IfInNUcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 13], "ifInDiscards", Field::IfInDiscards, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 14], "ifInErrors", Field::IfInErrors, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 15], "ifInUnknownProtos", Field::IfInUnknownProtos, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 16], "ifOutOctets", Field::IfOutOctets, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 17], "ifOutUcastPkts", Field::IfOutUcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 18], "ifOutNUcastPkts", Field::IfOutNUcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 19], "ifOutDiscards", Field::IfOutDiscards, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 20], "ifOutErrors", Field::IfOutErrors, Interface, Counter32),
    // -- ifXEntry (.1.3.6.1.2.1.31.1.1.1.*) --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 1], "ifName", Field::IfName, Interface, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 2], "ifInMulticastPkts", Field::IfInMulticastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 3], "ifInBroadcastPkts", Field::IfInBroadcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 4], "ifOutMulticastPkts", Field::IfOutMulticastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 5], "ifOutBroadcastPkts", Field::IfOutBroadcastPkts, Interface, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 6], "ifHCInOctets", Field::IfHcInOctets, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 7], "ifHCInUcastPkts", Field::IfHcInUcastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 8], "ifHCInMulticastPkts", Field::IfHcInMulticastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 9], "ifHCInBroadcastPkts", Field::IfHcInBroadcastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 10], "ifHCOutOctets", Field::IfHcOutOctets, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 11], "ifHCOutUcastPkts", Field::IfHcOutUcastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 12], "ifHCOutMulticastPkts", Field::IfHcOutMulticastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 13], "ifHCOutBroadcastPkts", Field::IfHcOutBroadcastPkts, Interface, Counter64),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 14], "ifLinkUpDownTrapEnable", Field::IfLinkUpDownTrapEnable, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 15], "ifHighSpeed", Field::IfHighSpeed, Interface, Gauge32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 16], "ifPromiscuousMode", Field::IfPromiscuousMode, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 17], "ifConnectorPresent", Field::IfConnectorPresent, Interface, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 18], "ifAlias", Field::IfAlias, Interface, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 31, 1, 1, 1, 19], "ifCounterDiscontinuityTime", Field::IfCounterDiscontinuityTime, Interface, TimeTicks),
    // -- ipAddrEntry (.1.3.6.1.2.1.4.20.1.*), indexed by address --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 4, 20, 1, 1], "ipAdEntAddr", Field::IpAdEntAddr, IpAddress, Ipv4Address),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 4, 20, 1, 2], "ipAdEntIfIndex", Field::IpAdEntIfIndex, IpAddress, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 4, 20, 1, 3], "ipAdEntNetMask", Field::IpAdEntNetMask, IpAddress, Ipv4Address),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 4, 20, 1, 4], "ipAdEntBcastAddr", Field::IpAdEntBcastAddr, IpAddress, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 4, 20, 1, 5], "ipAdEntReasmMaxSize", Field::IpAdEntReasmMaxSize, IpAddress, Integer),
    // -- entPhysicalEntry (.1.3.6.1.2.1.47.1.1.1.1.*) --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 2], "entPhysicalDescr", Field::EntPhysicalDescr, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 3], "entPhysicalVendorType", Field::EntPhysicalVendorType, PhysicalEntity, ObjectId),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 4], "entPhysicalContainedIn", Field::EntPhysicalContainedIn, PhysicalEntity, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 5], "entPhysicalClass", Field::EntPhysicalClass, PhysicalEntity, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 7], "entPhysicalName", Field::EntPhysicalName, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 8], "entPhysicalHardwareRev", Field::EntPhysicalHardwareRev, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 9], "entPhysicalFirmwareRev", Field::EntPhysicalFirmwareRev, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 10], "entPhysicalSoftwareRev", Field::EntPhysicalSoftwareRev, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 11], "entPhysicalSerialNum", Field::EntPhysicalSerialNum, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 12], "entPhysicalMfgName", Field::EntPhysicalMfgName, PhysicalEntity, DisplayString),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 47, 1, 1, 1, 1, 13], "entPhysicalModelName", Field::EntPhysicalModelName, PhysicalEntity, DisplayString),
    // -- bgpPeerEntry (.1.3.6.1.2.1.15.3.1.*), indexed by remote address --
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 1], "bgpPeerIdentifier", Field::BgpPeerIdentifier, BgpPeer, Ipv4Address),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 2], "bgpPeerState", Field::BgpPeerState, BgpPeer, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 3], "bgpPeerAdminStatus", Field::BgpPeerAdminStatus, BgpPeer, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 4], "bgpPeerNegotiatedVersion", Field::BgpPeerNegotiatedVersion, BgpPeer, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 5], "bgpPeerLocalAddr", Field::BgpPeerLocalAddr, BgpPeer, Ipv4Address),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 7], "bgpPeerRemoteAddr", Field::BgpPeerRemoteAddr, BgpPeer, Ipv4Address),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 9], "bgpPeerRemoteAs", Field::BgpPeerRemoteAs, BgpPeer, Integer),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 10], "bgpPeerInUpdates", Field::BgpPeerInUpdates, BgpPeer, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 11], "bgpPeerOutUpdates", Field::BgpPeerOutUpdates, BgpPeer, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 2, 1, 15, 3, 1, 16], "bgpPeerFsmEstablishedTime", Field::BgpPeerFsmEstablishedTime, BgpPeer, Gauge32),
    // -- UCD-SNMP-MIB (.1.3.6.1.4.1.2021.*) --
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 11, 50], "ssCpuRawUser", Field::SsCpuRawUser, Ucd, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 11, 51], "ssCpuRawNice", Field::SsCpuRawNice, Ucd, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 11, 52], "ssCpuRawSystem", Field::SsCpuRawSystem, Ucd, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 11, 53], "ssCpuRawIdle", Field::SsCpuRawIdle, Ucd, Counter32),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 4, 3], "memTotalSwap", Field::MemTotalSwap, Ucd, Integer),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 4, 4], "memAvailSwap", Field::MemAvailSwap, Ucd, Integer),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 4, 5], "memTotalReal", Field::MemTotalReal, Ucd, Integer),
    OidSpec::new(&[1, 3, 6, 1, 4, 1, 2021, 4, 6], "memAvailReal", Field::MemAvailReal, Ucd, Integer),
];

/// Looks up the registry entry for a column OID (no instance suffix).
pub fn lookup(column: &Oid) -> Option<&'static OidSpec> {
    REGISTRY.iter().find(|spec| spec.oid == column.0.as_slice())
}

/// Returns every registry entry of one family, in registry order.
pub fn fields_of(family: Family) -> impl Iterator<Item = &'static OidSpec> {
    REGISTRY.iter().filter(move |spec| spec.family == family)
}
