//! The health checks.
//!
//! Each check drives a [`Transport`] through its collection steps and turns
//! the outcome into a [`Verdict`]. Errors are carried as [`CheckError`] up to
//! the check boundary and converted there; nothing below this module decides
//! a state.

pub mod bgp_peers;
pub mod interface_usage;
pub mod interfaces;
pub mod inventory;
pub mod sysdescr;

use std::{collections::BTreeMap, time::Duration};

use thiserror::Error;

use crate::{
    assembler::{self, AssembleError, EntityRecord},
    configuration::Check,
    mib::{Family, Field},
    oid::Oid,
    rate::RateError,
    report::Report,
    time::Clock,
    transport::{Transport, TransportError},
    verdict::{State, Verdict},
};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("SNMP target {target} returned malformed data: {source}")]
    Assemble {
        target: String,
        source: AssembleError,
    },
    #[error("SNMP target {target} returned no {what}")]
    Missing { target: String, what: String },
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl CheckError {
    pub fn state(&self) -> State {
        match self {
            CheckError::Rate(RateError::ZeroPeriod(_)) => State::Unknown,
            _ => State::Critical,
        }
    }

    pub fn into_verdict(self) -> Verdict {
        log::error!("{}", self);
        Verdict::new(self.state(), self.to_string())
    }
}

/// Records assembled from one collection step, with the time it took.
pub(crate) struct Collected {
    pub records: BTreeMap<u32, EntityRecord>,
    pub latency: Duration,
}

/// GETs `fields` at row `index` and assembles the answer.
pub(crate) fn get_row(
    transport: &mut dyn Transport,
    family: Family,
    fields: &[Field],
    index: u32,
) -> Result<Collected, CheckError> {
    let oids: Vec<Oid> = fields.iter().map(|f| f.instance(index)).collect();
    let response = transport.get(&oids)?;
    let records = assemble(transport.target(), family, &response.values)?;
    Ok(Collected {
        records,
        latency: response.latency,
    })
}

/// Walks every table root in `bases` and assembles the union.
pub(crate) fn walk_tables(
    transport: &mut dyn Transport,
    family: Family,
    bases: &[&[u32]],
) -> Result<Collected, CheckError> {
    let mut values = BTreeMap::new();
    let mut latency = Duration::ZERO;
    for base in bases {
        let response = transport.walk(&Oid::from_slice(base))?;
        values.extend(response.values);
        latency += response.latency;
    }
    let records = assemble(transport.target(), family, &values)?;
    Ok(Collected { records, latency })
}

fn assemble(
    target: &str,
    family: Family,
    values: &BTreeMap<String, crate::wire::RawValue>,
) -> Result<BTreeMap<u32, EntityRecord>, CheckError> {
    assembler::assemble(family, values).map_err(|source| CheckError::Assemble {
        target: target.to_string(),
        source,
    })
}

/// Runs `check` against the device behind `transport`.
pub fn run(check: &Check, transport: &mut dyn Transport, clock: &dyn Clock) -> Report {
    let target = transport.target().to_string();
    log::debug!("Running {} against {}", check.name(), target);

    let (verdict, details) = match check {
        Check::InterfaceUsage(args) => (interface_usage::run(transport, clock, args), None),
        Check::Interfaces => interfaces::run(transport),
        Check::Sysdescr(args) => (sysdescr::run(transport, args), None),
        Check::BgpPeers(args) => bgp_peers::run(transport, args),
        Check::Inventory => inventory::run(transport),
    };

    let report = Report::new(target, check.name(), verdict);
    match details {
        Some(details) => report.with_details(details),
        None => report,
    }
}
