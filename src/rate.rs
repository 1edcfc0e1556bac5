//! Rates from two samples of monotonic counters.
//!
//! A [`Sample`] is one timestamped reading of an interface's octet counters.
//! [`compute_rate`] correlates two readings of the same interface into per
//! second deltas, handling 32-bit wrap and flagging 64-bit resets, and scales
//! the result to a human unit.

use std::{collections::BTreeMap, fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::{
    assembler::EntityRecord,
    entities::link_speed_bps,
    mib::{Field, Value},
    time::seconds_between,
};

/// Octet counters sampled by the usage check, in report order.
pub const OCTET_COUNTERS: [Field; 4] = [
    Field::IfInOctets,
    Field::IfOutOctets,
    Field::IfHcInOctets,
    Field::IfHcOutOctets,
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("Samples are not separated in time ({0} s)")]
    ZeroPeriod(f64),
    #[error("Samples belong to different interfaces ({first} and {second})")]
    IndexMismatch { first: u32, second: u32 },
    #[error("Samples carry different counters: {0}")]
    FieldMismatch(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CounterValue {
    Counter32(u32),
    Counter64(u64),
}

/// One reading of an interface's octet counters.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub index: u32,
    pub name: String,
    pub counters: BTreeMap<Field, CounterValue>,
    pub speed_bps: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub latency: Duration,
}

impl Sample {
    /// Builds a sample from an assembled interface record.
    ///
    /// Only the octet counters present in the record are kept.
    pub fn from_record(record: &EntityRecord, timestamp: DateTime<Utc>, latency: Duration) -> Self {
        let counters = OCTET_COUNTERS
            .iter()
            .filter_map(|field| {
                let value = match record.get(*field)? {
                    Value::Counter32(v) => CounterValue::Counter32(*v),
                    Value::Counter64(v) => CounterValue::Counter64(*v),
                    _ => return None,
                };
                Some((*field, value))
            })
            .collect();

        Sample {
            index: record.index,
            name: record.text(Field::IfDescr),
            counters,
            speed_bps: link_speed_bps(
                record.number(Field::IfSpeed),
                record.number(Field::IfHighSpeed),
            ),
            timestamp,
            latency,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "bps")]
    Bps,
    #[serde(rename = "Kbps")]
    Kbps,
    #[serde(rename = "Mbps")]
    Mbps,
    #[serde(rename = "Gbps")]
    Gbps,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Unit::Bps => "bps",
            Unit::Kbps => "Kbps",
            Unit::Mbps => "Mbps",
            Unit::Gbps => "Gbps",
        };
        write!(f, "{}", name)
    }
}

/// A bit rate expressed in the largest unit that keeps the value >= 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scaled {
    pub value: u64,
    pub unit: Unit,
}

impl Scaled {
    pub fn from_bps(bps: u64) -> Self {
        const K: u64 = 1_000;
        const M: u64 = 1_000_000;
        const G: u64 = 1_000_000_000;

        match bps {
            b if b >= G => Scaled { value: b / G, unit: Unit::Gbps },
            b if b >= M => Scaled { value: b / M, unit: Unit::Mbps },
            b if b >= K => Scaled { value: b / K, unit: Unit::Kbps },
            b => Scaled { value: b, unit: Unit::Bps },
        }
    }
}

impl fmt::Display for Scaled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RateResult {
    /// Octets per second.
    pub per_second: f64,
    pub bits_per_second: f64,
    pub scaled: Scaled,
}

impl RateResult {
    fn from_delta(delta: u64, period: f64) -> Self {
        let per_second = delta as f64 / period;
        let bits_per_second = per_second * 8.0;
        RateResult {
            per_second,
            bits_per_second,
            scaled: Scaled::from_bps(bits_per_second as u64),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum CounterRate {
    Rate(RateResult),
    /// A 64-bit counter went backwards, so no rate can be derived.
    Reset { first: u64, second: u64 },
}

/// Rates for every counter shared by two samples of one interface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RateReport {
    pub index: u32,
    pub name: String,
    pub period_secs: f64,
    pub speed_bps: Option<u64>,
    /// Mean request latency of the two samples.
    pub latency: Duration,
    pub rates: BTreeMap<Field, CounterRate>,
}

impl RateReport {
    pub fn rate(&self, field: Field) -> Option<&CounterRate> {
        self.rates.get(&field)
    }
}

pub fn compute_rate(first: &Sample, second: &Sample) -> Result<RateReport, RateError> {
    let period = seconds_between(first.timestamp, second.timestamp);
    if period <= 0.0 {
        return Err(RateError::ZeroPeriod(period));
    }

    if first.index != second.index {
        return Err(RateError::IndexMismatch {
            first: first.index,
            second: second.index,
        });
    }

    if !first.counters.keys().eq(second.counters.keys()) {
        let names = |s: &Sample| {
            s.counters
                .keys()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(",")
        };
        return Err(RateError::FieldMismatch(format!(
            "[{}] vs [{}]",
            names(first),
            names(second)
        )));
    }

    let rates = first
        .counters
        .iter()
        .zip(second.counters.values())
        .map(|((field, a), b)| {
            let rate = match (*a, *b) {
                (CounterValue::Counter32(a), CounterValue::Counter32(b)) => {
                    RateResult::from_delta(counter32_delta(a, b), period)
                }
                (CounterValue::Counter64(a), CounterValue::Counter64(b)) if b >= a => {
                    RateResult::from_delta(b - a, period)
                }
                (CounterValue::Counter64(a), CounterValue::Counter64(b)) => {
                    log::warn!("{} on interface {} went from {} to {}", field, first.index, a, b);
                    return Ok((*field, CounterRate::Reset { first: a, second: b }));
                }
                _ => {
                    return Err(RateError::FieldMismatch(format!(
                        "{} changed width between samples",
                        field
                    )))
                }
            };
            Ok((*field, CounterRate::Rate(rate)))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(RateReport {
        index: first.index,
        name: if second.name.is_empty() {
            first.name.clone()
        } else {
            second.name.clone()
        },
        period_secs: period,
        speed_bps: second.speed_bps.or(first.speed_bps),
        latency: (first.latency + second.latency) / 2,
        rates,
    })
}

/// Delta of a 32-bit counter that may have wrapped once.
fn counter32_delta(first: u32, second: u32) -> u64 {
    if second >= first {
        (second - first) as u64
    } else {
        (u32::MAX - first) as u64 + second as u64 + 1
    }
}
