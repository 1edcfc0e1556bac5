//! Interface bandwidth from two counter samples.
//!
//! The check moves through a fixed sequence of phases:
//!
//! ```text
//! Start -> CollectingFirst -> Waiting -> CollectingSecond -> Evaluating -> Terminal
//! ```
//!
//! A failed collection jumps straight to `Terminal`. The wait is a plain
//! blocking sleep on the supplied clock.

use crate::{
    configuration::InterfaceUsageArgs,
    mib::{Family, Field},
    rate::{compute_rate, CounterRate, RateReport, Sample, OCTET_COUNTERS},
    threshold::{evaluate, Direction, Metric},
    time::Clock,
    transport::Transport,
    verdict::{PerfSample, Verdict},
};

use super::{get_row, CheckError};

/// Columns fetched for each sample.
const SAMPLE_FIELDS: [Field; 7] = [
    Field::IfDescr,
    Field::IfSpeed,
    Field::IfHighSpeed,
    Field::IfInOctets,
    Field::IfOutOctets,
    Field::IfHcInOctets,
    Field::IfHcOutOctets,
];

#[derive(Debug)]
enum Phase {
    Start,
    CollectingFirst,
    Waiting(Sample),
    CollectingSecond(Sample),
    Evaluating(Sample, Sample),
    Terminal(Verdict),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::CollectingFirst => "collecting first sample",
            Phase::Waiting(_) => "waiting",
            Phase::CollectingSecond(_) => "collecting second sample",
            Phase::Evaluating(..) => "evaluating",
            Phase::Terminal(_) => "terminal",
        }
    }
}

pub fn run(transport: &mut dyn Transport, clock: &dyn Clock, args: &InterfaceUsageArgs) -> Verdict {
    let mut phase = Phase::Start;

    loop {
        phase = match phase {
            Phase::Start => Phase::CollectingFirst,
            Phase::CollectingFirst => match collect_sample(transport, clock, args.index) {
                Ok(first) => Phase::Waiting(first),
                Err(e) => Phase::Terminal(e.into_verdict()),
            },
            Phase::Waiting(first) => {
                clock.sleep(args.delay());
                Phase::CollectingSecond(first)
            }
            Phase::CollectingSecond(first) => match collect_sample(transport, clock, args.index) {
                Ok(second) => Phase::Evaluating(first, second),
                Err(e) => Phase::Terminal(e.into_verdict()),
            },
            Phase::Evaluating(first, second) => Phase::Terminal(
                match compute_rate(&first, &second) {
                    Ok(report) => judge(&report, args),
                    Err(e) => CheckError::from(e).into_verdict(),
                },
            ),
            Phase::Terminal(verdict) => return verdict,
        };
        log::debug!("interface {}: {}", args.index, phase.name());
    }
}

/// Takes one reading of the interface's counters.
fn collect_sample(
    transport: &mut dyn Transport,
    clock: &dyn Clock,
    index: u32,
) -> Result<Sample, CheckError> {
    let timestamp = clock.now();
    let mut collected = get_row(transport, Family::Interface, &SAMPLE_FIELDS, index)?;

    let missing = || CheckError::Missing {
        target: transport.target().to_string(),
        what: format!("octet counters for interface {}", index),
    };

    let record = collected.records.remove(&index).ok_or_else(missing)?;
    let sample = Sample::from_record(&record, timestamp, collected.latency);
    if sample.counters.is_empty() {
        return Err(missing());
    }

    Ok(sample)
}

/// Turns a rate report into the final verdict.
fn judge(report: &RateReport, args: &InterfaceUsageArgs) -> Verdict {
    let mut metrics = Vec::new();
    let mut resets = Vec::new();

    for field in OCTET_COUNTERS {
        let (label, perf_name, direction) = match field {
            Field::IfInOctets => ("In", "in", Direction::In),
            Field::IfOutOctets => ("Out", "out", Direction::Out),
            Field::IfHcInOctets => ("HCIn", "hc_in", Direction::In),
            _ => ("HCOut", "hc_out", Direction::Out),
        };

        match report.rate(field) {
            Some(CounterRate::Rate(rate)) => metrics.push(Metric::new(
                label,
                perf_name,
                direction,
                *rate,
                report.speed_bps,
            )),
            Some(CounterRate::Reset { first, second }) => {
                resets.push(format!("{} counter reset ({} -> {})", field, first, second))
            }
            None => {}
        }
    }

    let entity = if report.name.is_empty() {
        format!("interface {}", report.index)
    } else {
        report.name.clone()
    };

    let mut verdict = evaluate(&entity, &metrics, &args.thresholds(), args.perf_data);
    if !resets.is_empty() {
        verdict.message.push_str(&format!(" ({})", resets.join(", ")));
    }
    if args.perf_data {
        verdict.perf.insert(
            0,
            PerfSample::new("snmp_latency", report.latency.as_secs_f64(), "s"),
        );
    }

    verdict
}
