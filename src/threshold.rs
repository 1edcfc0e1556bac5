//! Threshold evaluation of interface rates.
//!
//! Conditions are checked in a fixed order: inbound critical, inbound
//! warning, outbound critical, outbound warning. The first condition that
//! matches sets the state and the direction cited in the message, and the
//! rest are not looked at. An inbound warning therefore hides an outbound
//! critical.

use serde::Serialize;

use crate::{
    rate::RateResult,
    verdict::{PerfSample, State, Verdict},
};

/// Warning and critical boundaries in bits per second. Zero disables a bound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Threshold {
    pub warn: u64,
    pub crit: u64,
}

impl Threshold {
    pub fn new(warn: u64, crit: u64) -> Self {
        Threshold { warn, crit }
    }

    fn bound(value: u64) -> Option<f64> {
        (value > 0).then_some(value as f64)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub inbound: Threshold,
    pub outbound: Threshold,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    In,
    Out,
}

/// One evaluated rate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metric {
    /// Label in the message, e.g. `HCIn`.
    pub label: String,
    /// Performance data label, e.g. `hc_in`.
    pub perf_name: String,
    pub direction: Direction,
    pub rate: RateResult,
    /// Link capacity in bits per second, reported as the perf maximum only.
    pub max: Option<u64>,
}

impl Metric {
    pub fn new(
        label: impl Into<String>,
        perf_name: impl Into<String>,
        direction: Direction,
        rate: RateResult,
        max: Option<u64>,
    ) -> Self {
        Metric {
            label: label.into(),
            perf_name: perf_name.into(),
            direction,
            rate,
            max,
        }
    }
}

/// Evaluates `metrics` of `entity` against `thresholds`.
///
/// The message lists every metric with its scaled value whatever the outcome.
/// Perf samples, when requested, follow metric order.
pub fn evaluate(
    entity: &str,
    metrics: &[Metric],
    thresholds: &Thresholds,
    with_perf: bool,
) -> Verdict {
    let exceeds = |direction: Direction, boundary: u64| {
        boundary > 0
            && metrics
                .iter()
                .filter(|m| m.direction == direction)
                .any(|m| m.rate.bits_per_second > boundary as f64)
    };

    let conditions = [
        (Direction::In, thresholds.inbound.crit, State::Critical),
        (Direction::In, thresholds.inbound.warn, State::Warning),
        (Direction::Out, thresholds.outbound.crit, State::Critical),
        (Direction::Out, thresholds.outbound.warn, State::Warning),
    ];

    let (state, cited) = conditions
        .into_iter()
        .find(|(direction, boundary, _)| exceeds(*direction, *boundary))
        .map_or((State::Ok, None), |(direction, _, level)| (level, Some(direction)));

    let prefix = match cited {
        Some(Direction::In) => "Inbound exceeds threshold ",
        Some(Direction::Out) => "Outbound exceeds threshold ",
        None => "",
    };

    let values: Vec<String> = metrics
        .iter()
        .map(|m| format!("{}: {}", m.label, m.rate.scaled))
        .collect();
    let message = if values.is_empty() {
        format!("{}{}", prefix, entity)
    } else {
        format!("{}{} - {}", prefix, entity, values.join(" "))
    };

    let mut verdict = Verdict::new(state, message);
    if with_perf {
        for m in metrics {
            let threshold = match m.direction {
                Direction::In => thresholds.inbound,
                Direction::Out => thresholds.outbound,
            };
            verdict.perf.push(
                PerfSample::new(m.perf_name.as_str(), m.rate.bits_per_second, "bps")
                    .with_thresholds(
                        Threshold::bound(threshold.warn),
                        Threshold::bound(threshold.crit),
                    )
                    .with_bounds(Some(0.0), m.max.map(|v| v as f64)),
            );
        }
    }

    log::debug!("{} evaluated to {}", entity, state);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::Scaled;

    fn rate(bps: f64) -> RateResult {
        RateResult {
            per_second: bps / 8.0,
            bits_per_second: bps,
            scaled: Scaled::from_bps(bps as u64),
        }
    }

    fn metrics(in_bps: f64, out_bps: f64) -> Vec<Metric> {
        vec![
            Metric::new("In", "in", Direction::In, rate(in_bps), Some(1_000_000_000)),
            Metric::new("Out", "out", Direction::Out, rate(out_bps), Some(1_000_000_000)),
        ]
    }

    fn thresholds(warn_in: u64, crit_in: u64, warn_out: u64, crit_out: u64) -> Thresholds {
        Thresholds {
            inbound: Threshold::new(warn_in, crit_in),
            outbound: Threshold::new(warn_out, crit_out),
        }
    }

    #[test]
    fn test_no_thresholds_is_ok() {
        let v = evaluate("eth0", &metrics(8000.0, 0.0), &Thresholds::default(), false);
        assert_eq!(v.state, State::Ok);
        assert_eq!(v.message, "eth0 - In: 8 Kbps Out: 0 bps");
        assert!(v.perf.is_empty());
    }

    #[test]
    fn test_inbound_critical_beats_outbound_warning() {
        let v = evaluate(
            "eth0",
            &metrics(20_000.0, 6_000.0),
            &thresholds(5_000, 10_000, 5_000, 0),
            false,
        );
        assert_eq!(v.state, State::Critical);
        assert!(v.message.starts_with("Inbound exceeds threshold eth0 - "));
    }

    #[test]
    fn test_inbound_warning() {
        let v = evaluate(
            "eth0",
            &metrics(6_000.0, 0.0),
            &thresholds(5_000, 10_000, 5_000, 10_000),
            false,
        );
        assert_eq!(v.state, State::Warning);
        assert!(v.message.starts_with("Inbound exceeds threshold "));
    }

    #[test]
    fn test_inbound_warning_wins_over_outbound_critical() {
        let v = evaluate(
            "eth0",
            &metrics(6_000.0, 20_000.0),
            &thresholds(5_000, 10_000, 5_000, 10_000),
            false,
        );
        assert_eq!(v.state, State::Warning);
        assert!(v.message.starts_with("Inbound exceeds threshold eth0 - "));
    }

    #[test]
    fn test_outbound_critical_without_inbound_match() {
        let v = evaluate(
            "eth0",
            &metrics(4_000.0, 20_000.0),
            &thresholds(5_000, 10_000, 5_000, 10_000),
            false,
        );
        assert_eq!(v.state, State::Critical);
        assert!(v.message.starts_with("Outbound exceeds threshold "));
    }

    #[test]
    fn test_outbound_warning() {
        let v = evaluate(
            "eth0",
            &metrics(0.0, 7_000.0),
            &thresholds(0, 0, 5_000, 10_000),
            false,
        );
        assert_eq!(v.state, State::Warning);
        assert!(v.message.starts_with("Outbound exceeds threshold eth0"));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let v = evaluate(
            "eth0",
            &metrics(5_000.0, 0.0),
            &thresholds(5_000, 0, 0, 0),
            false,
        );
        assert_eq!(v.state, State::Ok);
    }

    #[test]
    fn test_zero_boundary_skipped() {
        let v = evaluate(
            "eth0",
            &metrics(1e12, 1e12),
            &thresholds(0, 0, 0, 0),
            false,
        );
        assert_eq!(v.state, State::Ok);
        assert!(v.message.contains("In: 1000 Gbps"));
    }

    #[test]
    fn test_perf_samples_in_metric_order() {
        let v = evaluate(
            "eth0",
            &metrics(8000.0, 0.0),
            &thresholds(5_000, 10_000, 0, 0),
            true,
        );
        assert_eq!(v.perf.len(), 2);
        assert_eq!(
            v.perf[0].to_string(),
            "'in'=8000bps;5000;10000;0;1000000000"
        );
        assert_eq!(v.perf[1].to_string(), "'out'=0bps;;;0;1000000000");
    }

    #[test]
    fn test_no_metrics() {
        let v = evaluate("eth9", &[], &thresholds(1, 2, 3, 4), true);
        assert_eq!(v.state, State::Ok);
        assert_eq!(v.message, "eth9");
    }
}
