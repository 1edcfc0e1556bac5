//! Check results in the monitoring-plugin format.
//!
//! A [`Verdict`] renders as one plugin line:
//!
//! ```text
//! WARNING: Inbound exceeds threshold eth0 - In: 8 Kbps ... | 'in'=8000bps;5000;10000;0;1000000000
//! ```
//!
//! and maps its state to the conventional exit code.

use std::fmt;

use serde::Serialize;

/// Result state. Ordered by severity, so the worst of several is `max()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum State {
    #[default]
    Ok,
    Warning,
    Unknown,
    Critical,
}

impl State {
    pub fn exit_code(self) -> i32 {
        match self {
            State::Ok => 0,
            State::Warning => 1,
            State::Critical => 2,
            State::Unknown => 3,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            State::Ok => "OK",
            State::Warning => "WARNING",
            State::Critical => "CRITICAL",
            State::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// One performance data point.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PerfSample {
    pub label: String,
    pub value: f64,
    pub uom: String,
    pub warn: Option<f64>,
    pub crit: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PerfSample {
    pub fn new(label: impl Into<String>, value: f64, uom: impl Into<String>) -> Self {
        PerfSample {
            label: label.into(),
            value,
            uom: uom.into(),
            ..Default::default()
        }
    }

    pub fn with_thresholds(mut self, warn: Option<f64>, crit: Option<f64>) -> Self {
        self.warn = warn;
        self.crit = crit;
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

impl fmt::Display for PerfSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        let line = format!(
            "'{}'={}{};{};{};{};{}",
            self.label,
            self.value,
            self.uom,
            opt(self.warn),
            opt(self.crit),
            opt(self.min),
            opt(self.max)
        );
        write!(f, "{}", line.trim_end_matches(';'))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Verdict {
    pub state: State,
    pub message: String,
    pub perf: Vec<PerfSample>,
}

impl Verdict {
    pub fn new(state: State, message: impl Into<String>) -> Self {
        Verdict {
            state,
            message: message.into(),
            perf: Vec::new(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Verdict::new(State::Ok, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Verdict::new(State::Warning, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Verdict::new(State::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Verdict::new(State::Unknown, message)
    }

    pub fn with_perf(mut self, sample: PerfSample) -> Self {
        self.perf.push(sample);
        self
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Renders `STATE: message | perf...`.
    pub fn to_plugin_line(&self) -> String {
        let mut line = format!("{}: {}", self.state, self.message);
        if !self.perf.is_empty() {
            let perf: Vec<String> = self.perf.iter().map(|p| p.to_string()).collect();
            line.push_str(" | ");
            line.push_str(&perf.join(" "));
        }
        line
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_plugin_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(State::Ok.exit_code(), 0);
        assert_eq!(State::Warning.exit_code(), 1);
        assert_eq!(State::Critical.exit_code(), 2);
        assert_eq!(State::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_severity_order() {
        assert!(State::Critical > State::Unknown);
        assert!(State::Unknown > State::Warning);
        assert!(State::Warning > State::Ok);
        let worst = [State::Ok, State::Critical, State::Warning]
            .into_iter()
            .max()
            .unwrap();
        assert_eq!(worst, State::Critical);
    }

    #[test]
    fn test_plugin_line_without_perf() {
        let v = Verdict::ok("Linux sw1 5.10");
        assert_eq!(v.to_plugin_line(), "OK: Linux sw1 5.10");
    }

    #[test]
    fn test_plugin_line_with_perf() {
        let v = Verdict::warning("eth0 busy")
            .with_perf(
                PerfSample::new("in", 8000.0, "bps")
                    .with_thresholds(Some(5000.0), Some(10000.0))
                    .with_bounds(Some(0.0), Some(1e9)),
            )
            .with_perf(PerfSample::new("snmp_latency", 0.25, "s"));

        assert_eq!(
            v.to_plugin_line(),
            "WARNING: eth0 busy | 'in'=8000bps;5000;10000;0;1000000000 'snmp_latency'=0.25s"
        );
    }

    #[test]
    fn test_perf_keeps_inner_empty_slots() {
        let p = PerfSample::new("out", 0.0, "bps").with_bounds(Some(0.0), None);
        assert_eq!(p.to_string(), "'out'=0bps;;;0");
    }

    #[test]
    fn test_verdict_json() {
        let v = Verdict::critical("down");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["state"], "CRITICAL");
        assert_eq!(json["message"], "down");
    }
}
