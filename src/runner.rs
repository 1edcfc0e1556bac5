//! Runs one check against several targets.
//!
//! SNMP sessions are synchronous, so every target gets its own blocking task
//! with its own transport and clock. Reports come back in target order.

use std::sync::Arc;

use crate::{
    checks,
    configuration::Check,
    report::Report,
    time::Clock,
    transport::Transport,
    verdict::{State, Verdict},
};

/// A transport and clock for one target.
pub type Connection = (Box<dyn Transport + Send>, Box<dyn Clock + Send>);

/// Runs `check` against every target concurrently.
///
/// `connect` builds the connection for a target name. A task that panics or
/// is cancelled yields an UNKNOWN report for its target.
pub async fn run_all<F>(targets: &[String], check: &Check, connect: F) -> Vec<Report>
where
    F: Fn(&str) -> Connection + Send + Sync + 'static,
{
    let connect = Arc::new(connect);

    let handles: Vec<_> = targets
        .iter()
        .map(|target| {
            let name = target.clone();
            let check = check.clone();
            let connect = Arc::clone(&connect);
            let handle = tokio::task::spawn_blocking(move || {
                let (mut transport, clock) = connect(&name);
                checks::run(&check, transport.as_mut(), clock.as_ref())
            });
            (target.clone(), handle)
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (target, handle) in handles {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => {
                log::error!("Check task for {} failed: {}", target, e);
                Report::new(
                    target,
                    check.name(),
                    Verdict::unknown(format!("Check did not complete: {}", e)),
                )
            }
        };
        reports.push(report);
    }

    reports
}

/// The most severe state among `reports`, OK when there are none.
pub fn worst_state(reports: &[Report]) -> State {
    reports
        .iter()
        .map(|r| r.verdict.state)
        .max()
        .unwrap_or(State::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_state() {
        let reports = vec![
            Report::new("a", "sysdescr", Verdict::ok("x")),
            Report::new("b", "sysdescr", Verdict::unknown("y")),
            Report::new("c", "sysdescr", Verdict::warning("z")),
        ];
        assert_eq!(worst_state(&reports), State::Unknown);
        assert_eq!(worst_state(&[]), State::Ok);
    }
}
