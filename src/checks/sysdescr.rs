//! System description check.

use regex::Regex;

use crate::{
    configuration::SysDescrArgs,
    mib::{Family, Field},
    transport::Transport,
    verdict::{PerfSample, Verdict},
};

use super::{get_row, CheckError};

pub fn run(transport: &mut dyn Transport, args: &SysDescrArgs) -> Verdict {
    match check(transport, args) {
        Ok(verdict) => verdict,
        Err(e) => e.into_verdict(),
    }
}

fn check(transport: &mut dyn Transport, args: &SysDescrArgs) -> Result<Verdict, CheckError> {
    let collected = get_row(transport, Family::System, &[Field::SysDescr], 0)?;
    let descr = collected
        .records
        .get(&0)
        .and_then(|record| record.get(Field::SysDescr))
        .and_then(|value| value.as_text())
        .map(str::to_string)
        .ok_or_else(|| CheckError::Missing {
            target: transport.target().to_string(),
            what: "sysDescr".to_string(),
        })?;

    let mut verdict = match args.pattern.as_deref() {
        Some(pattern) => match Regex::new(pattern) {
            Ok(re) if re.is_match(&descr) => Verdict::ok(descr),
            Ok(_) => Verdict::critical(format!(
                "sysDescr does not match expected pattern '{}'. Got: {}",
                pattern, descr
            )),
            Err(e) => Verdict::unknown(format!("Invalid sysDescr pattern: {}", e)),
        },
        None => Verdict::ok(descr),
    };

    if args.perf_data {
        verdict
            .perf
            .push(PerfSample::new("latency", collected.latency.as_secs_f64(), "s"));
    }

    Ok(verdict)
}
