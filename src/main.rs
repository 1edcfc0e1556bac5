use snmp_checks::configuration::{Configuration, Parser};
use snmp_checks::report::Report;
use snmp_checks::runner::{self, Connection};
use snmp_checks::time::SystemClock;
use snmp_checks::transport::SnmpClient;
use snmp_checks::verdict::{State, Verdict};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let conf = Configuration::parse();
    if let Err(e) = conf.validate() {
        let report = Report::new("-", conf.check.name(), Verdict::unknown(e.to_string()));
        report.print(conf.output, false);
        std::process::exit(State::Unknown.exit_code());
    }

    log::debug!(
        "Running {} against {} target(s)",
        conf.check.name(),
        conf.targets.len()
    );

    let transport_conf = conf.clone();
    let reports = runner::run_all(&conf.targets, &conf.check, move |target| -> Connection {
        let client = SnmpClient::new(transport_conf.transport_config(target));
        (Box::new(client), Box::new(SystemClock))
    })
    .await;

    let tagged = reports.len() > 1;
    for report in &reports {
        report.print(conf.output, tagged);
    }

    std::process::exit(runner::worst_state(&reports).exit_code());
}
