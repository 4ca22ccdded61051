use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use check_redis::cli::Cli;
use check_redis::{logging, probe, ProbeConfig, Severity};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help/--version are not failures; usage errors are UNKNOWN, not clap's 2
            return if e.use_stderr() {
                Severity::Unknown.into()
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match ProbeConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            println!("[Unknown]{}", e);
            return Severity::Unknown.into();
        }
    };

    let probe_id = uuid::Uuid::new_v4().to_string();
    logging::init(&config.logging, &probe_id);
    config.log_summary();

    // Single-threaded runtime: one connection, one sequential exchange
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to start runtime");
            println!("[Unknown]failed to start runtime: {}", e);
            return Severity::Unknown.into();
        }
    };

    let report = runtime.block_on(probe::run(&config));
    print!("{}", report.render(config.format));

    report.severity().into()
}
