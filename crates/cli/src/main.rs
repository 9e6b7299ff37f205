//! clustervet - black-box verification of a running database cluster.
//!
//! Single entry point, no flags: resolve the cluster from the
//! environment, run every check in order, report, and exit 0 only if all
//! of them passed. Per-check pass/fail lines and the final summary go to
//! the log output; `RUST_LOG` adjusts verbosity.

mod driver;
mod env;

use std::process;

use clustervet_harness::{checks, run_all, Harness};
use tracing_subscriber::EnvFilter;

use driver::MysqlConnector;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match env::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let mut harness = match Harness::new(config, Box::new(MysqlConnector)) {
        Ok(harness) => harness,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let report = run_all(&mut harness, &checks::default_suite());
    harness.close();

    println!(
        "{} checks: {} passed, {} failed",
        report.total(),
        report.passed(),
        report.failed()
    );
    process::exit(report.exit_code());
}
