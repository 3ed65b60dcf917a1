// src/main.rs

use clap::Parser;
use sensor_link::{
    common::StdTimer, readings::RandomReadings, Args, ClientConfig, Result, RunSummary,
    SensorClient,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Usage errors exit here with clap's own non-zero status.
    let args = Args::parse();

    match run(args) {
        Ok(summary) => {
            log::info!(
                "stream ended after {} cycles ({} alerts)",
                summary.cycles,
                summary.alerts
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<RunSummary> {
    // Validated before any socket is opened.
    let config = ClientConfig::try_from(args)?;
    log::debug!("configuration: {config:?}");

    let source = match config.seed {
        Some(seed) => RandomReadings::seeded(seed),
        None => RandomReadings::from_entropy(),
    };
    SensorClient::new(config, source, StdTimer).run()
}
