//! Game link validator.
//!
//! Pulls pending game submissions from the record store, probes each
//! submitted page for an embedded browser-playable build, and writes
//! `Ready` or `Invalid` back to the record's status field.

mod config;
mod logging;

use anyhow::Context;
use validator_engine::{run_batch, AirtableStore, BatchSettings, CheckSettings, ItchChecker};
use validator_logging::validator_error;

use crate::config::Config;
use crate::logging::LogDestination;

fn main() {
    logging::initialize(LogDestination::Terminal);

    // One containment point: whatever escapes the run is logged and the
    // process still exits normally.
    if let Err(err) = run() {
        validator_error!("Fatal error: {:#}", err);
    }
}

fn run() -> anyhow::Result<()> {
    // Pick up a local .env if one exists; absence is fine.
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("loading configuration")?;
    let store = AirtableStore::new(&config.api_key, &config.base_id)
        .context("building record store client")?;
    let checker = ItchChecker::new(CheckSettings::default());
    let settings = BatchSettings { pace: config.pace };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building async runtime")?;
    runtime.block_on(run_batch(&store, &checker, &settings));
    Ok(())
}
