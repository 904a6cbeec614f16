//! Command line entry point
//!
//! `main` only parses arguments, installs logging and builds the real
//! adapters; everything that decides the exit status lives here.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use trendalert_ports::{ChartRenderer, Clock, Notifier, PriceSource};

use crate::batch::BatchRunner;
use crate::config::{RunConfiguration, load_or_create};

/// Batch completed, even if some instruments failed
pub const EXIT_OK: u8 = 0;
/// Configuration missing (template written), unreadable or invalid
pub const EXIT_CONFIG: u8 = 2;

/// Fit linear and polynomial trends to recent closes and alert on deviations
#[derive(Debug, Clone, Parser)]
#[command(name = "trendalert", version, about)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Evaluate and log decisions without sending notifications
    #[arg(long)]
    pub dry_run: bool,
}

/// Collaborators for one run
pub struct Collaborators {
    pub source: Arc<dyn PriceSource>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn ChartRenderer>,
    pub clock: Arc<dyn Clock>,
}

/// Load configuration, run one batch and return the process exit code
///
/// `connect` builds the collaborators once the configuration is known.
/// Its errors are infrastructure failures and propagate as `Err`.
pub async fn run<F>(args: &Args, connect: F) -> anyhow::Result<u8>
where
    F: FnOnce(&RunConfiguration) -> anyhow::Result<Collaborators>,
{
    let config = match load_or_create(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Ok(EXIT_CONFIG);
        }
    };

    let collaborators = connect(&config)?;
    let runner = match BatchRunner::new(
        config,
        collaborators.source,
        collaborators.notifier,
        collaborators.renderer,
        collaborators.clock,
    ) {
        Ok(runner) => runner.with_dry_run(args.dry_run),
        Err(e) => {
            error!("Invalid model configuration: {}", e);
            return Ok(EXIT_CONFIG);
        }
    };

    let report = runner.run().await;
    info!("{}", report);
    Ok(EXIT_OK)
}
