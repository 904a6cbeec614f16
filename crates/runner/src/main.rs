use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use trendalert_chart::PlottersChartRenderer;
use trendalert_gateway::{DiscordNotifier, YahooPriceSource, http_client};
use trendalert_ports::SystemClock;
use trendalert_runner::cli::{self, Args, Collaborators};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("trendalert=info".parse()?))
        .init();

    let code = cli::run(&args, |config| {
        let client = http_client(config.request_timeout)?;
        let source = YahooPriceSource::new(client.clone(), &config.data_source_url)?;
        Ok(Collaborators {
            source: Arc::new(source),
            notifier: Arc::new(DiscordNotifier::new(client)),
            renderer: Arc::new(PlottersChartRenderer::new(
                config.chart_width,
                config.chart_height,
            )),
            clock: Arc::new(SystemClock),
        })
    })
    .await?;

    Ok(ExitCode::from(code))
}
