pub mod runner;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::cloud_providers::aws::config::resolve_available_aws_config;
use crate::cloud_providers::aws::cost_explorer::CostExplorerClient;
use crate::cloud_providers::aws::ec2::Ec2Client;
use crate::config::Config;
use crate::dashboard::layout;
use crate::dashboard::snapshot::DashboardSnapshot;
use crate::display::{DashboardScreen, Epd2in13Screen, PreviewScreen};
use runner::DashboardRunner;

#[tokio::main]
pub async fn run(config: Config) -> Result<()> {
    let sdk_config = resolve_available_aws_config(config.aws_init_type.clone(), &config.aws_region)
        .await
        .context("could not resolve AWS credentials")?;

    let costs = CostExplorerClient::new_with_config(&sdk_config);
    let instances = Ec2Client::new_with_config(&sdk_config);

    // Hardware bring-up happens exactly once; a failure here is fatal and
    // the panel is never re-initialized afterwards.
    let mut screen = Epd2in13Screen::new(&config).context("initializing the e-ink panel")?;
    screen.clear().context("clearing the panel")?;

    info!(
        region = %config.aws_region,
        interval_secs = config.refresh_interval_secs,
        "Starting dashboard loop"
    );

    DashboardRunner::new(
        costs,
        instances,
        screen,
        Duration::from_secs(config.refresh_interval_secs),
    )
    .run()
    .await
}

/// Renders one frame with canned values to stdout. Useful at the bench
/// with no panel attached and no AWS credentials.
pub fn preview(_config: Config) -> Result<()> {
    let snapshot = DashboardSnapshot {
        yesterday_cost: 12.34,
        month_cost: 456.78,
        ec2_running: 3,
        updated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    let frame = layout::render(&snapshot)?;
    let mut screen = PreviewScreen;
    screen.show(&frame)?;
    Ok(())
}
