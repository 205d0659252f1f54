//! # battmd: battery monitor daemon
//!
//! Composition root that wires all adapters together and starts the
//! background tasks.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Restore the persisted charge bounds
//! - Start the threshold monitor and the battery level refresh
//! - Run the console settings surface
//! - Stop everything on Ctrl-C or `quit`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod sensor;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use battm_adapter_console::{Console, ConsoleExit};
use battm_adapter_desktop::DesktopNotifier;
use battm_adapter_storage_json::JsonSettingsRepository;
use battm_app::bounds_store::BoundsStore;
use battm_app::gauge::{BatteryGauge, DisplayRefresh};
use battm_app::monitor::MonitorLoop;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::config::Config;
use crate::sensor::AnySensor;

/// How long shutdown waits for blocking tasks. A pending stdin read can
/// never complete on its own.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let result = runtime.block_on(run(&config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    // Sensor
    let sensor = Arc::new(AnySensor::from_config(&config.sensor));
    tracing::info!(source = sensor.name(), "battery sensor selected");

    // Bounds
    let repo = JsonSettingsRepository::new(config.settings.path.clone());
    tracing::debug!(path = %repo.path().display(), "charge bounds file");
    let bounds = Arc::new(BoundsStore::open(repo).await);

    // Background tasks
    let notifier = Arc::new(DesktopNotifier::new(config.notifier.clone()));
    let monitor = MonitorLoop::new(
        Arc::clone(&sensor),
        notifier,
        Arc::clone(&bounds),
        config.monitor_config(),
    )
    .start();

    let gauge = Arc::new(BatteryGauge::new());
    let display = DisplayRefresh::new(
        Arc::clone(&sensor),
        Arc::clone(&gauge),
        config.display_interval(),
        config.sensor_timeout(),
    )
    .start();

    // Foreground
    if config.console.enabled {
        let mut console = Console::new(Arc::clone(&bounds), gauge.subscribe());
        let input = BufReader::new(tokio::io::stdin());
        tokio::select! {
            exit = console.run(input, tokio::io::stdout()) => match exit {
                Ok(ConsoleExit::Quit) => {}
                Ok(ConsoleExit::Closed) => {
                    tracing::info!("console closed, monitoring until interrupted");
                    wait_for_interrupt().await?;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "console failed, monitoring until interrupted");
                    wait_for_interrupt().await?;
                }
            },
            signal = wait_for_interrupt() => signal?,
        }
    } else {
        wait_for_interrupt().await?;
    }

    monitor.abort();
    display.abort();
    tracing::info!(bounds = %bounds.get(), "battery monitor stopped");
    Ok(())
}

async fn wait_for_interrupt() -> anyhow::Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl-C")?;
    tracing::info!("interrupt received");
    Ok(())
}
