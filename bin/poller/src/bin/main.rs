use config::Settings;
use poller::{metrics::install_prometheus_exporter, LiveBackend, Poller, SETTINGS_FILE};
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting balance poller");

    let current_dir = std::env::current_dir()?;
    info!("Settings file: {:?}", current_dir.join(SETTINGS_FILE));

    // Only the exporter port is taken from this first read; every cycle
    // reloads the file on its own.
    let settings = Settings::from_file(SETTINGS_FILE).inspect_err(|e| error!("{}", e))?;
    if let Some(port) = settings.metrics_port {
        install_prometheus_exporter(port)?;
        info!("Serving metrics on port {}", port);
    }

    let poller = Poller::new(SETTINGS_FILE, LiveBackend);

    match poller.run().await {
        Ok(never) => match never {},
        Err(e) => {
            error!("Stopping balance poller: {}", e);
            Err(e.into())
        }
    }
}
