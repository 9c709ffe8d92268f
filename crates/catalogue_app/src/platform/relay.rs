use anyhow::Context;
use catalogue_engine::{relay_router, ImageRelay, RELAY_PATH};
use catalogue_logging::{catalogue_info, LevelFilter, LogDestination};

use super::config::RelayConfig;

pub fn run_relay(config: RelayConfig, level: LevelFilter) -> anyhow::Result<()> {
    catalogue_logging::initialize(LogDestination::Terminal, level);

    let relay = ImageRelay::new(config.settings).context("building relay client")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(config.bind)
            .await
            .with_context(|| format!("binding {}", config.bind))?;
        catalogue_info!("Image relay listening on http://{}{}", config.bind, RELAY_PATH);
        axum::serve(listener, relay_router(relay))
            .await
            .context("serving image relay")
    })
}
