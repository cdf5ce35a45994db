use anyhow::Context;
use mock_api::shared::config::load_config;
use mock_api::shared::store::Store;
use mock_api::socket::telemetry::spawn_telemetry;
use mock_api::system::tracing as app_tracing;
use mock_api::{configure_routes, AppState};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app_tracing::initialize()?;

    let config = load_config()?;
    let store = match config.fixtures_path() {
        Some(path) => {
            tracing::info!("Loading fixtures from {}", path.display());
            Store::from_file(&path)
                .with_context(|| format!("Cannot load fixtures {}", path.display()))?
        }
        None => Store::embedded().context("Embedded fixtures are invalid")?,
    };
    tracing::info!(
        sales = store.sales.len(),
        processes = store.processes.len(),
        employees = store.employees.len(),
        "store ready"
    );

    let state = AppState::new(config, store);
    if state.config.telemetry.enabled {
        spawn_telemetry(state.clone(), state.config.telemetry.interval_ms);
    }

    let addr = state.config.bind_addr();
    let prefix = state.config.api_prefix();
    let app = configure_routes(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {}", addr))?;
    tracing::info!("mock_api listening on http://{}{}", addr, prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("mock_api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
