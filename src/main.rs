use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use outreach_server::config::Config;
use outreach_server::handlers::AppState;
use outreach_server::routes::create_routes;
use outreach_server::storage::postgres::PgStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_server=info".into()),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Startup failed: {e}");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;

    let storage = PgStorage::connect(&config.database_url, config.max_connections).await?;
    storage.migrate().await?;

    let app = create_routes(AppState::new(Arc::new(storage)), &config)?;

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("serving on port {}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
