use std::sync::Arc;

use anyhow::Context;

use jobly_api::config::ApiConfig;
use jobly_infra::PgExecutor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobly_observability::init();

    let config = ApiConfig::from_env()?;
    let executor = PgExecutor::connect_lazy(&config.database_url, config.max_connections)
        .context("failed to configure database pool")?;

    let app = jobly_api::app::build_app(config.jwt_secret, Arc::new(executor));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result.context("server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c, shutting down");
        }
    }

    Ok(())
}
