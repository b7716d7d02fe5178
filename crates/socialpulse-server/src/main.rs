mod api;
mod middleware;

use std::sync::Arc;

use socialpulse_db::PgSnapshotStore;
use socialpulse_profiler::{PipelineSettings, ProfilePipeline};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = socialpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url = config.require_database_url()?;
    let pool_config = socialpulse_db::PoolConfig::from_app_config(&config);
    let pool = socialpulse_db::connect_pool(database_url, pool_config).await?;
    let applied = socialpulse_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");

    let lexicon = socialpulse_profiler::load_lexicon(&config)?;
    let pipeline = ProfilePipeline::new(
        Arc::new(socialpulse_profiler::chromium_scraper(&config)),
        Arc::new(PgSnapshotStore::new(pool)),
        Arc::new(lexicon),
        PipelineSettings::from_app_config(&config),
    );
    let app = build_app(AppState {
        pipeline: Arc::new(pipeline),
    });

    tracing::info!(
        bind_addr = %config.bind_addr,
        env = %config.env,
        profile_base_url = %config.profile_base_url,
        "socialpulse server listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
