//! PVZ Service
//!
//! REST API for pickup points, receptions and products.
//! Reads configuration from a TOML file (~/.config/pvz-service/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use pvz_service::config::LoggingConfig;
use pvz_service::infrastructure::database::migrator::Migrator;
use pvz_service::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use pvz_service::{
    create_api_router, create_metrics_router, default_config_path, init_database, AppConfig,
    AppState, TxManager,
};

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    match logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (mut app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    app_cfg.apply_env_overrides();

    init_tracing(&app_cfg.logging);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => warn!("{}. Using default configuration.", e),
    }
    app_cfg.validate()?;

    info!("Starting PVZ service...");

    // ── Prometheus metrics recorder (before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| {
            error!("Failed to install Prometheus metrics recorder: {}", e);
            e
        })?;

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database_config()).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let tx = TxManager::shared(Arc::clone(&db)).with_timeout(app_cfg.database.transaction_timeout());
    let jwt_config = app_cfg.jwt_config();
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let api_router = create_api_router(AppState::new(tx, jwt_config));
    let metrics_router = create_metrics_router(prometheus_handle);

    // ── Listeners ──────────────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let api_addr = app_cfg.server.api_address();
    let api_listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/swagger-ui/", api_addr);

    let metrics_addr = app_cfg.server.metrics_address();
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr).await?;
    info!("Prometheus metrics on http://{}/metrics", metrics_addr);

    // Either server stopping brings the other one down too.
    let api_shutdown = shutdown.clone();
    let api_drain = shutdown.clone();
    let api_server = tokio::spawn(async move {
        let result = axum::serve(api_listener, api_router)
            .with_graceful_shutdown(async move { api_drain.wait().await })
            .await;
        api_shutdown.trigger();
        result
    });

    let metrics_shutdown = shutdown.clone();
    let metrics_drain = shutdown.clone();
    let metrics_server = tokio::spawn(async move {
        let result = axum::serve(metrics_listener, metrics_router)
            .with_graceful_shutdown(async move { metrics_drain.wait().await })
            .await;
        metrics_shutdown.trigger();
        result
    });

    let (api_result, metrics_result) = tokio::join!(api_server, metrics_server);
    match api_result {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
    match metrics_result {
        Ok(Ok(())) => info!("Metrics server stopped"),
        Ok(Err(e)) => error!("Metrics server error: {}", e),
        Err(e) => error!("Metrics server task panicked: {}", e),
    }

    // Both routers are gone, so this is the last handle to the pool.
    match Arc::try_unwrap(db) {
        Ok(db) => match db.close().await {
            Ok(()) => info!("Database connection closed"),
            Err(e) => warn!("Error closing database connection: {}", e),
        },
        Err(_) => warn!("Database pool still shared at shutdown, leaving it to drop"),
    }

    info!("PVZ service shutdown complete");
    Ok(())
}
