use anyhow::{Context, Result};
use notekeep_db::{create_pool, run_migrations};
use notekeep_server::config::load_config;
use notekeep_server::logging::init_tracing;
use notekeep_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env with NOTEKEEP__* overrides
    dotenvy::dotenv().ok();

    // Load configuration
    let config_path =
        std::env::var("NOTEKEEP_CONFIG").unwrap_or_else(|_| "notekeep.yaml".to_string());
    let config = load_config(&config_path)?;

    // Initialize tracing
    init_tracing(config.env);

    tracing::info!(env = ?config.env, "Starting notekeep server");
    tracing::info!("Config loaded from: {}", config_path);

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.db.url, config.db.max_connections)
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let listen = config.listen.clone();

    // Build application state
    let state = AppState::new(pool, config).context("Invalid auth configuration")?;

    // Build router
    let app = notekeep_server::web::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
