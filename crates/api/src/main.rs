use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parish_api::bootstrap::{ensure_admin, AdminSeed};
use parish_api::config::ServerConfig;
use parish_api::router::build_app_router;
use parish_api::state::AppState;
use parish_events::{EventBus, PushDispatcher, PushGateway};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parish_api=debug,parish_events=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = parish_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    parish_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    parish_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- First-run administrator ---
    if let Some(seed) = AdminSeed::from_env() {
        match ensure_admin(&pool, &seed).await {
            Ok(Some(user)) => tracing::info!(user_id = user.id, email = %user.email, "Seeded administrator account"),
            Ok(None) => tracing::debug!("Administrator already present, skipping seed"),
            Err(e) => tracing::error!(error = %e, "Failed to seed administrator account"),
        }
    }

    // --- Event bus and push delivery ---
    let event_bus = Arc::new(EventBus::default());

    let gateway = match config.push_gateway_url.as_deref() {
        Some(url) => match PushGateway::new(url) {
            Ok(gateway) => Some(gateway),
            Err(e) => {
                tracing::error!(error = %e, "Push gateway unavailable, deliveries will be skipped");
                None
            }
        },
        None => {
            tracing::warn!("PUSH_GATEWAY_URL not set, deliveries will be skipped");
            None
        }
    };
    let dispatcher_handle = tokio::spawn(
        PushDispatcher::new(pool.clone(), gateway).run(event_bus.subscribe()),
    );
    tracing::info!("Push dispatcher started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last sender closes the channel and ends the dispatcher.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), dispatcher_handle).await;
    tracing::info!("Push dispatcher stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
