use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::ServiceExt;
use bazaar_db::store::{MemoryStore, PgStore};
use bazaar_events::{EmailConfig, EmailDelivery, EventBus, EventBusProductHook, ProductNotifier};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bazaar_api::background;
use bazaar_api::config::{ServerConfig, StoreBackend};
use bazaar_api::router::build_app_router;
use bazaar_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_api=debug,bazaar_events=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store_backend = ?config.store_backend,
        "Loaded server configuration"
    );

    let cancel = CancellationToken::new();

    // --- Event bus & product notifications ---
    let event_bus = Arc::new(EventBus::default());
    let product_hook = Arc::new(EventBusProductHook::new(Arc::clone(&event_bus)));

    let notifier_handle = match EmailConfig::from_env() {
        Some(email_config) => {
            let notifier = ProductNotifier::new(
                Arc::new(EmailDelivery::new(email_config)),
                ProductNotifier::admin_email_from_env(),
            );
            Some(tokio::spawn(
                notifier.run(event_bus.subscribe(), cancel.clone()),
            ))
        }
        None => {
            tracing::info!("SMTP_HOST not set, new product emails are disabled");
            None
        }
    };

    // --- Store ---
    let (state, sweep_handle): (AppState, Option<JoinHandle<()>>) = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

            let pool = bazaar_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            bazaar_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            bazaar_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let store = PgStore::new(pool)
                .with_cart_ttl(chrono::Duration::days(config.cart_session_ttl_days));
            let sweep = tokio::spawn(background::cart_sweep::run(store.clone(), cancel.clone()));

            (
                AppState::new(config.clone(), Arc::new(store), product_hook),
                Some(sweep),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; all data is lost on shutdown");
            (
                AppState::new(config.clone(), Arc::new(MemoryStore::new()), product_hook),
                None,
            )
        }
    };

    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    for handle in [sweep_handle, notifier_handle].into_iter().flatten() {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Background tasks stopped");

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
