use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use swapit_service::{DefaultAppState, create_app, uploads::UploadStore};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swapit_service=debug".parse().unwrap()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL environment variable must be set");

    let mut connection = SqliteConnection::establish(&database_url).unwrap_or_else(|err| {
        error!(database_url = %database_url, error = %err, "Failed to connect to database");
        std::process::exit(1);
    });

    // The listings table is created on first boot
    connection
        .run_pending_migrations(MIGRATIONS)
        .unwrap_or_else(|err| {
            error!(error = %err, "Failed to run database migrations");
            std::process::exit(1);
        });

    info!(database_url = %database_url, "Connected to database");

    let upload_dir =
        std::env::var("SWAPIT_UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    let uploads = UploadStore::new(&upload_dir).unwrap_or_else(|err| {
        error!(upload_dir = %upload_dir, error = %err, "Failed to create upload directory");
        std::process::exit(1);
    });

    info!(upload_dir = %upload_dir, "Serving uploads");

    let app_state = DefaultAppState::new(Arc::new(Mutex::new(connection)), uploads);

    let app = create_app(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(15)))
            // The browser client is served from another origin
            .layer(CorsLayer::permissive()),
    );

    let listener = tokio::net::TcpListener::bind("0.0.0.0:4000")
        .await
        .unwrap_or_else(|err| {
            error!(bind_address = "0.0.0.0:4000", error = %err, "Failed to bind to address");
            std::process::exit(1);
        });

    info!("Server running on http://localhost:4000");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
