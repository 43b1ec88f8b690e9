use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_api::config::ServerConfig;
use gatehouse_api::identity::IdentityBackend;
use gatehouse_api::router::build_app_router;
use gatehouse_api::state::AppState;
use gatehouse_supabase::{JwtVerifier, SupabaseAuth, SupabaseConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        login_path = %config.login_path,
        session_timeout_ms = config.session_timeout.map(|t| t.as_millis() as u64),
        "Loaded server configuration"
    );

    // --- Identity backend ---
    let identity: Arc<dyn IdentityBackend> = match &config.jwt_secret {
        Some(secret) => {
            tracing::info!("Verifying access tokens locally with the project JWT secret");
            Arc::new(JwtVerifier::new(secret))
        }
        None => {
            tracing::info!(url = %config.supabase_url, "Resolving access tokens via Supabase Auth");
            let auth = SupabaseAuth::new(SupabaseConfig::new(
                &config.supabase_url,
                &config.supabase_anon_key,
            ))
            .expect("Failed to build Supabase HTTP client");
            Arc::new(auth)
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        identity,
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

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
