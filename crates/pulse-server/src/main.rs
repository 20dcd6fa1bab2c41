//! pulse server
//!
//! - `/`           : hello
//! - `/decide`     : instrumented, label `decide`
//! - `/activate`   : instrumented, label `activate`
//! - `/debug/vars` : JSON variable dump
//! - `/metrics`    : Prometheus text format

use tracing_subscriber::{fmt, EnvFilter};

use pulse_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::ServerConfig::default();
    let listen = cfg.server.listen_addr().expect("server.listen must be a valid SocketAddr");

    // Duplicate metric registration is a programming error: refuse to serve.
    let state = app_state::AppState::new(cfg).expect("metrics registration failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "pulse-server listening");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
    tracing::info!("signal received, starting graceful shutdown");
}
