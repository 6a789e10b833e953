//! Process startup: configuration, logging, service assembly, serving.

use anyhow::Context;
use env_logger::Env;
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{APP_NAME, APP_VERSION, AppConfig};
use crate::http;
use crate::service::RentalService;

/// How the server was launched. `Dev` forces the debug flag on; hot reload
/// itself is delegated to an external watcher, the binary behaves the same
/// once running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Dev,
    Start,
}

impl RunMode {
    pub fn is_dev(self) -> bool {
        matches!(self, RunMode::Dev)
    }
}

/// The only difference between `dev` and `start` is the debug flag;
/// host, port, log level and API limits are shared.
fn apply_run_mode(config: &mut AppConfig, mode: RunMode) {
    config.server.debug = mode.is_dev() || config.server.debug;
}

pub async fn run(mode: RunMode) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    apply_run_mode(&mut config, mode);

    env_logger::Builder::from_env(
        Env::default().default_filter_or(config.server.log_level.as_str()),
    )
    .init();

    info!(
        "{APP_NAME} v{APP_VERSION} starting: mode={mode:?}, api_prefix={}, model_dir={}, max_batch_size={}, debug={}",
        config.api.prefix,
        config.model.model_dir,
        config.api.max_batch_size,
        config.server.debug,
    );
    if mode.is_dev() {
        info!("development mode: run under `cargo watch -x 'run -- dev'` for restart-on-change");
    }

    let cors_layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let bind_addr = config.bind_addr();
    let service = RentalService::new(config);
    let app = http::router(service).layer(cors_layer);

    // A bind failure (port in use, privileged port) is fatal and propagates
    // out of main with a non-zero exit.
    let listener = bind(&bind_addr).await?;
    info!(
        "{APP_NAME} listening on {} ({mode:?} mode)",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server exited unexpectedly")
}

async fn bind(bind_addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))
}

/// Resolve once either SIGINT or SIGTERM arrives, letting in-flight
/// requests drain before the process exits.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("failed waiting for Ctrl+C signal: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to register SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    info!("shutdown signal received, draining in-flight requests");
}
