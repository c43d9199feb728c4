//! # Bookshelf Server
//!
//! Main entry point for the Bookshelf book service.

use bookshelf_config::{AppConfig, ConfigLoader};
use bookshelf_core::{telemetry::init_logging, BookshelfError, BookshelfResult};
use bookshelf_rest::create_router;
use bookshelf_server::{metrics::install_prometheus, startup, wiring::Application};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.observability.log_level, config.observability.log_format) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    startup::print_banner();
    info!("Starting Bookshelf Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> BookshelfResult<()> {
    let app = Application::build(&config).await?;

    let mut state = app.state.clone();
    if config.observability.metrics_enabled {
        match install_prometheus() {
            Ok(handle) => state = state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled: {}", e),
        }
    }

    let router = create_router(state, &config.server, &config.observability);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BookshelfError::Internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(
        &addr,
        config
            .observability
            .metrics_enabled
            .then_some(config.observability.metrics_path.as_str()),
    );

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BookshelfError::Internal(format!("REST server error: {e}")));

    app.shutdown(config.server.shutdown_timeout()).await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
