//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____              __        __         __  ____
   / __ )____  ____  / /_______/ /_  ___  / / / __/
  / __  / __ \/ __ \/ //_/ ___/ __ \/ _ \/ / / /_
 / /_/ / /_/ / /_/ / ,< (__  ) / / /  __/ / / __/
/_____/\____/\____/_/|_/____/_/ /_/\___/_/ /_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str, metrics_path: Option<&str>) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/books", addr);
    info!("Health:    http://{}/health", addr);
    if let Some(path) = metrics_path {
        info!("Metrics:   http://{}{}", addr, path);
    }
    info!("{}", separator);
}
