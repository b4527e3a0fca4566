//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and the optional metrics exporter
//! - Start the server and run it until a shutdown signal arrives

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::SimulatorConfig;
use crate::http::{ElbServer, ServerError};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::{logging, metrics};

/// Anything that prevents the simulator from running.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Run the simulator until Ctrl+C / SIGTERM.
pub async fn run(config: SimulatorConfig) -> Result<(), StartupError> {
    logging::init_logging(&config.observability.log_level);
    tracing::info!("elb-sim v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        admin = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = ElbServer::start(config).await?;
    println!("{}", server.url());

    shutdown_signal().await;
    server.stop().await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[test]
    fn test_config_errors_surface_as_startup_errors() {
        let err: StartupError = parse_config("[timeouts]\nrequest_secs = 0\n").unwrap_err().into();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.request_secs must be greater than zero"
        );
    }
}
