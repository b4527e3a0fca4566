//! ELB simulator binary.
//!
//! Serves the load balancer management protocol on a local address until
//! interrupted. The chosen base URL is printed on stdout so scripts can pick
//! up an ephemeral port.

use std::path::PathBuf;

use clap::Parser;

use elb_sim::config::loader::{load_config, parse_config, ConfigError};
use elb_sim::config::validation::validate_config;
use elb_sim::lifecycle::startup::{self, StartupError};

#[derive(Parser)]
#[command(name = "elb-sim")]
#[command(about = "In-process simulator of a cloud load balancer management API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => parse_config("")?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    startup::run(config).await
}
