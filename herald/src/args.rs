use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Herald error-rendering reference server
#[derive(Debug, Parser)]
#[command(name = "herald", about = "Reference server for classified JSON error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "herald.toml", env = "HERALD_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "HERALD_LISTEN")]
    pub listen: Option<SocketAddr>,
}
