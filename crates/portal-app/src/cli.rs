use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Smart Services Portal: AI assistant and service locations.
#[derive(Parser, Debug)]
#[command(name = "portal", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. debug, portal=trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Talk to the AI assistant.
    Chat {
        /// Send a single message and exit instead of starting a session.
        #[arg(long)]
        once: Option<String>,

        /// Account email for this session.
        #[arg(long, default_value = "guest@portal.local")]
        email: String,

        /// Account password for this session.
        #[arg(long, default_value = "guest-password")]
        password: String,
    },
    /// List service locations.
    Locations {
        /// Center the map on a location or the city.
        #[arg(long)]
        center: Option<String>,
    },
    /// Print the effective configuration as JSON.
    Config,
}

pub fn parse() -> Args {
    Args::parse()
}
