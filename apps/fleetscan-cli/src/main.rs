//! Fleetscan — host inventory collector.
//!
//! # Usage
//!
//! ```bash
//! # Collect from explicit hosts and print records
//! fleetscan collect host-a host-b
//!
//! # Pipe a host list, persist into the configured store
//! cat hosts.txt | fleetscan persist --dsn postgres://app@db.example/inventory
//!
//! # Keep only reachable hosts
//! fleetscan ping host-a host-b host-c
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod config;
mod hosts;
mod logging;
mod provider;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Fleetscan - inventory hardware and OS facts from a fleet of hosts
#[derive(Parser)]
#[command(name = "fleetscan")]
#[command(about = "Fleetscan - inventory hardware and OS facts from a fleet of hosts")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect inventory records and print them
    Collect {
        /// Hosts to query (falls back to lines piped on stdin)
        #[arg(value_name = "HOST")]
        hosts: Vec<String>,

        /// Output records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Collect inventory records and upsert them into the relational store
    Persist {
        /// Hosts to query (falls back to lines piped on stdin)
        #[arg(value_name = "HOST")]
        hosts: Vec<String>,

        /// Database DSN (overrides config)
        #[arg(long)]
        dsn: Option<String>,

        /// Destination table (overrides config)
        #[arg(long)]
        table: Option<String>,
    },
    /// Probe reachability and print the hosts that answer
    Ping {
        /// Hosts to probe (falls back to lines piped on stdin)
        #[arg(value_name = "HOST")]
        hosts: Vec<String>,

        /// Output the reachable set as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    // Layered config: defaults -> YAML (if provided) -> env (FLEETSCAN__*).
    let config = AppConfig::load(cli.config.as_deref())?;

    logging::init(cli.verbose);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    match cli.command {
        Commands::Collect { hosts, json } => commands::collect::run(&config, hosts, json).await,
        Commands::Persist { hosts, dsn, table } => {
            commands::persist::run(&config, hosts, dsn, table).await
        }
        Commands::Ping { hosts, json } => commands::ping::run(&config, hosts, json).await,
    }
}
