//! CLI interface for budgeteer

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::server;

#[derive(Parser)]
#[command(name = "budgeteer")]
#[command(about = "Expense-tracking HTTP API with monthly proration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve over HTTPS
        #[arg(long)]
        https: bool,
        /// Path to TLS certificate (PEM)
        #[arg(long, requires = "key")]
        cert: Option<String>,
        /// Path to TLS private key (PEM)
        #[arg(long, requires = "cert")]
        key: Option<String>,
    },
    /// Inspect or initialize configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Print the config file path
        #[arg(long)]
        path: bool,
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            https,
            cert,
            key,
        }) => {
            let config = Config::load()?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            server::start(&host, port, https, cert, key).await
        }
        Some(Commands::Config { show, path, init }) => run_config(show, path, init),
        // No subcommand: serve with config defaults.
        None => {
            let config = Config::load()?;
            let host = config.server.host.clone();
            let port = config.server.port;
            server::start(&host, port, false, None, None).await
        }
    }
}

fn run_config(show: bool, path: bool, init: bool) -> Result<()> {
    if path {
        println!("{}", config::config_path()?.display());
    }

    if init {
        let config = Config::load()?;
        config.save()?;
        println!("✓ Config written to {}", config::config_path()?.display());
    }

    if show || (!path && !init) {
        let config = Config::load()?;
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}
