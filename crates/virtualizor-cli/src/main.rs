//! virtualizor CLI
//!
//! Command-line access to a Virtualizor end-user panel

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use virtualizor_client::PanelClient;

mod config;

use config::{Config, Overrides};

#[derive(Parser)]
#[command(name = "virtualizor")]
#[command(about = "Manage servers on a Virtualizor panel", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Panel URL, e.g. https://panel.example.com:4083
    #[arg(long, global = true)]
    api: Option<String>,

    /// API key
    #[arg(long, global = true)]
    key: Option<String>,

    /// API password
    #[arg(long, global = true)]
    secret: Option<String>,

    /// Print the panel's responses unmodified
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show details of a server
    Details { id: String },
    /// List all servers
    List,
    /// Start a server
    Start { id: String },
    /// Stop a server
    Stop { id: String },
    /// Restart a server
    Restart { id: String },
    /// Show memory usage
    Ram { id: String },
    /// Show CPU usage
    Cpu { id: String },
    /// Show disk usage
    Disk { id: String },
    /// Show bandwidth usage for a month
    Bandwidth { id: String, month: String },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let (config, source) = Config::load_default(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded configuration"),
        None => tracing::debug!("no config file found, using flags only"),
    }

    let client = PanelClient::new(config.client_config(Overrides {
        api: cli.api,
        key: cli.key,
        secret: cli.secret,
        raw: cli.raw,
    })?);
    tracing::debug!(?client, "client ready");

    match cli.command {
        Commands::Details { id } => print_json(&client.get_server_details(id).await?),
        Commands::List => print_json(&client.list_servers().await?),
        Commands::Start { id } => print_json(&client.start_server(id).await?),
        Commands::Stop { id } => print_json(&client.stop_server(id).await?),
        Commands::Restart { id } => print_json(&client.restart_server(id).await?),
        Commands::Ram { id } => print_json(&client.get_ram(id).await?),
        Commands::Cpu { id } => print_json(&client.get_cpu(id).await?),
        Commands::Disk { id } => print_json(&client.get_disk(id).await?),
        Commands::Bandwidth { id, month } => print_json(&client.get_bandwidth(id, month).await?),
    }
}
