mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nlweb_bridge::config::BridgeConfig;
use nlweb_bridge::server;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nlweb-bridge",
    version,
    about = "MCP bridge that forwards tools and prompts to an NLWeb server"
)]
struct Cli {
    /// NLWeb server URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// NLWeb server endpoint path
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (defaults to ~/.nlweb-bridge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (default)
    Serve {
        /// Local transport: stdio or http
        #[arg(long)]
        transport: Option<String>,
    },
    /// Check that the NLWeb backend answers discovery calls
    Doctor,
    /// Call a backend tool once and print its output
    Call {
        /// Tool name
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load_from(path)?,
        None => BridgeConfig::load()?,
    };
    config.apply_cli_overrides(cli.server, cli.endpoint);

    let command = cli.command.unwrap_or(Command::Serve { transport: None });
    if let Command::Serve {
        transport: Some(transport),
    } = &command
    {
        config.server.transport = transport.clone();
    }
    config.validate()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Command::Serve { .. } => server::serve(config).await?,
        Command::Doctor => cli::doctor::doctor(&config).await?,
        Command::Call { name, args } => cli::call::call(&config, &name, &args).await?,
    }

    Ok(())
}
