use clap::Parser;
use dvault_client::Config;
use dvault_client::commands::{Commands, handle_command};
use tracing::error;

#[derive(Parser)]
#[command(name = "dvault")]
#[command(about = "Command line client for the Dungeon Vault campaign service")]
struct Cli {
    #[arg(short, long, help = "Path to configuration file")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_file(&path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.level))
        .init();

    if let Err(e) = handle_command(cli.command, &config).await {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
