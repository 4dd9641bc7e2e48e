mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `scrub redact` output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        cli::Commands::Init { force } => commands::init::handle(config_path, force).map(|_| ()),
        cli::Commands::Entities => commands::entities::handle(),
        cli::Commands::Serve { host, port } => {
            let config = commands::load_config(config_path)?;
            commands::serve::handle(config, host, port).await
        }
        cli::Commands::Redact { text, url, summary } => {
            let config = commands::load_config(config_path)?;
            commands::redact::handle(&config, text, url, summary).await
        }
    }
}
