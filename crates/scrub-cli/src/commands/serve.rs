use anyhow::Result;
use scrub_config::Config;
use scrub_engine::Scrubber;
use scrub_server::ScrubServer;
use std::sync::Arc;

pub async fn handle(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let scrubber = Arc::new(Scrubber::from_config(&config)?);

    println!(
        "Starting scrub server on {}:{}",
        config.server.host, config.server.port
    );
    ScrubServer::serve(scrubber, &config.server).await?;

    Ok(())
}
