use anyhow::{Context, Result};
use scrub_config::Config;
use scrub_core::ScrubRequest;
use scrub_engine::Scrubber;
use scrub_security::summarize;
use tokio::io::AsyncReadExt;

pub async fn handle(
    config: &Config,
    text: Option<String>,
    url: Option<String>,
    summary: bool,
) -> Result<()> {
    let request = match (text, url) {
        (_, Some(url)) => ScrubRequest::from_url(url),
        (Some(text), None) => ScrubRequest::from_text(text),
        (None, None) => ScrubRequest::from_text(read_stdin().await?),
    };

    let scrubber = Scrubber::from_config(config)?;
    let (redacted, findings) = scrubber.process_with_findings(&request).await?;

    println!("{}", redacted);

    if summary {
        if findings.is_empty() {
            eprintln!("No PII found");
        }
        for entry in summarize(&findings) {
            eprintln!("  {:<20} {}", entry.entity_type.as_str(), entry.count);
        }
    }

    Ok(())
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read stdin")?;
    Ok(input)
}
