use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "PII redaction service with optional OCR", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "SCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "SCRUB_HOST")]
        host: Option<String>,

        #[arg(long, env = "SCRUB_PORT")]
        port: Option<u16>,
    },

    /// Redact text, an image URL, or stdin and print the result
    Redact {
        /// Text to redact (reads stdin when neither TEXT nor --url is given)
        text: Option<String>,

        /// Image URL to OCR and redact
        #[arg(long, conflicts_with = "text")]
        url: Option<String>,

        /// Print per-type counts to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the entity types that are redacted
    Entities,
}
