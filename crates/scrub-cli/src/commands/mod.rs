pub mod entities;
pub mod init;
pub mod redact;
pub mod serve;

use anyhow::Result;
use scrub_config::Config;
use std::path::Path;

/// Explicit `--config` file, or the default location (created on first use).
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
