use anyhow::Result;
use scrub_config::Config;
use std::path::{Path, PathBuf};

pub fn handle(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(&path)?;

    println!("✓ Wrote {}", path.display());
    Ok(path)
}
