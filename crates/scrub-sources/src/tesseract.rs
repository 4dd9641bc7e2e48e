//! Local OCR through the `tesseract` command line tool

use anyhow::{Context, bail};
use async_trait::async_trait;
use scrub_core::{OcrEngine, OcrResult};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

use crate::fetch::ImageFetcher;

pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
    fetcher: ImageFetcher,
}

impl TesseractEngine {
    /// Locate `tesseract` on `PATH`. Fails at startup rather than per request.
    pub fn new(language: impl Into<String>, fetcher: ImageFetcher) -> anyhow::Result<Self> {
        let binary = which::which("tesseract").context("tesseract binary not found in PATH")?;
        Ok(Self::with_binary(binary, language, fetcher))
    }

    pub fn with_binary(
        binary: impl Into<PathBuf>,
        language: impl Into<String>,
        fetcher: ImageFetcher,
    ) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            fetcher,
        }
    }
}

/// One fragment per non-blank output line.
pub fn parse_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn predict(&self, input: &str) -> anyhow::Result<Vec<OcrResult>> {
        let bytes = self.fetcher.fetch(input).await?;

        let image = tempfile::Builder::new()
            .prefix("scrub-ocr-")
            .tempfile()
            .context("Failed to create temp file for image")?;
        tokio::fs::write(image.path(), &bytes)
            .await
            .context("Failed to write image to temp file")?;

        let output = Command::new(&self.binary)
            .arg(image.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let fragments = parse_output(&String::from_utf8_lossy(&output.stdout));
        debug!(fragments = fragments.len(), "tesseract finished");

        Ok(vec![OcrResult::new(fragments)])
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
