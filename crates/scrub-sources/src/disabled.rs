use async_trait::async_trait;
use scrub_core::{OcrEngine, OcrResult};

/// Stand-in for text-only deployments; every image request fails.
pub struct DisabledOcrEngine;

#[async_trait]
impl OcrEngine for DisabledOcrEngine {
    async fn predict(&self, _input: &str) -> anyhow::Result<Vec<OcrResult>> {
        anyhow::bail!("OCR is disabled in this deployment")
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
