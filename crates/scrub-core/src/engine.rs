//! Engine traits
//!
//! Each stage of a request talks to one of these. Implementations are built
//! once at startup and shared across requests behind `Arc<dyn _>`.

use async_trait::async_trait;

use crate::{EntityType, Finding, OcrResult};

/// Optical character recognition over an image reference (usually a URL).
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text. One result set per image/page, in order.
    async fn predict(&self, input: &str) -> anyhow::Result<Vec<OcrResult>>;

    fn name(&self) -> &str;
}

/// Finds PII spans in text.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Return findings restricted to `entities`. Spans are byte offsets.
    async fn analyze(
        &self,
        text: &str,
        entities: &[EntityType],
        language: &str,
    ) -> anyhow::Result<Vec<Finding>>;

    fn name(&self) -> &str;
}

/// Replaces finding spans in text.
#[async_trait]
pub trait Anonymizer: Send + Sync {
    /// With no findings the result must equal `text`.
    async fn anonymize(&self, text: &str, findings: &[Finding]) -> anyhow::Result<String>;

    fn name(&self) -> &str;
}
