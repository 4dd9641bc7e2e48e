//! Turns a request into the text that will be redacted

use scrub_core::{OcrEngine, Result, ScrubError, ScrubRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

pub struct InputResolver {
    engine: Arc<dyn OcrEngine>,
    timeout: Duration,
}

impl InputResolver {
    pub fn new(engine: Arc<dyn OcrEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Non-empty `text` is used verbatim and wins over `url`. Otherwise the
    /// image at `url` is run through OCR.
    pub async fn resolve(&self, request: &ScrubRequest) -> Result<String> {
        match (request.text(), request.url()) {
            (Some(text), url) => {
                if url.is_some() {
                    debug!("Both text and url supplied, using text");
                }
                Ok(text.to_string())
            }
            (None, Some(url)) => self.extract_text(url).await,
            (None, None) => Err(ScrubError::MissingInput),
        }
    }

    /// Run OCR and join the fragments of the first result set with spaces.
    pub async fn extract_text(&self, url: &str) -> Result<String> {
        let results = match tokio::time::timeout(self.timeout, self.engine.predict(url)).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                warn!(engine = self.engine.name(), error = %e, "OCR engine failed");
                return Err(ScrubError::OcrExtractionFailed);
            }
            Err(_) => {
                warn!(
                    engine = self.engine.name(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "OCR engine timed out"
                );
                return Err(ScrubError::OcrExtractionFailed);
            }
        };

        debug!(
            engine = self.engine.name(),
            result_sets = results.len(),
            fragments = results.first().map(|r| r.rec_texts.len()).unwrap_or(0),
            "OCR finished"
        );
        trace!(?results, "OCR output");

        match results.first() {
            Some(first) if !first.rec_texts.is_empty() => Ok(first.joined_text()),
            _ => Err(ScrubError::OcrExtractionFailed),
        }
    }
}
