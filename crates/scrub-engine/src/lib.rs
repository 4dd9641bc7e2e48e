//! Request pipeline: resolve input, then redact it

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use scrub_config::{Config, OcrEngineKind, PiiEngineKind};
use scrub_core::{Analyzer, Anonymizer, Finding, OcrEngine, ScrubRequest};
use scrub_security::{
    PatternAnalyzer, PiiRedactor, PresidioAnalyzer, PresidioAnonymizer, ReplaceAnonymizer,
};
use scrub_sources::{
    DisabledOcrEngine, ImageFetcher, InputResolver, PaddleServingEngine, TesseractEngine,
};
use tracing::{debug, info};

pub struct Scrubber {
    resolver: InputResolver,
    redactor: PiiRedactor,
}

impl Scrubber {
    pub fn new(resolver: InputResolver, redactor: PiiRedactor) -> Self {
        Self { resolver, redactor }
    }

    /// Build every engine named in `config`. Called once at startup.
    pub fn from_config(config: &Config) -> Result<Self> {
        let ocr_timeout = Duration::from_secs(config.ocr.timeout_secs);
        let analyzer_timeout = Duration::from_secs(config.analyzer.timeout_secs);

        let ocr: Arc<dyn OcrEngine> = match config.ocr.engine {
            OcrEngineKind::Paddle => Arc::new(PaddleServingEngine::new(
                config.ocr.endpoint.clone(),
                ocr_timeout,
            )?),
            OcrEngineKind::Tesseract => {
                let fetcher = ImageFetcher::new(ocr_timeout, config.ocr.max_image_bytes)?;
                Arc::new(TesseractEngine::new(config.ocr.language.clone(), fetcher)?)
            }
            OcrEngineKind::Disabled => Arc::new(DisabledOcrEngine),
        };

        let analyzer: Arc<dyn Analyzer> = match config.analyzer.engine {
            PiiEngineKind::Builtin => Arc::new(PatternAnalyzer::new()?),
            PiiEngineKind::Presidio => Arc::new(PresidioAnalyzer::new(
                &config.analyzer.endpoint,
                config.analyzer.score_threshold,
                analyzer_timeout,
            )?),
        };

        let anonymizer: Arc<dyn Anonymizer> = match config.anonymizer.engine {
            PiiEngineKind::Builtin => {
                Arc::new(ReplaceAnonymizer::new(config.anonymizer.operator.clone()))
            }
            PiiEngineKind::Presidio => Arc::new(PresidioAnonymizer::new(
                &config.anonymizer.endpoint,
                config.anonymizer.operator.clone(),
                analyzer_timeout,
            )?),
        };

        info!(
            ocr = ocr.name(),
            analyzer = analyzer.name(),
            anonymizer = anonymizer.name(),
            "Engines ready"
        );

        let resolver = InputResolver::new(ocr, ocr_timeout);
        let redactor = PiiRedactor::new(analyzer, anonymizer)
            .with_score_threshold(config.analyzer.score_threshold)
            .with_timeout(analyzer_timeout);

        Ok(Self::new(resolver, redactor))
    }

    /// Resolve the request's input and return it with PII replaced.
    pub async fn process(&self, request: &ScrubRequest) -> scrub_core::Result<String> {
        let (redacted, _) = self.process_with_findings(request).await?;
        Ok(redacted)
    }

    /// Like [`Scrubber::process`], also returning the findings that were
    /// replaced (offsets refer to the resolved input, not the output).
    pub async fn process_with_findings(
        &self,
        request: &ScrubRequest,
    ) -> scrub_core::Result<(String, Vec<Finding>)> {
        let text = self.resolver.resolve(request).await?;
        debug!(chars = text.chars().count(), "Input resolved");

        self.redactor.redact_with_findings(&text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scrub_core::{OcrResult, ScrubError};

    struct CannedOcr(Vec<OcrResult>);

    #[async_trait]
    impl OcrEngine for CannedOcr {
        async fn predict(&self, _input: &str) -> anyhow::Result<Vec<OcrResult>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn scrubber(ocr: Vec<OcrResult>) -> Scrubber {
        Scrubber::new(
            InputResolver::new(Arc::new(CannedOcr(ocr)), Duration::from_secs(5)),
            PiiRedactor::new(
                Arc::new(PatternAnalyzer::new().unwrap()),
                Arc::new(ReplaceAnonymizer::default()),
            ),
        )
    }

    #[tokio::test]
    async fn test_text_request() {
        let out = scrubber(vec![])
            .process(&ScrubRequest::from_text("My email is a@b.com"))
            .await
            .unwrap();

        assert_eq!(out, "My email is <EMAIL_ADDRESS>");
    }

    #[tokio::test]
    async fn test_image_request() {
        let ocr = vec![OcrResult::new(vec![
            "Contact:".to_string(),
            "jane@example.com".to_string(),
        ])];

        let out = scrubber(ocr)
            .process(&ScrubRequest::from_url("http://example.com/card.png"))
            .await
            .unwrap();

        assert_eq!(out, "Contact: <EMAIL_ADDRESS>");
    }

    #[tokio::test]
    async fn test_findings_returned() {
        let (out, findings) = scrubber(vec![])
            .process_with_findings(&ScrubRequest::from_text("mail a@b.com"))
            .await
            .unwrap();

        assert_eq!(out, "mail <EMAIL_ADDRESS>");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text("mail a@b.com"), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_empty_ocr_result() {
        let err = scrubber(vec![])
            .process(&ScrubRequest::from_url("http://example.com/empty.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScrubError::OcrExtractionFailed));
    }

    #[tokio::test]
    async fn test_missing_input() {
        let err = scrubber(vec![])
            .process(&ScrubRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ScrubError::MissingInput));
    }

    #[test]
    fn test_from_default_config_without_ocr() {
        let mut config = Config::default();
        config.ocr.engine = OcrEngineKind::Disabled;

        assert!(Scrubber::from_config(&config).is_ok());
    }

    #[test]
    fn test_from_config_presidio() {
        let mut config = Config::default();
        config.ocr.engine = OcrEngineKind::Disabled;
        config.analyzer.engine = PiiEngineKind::Presidio;
        config.anonymizer.engine = PiiEngineKind::Presidio;

        assert!(Scrubber::from_config(&config).is_ok());
    }
}
