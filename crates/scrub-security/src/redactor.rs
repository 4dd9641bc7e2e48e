//! PII redaction stage: analyze, filter, anonymize

use scrub_core::{
    Analyzer, Anonymizer, DEFAULT_LANGUAGE, EntityType, Finding, Result, ScrubError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of redacted spans per entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummary {
    pub entity_type: EntityType,
    pub count: usize,
}

pub struct PiiRedactor {
    analyzer: Arc<dyn Analyzer>,
    anonymizer: Arc<dyn Anonymizer>,
    entities: Vec<EntityType>,
    score_threshold: f64,
    timeout: Duration,
}

impl PiiRedactor {
    pub fn new(analyzer: Arc<dyn Analyzer>, anonymizer: Arc<dyn Anonymizer>) -> Self {
        Self {
            analyzer,
            anonymizer,
            entities: EntityType::ALL.to_vec(),
            score_threshold: 0.0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_score_threshold(mut self, score_threshold: f64) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_entities(mut self, entities: Vec<EntityType>) -> Self {
        self.entities = entities;
        self
    }

    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    /// Findings for `text` that pass the entity and score filters.
    pub async fn analyze(&self, text: &str) -> Result<Vec<Finding>> {
        let findings = match tokio::time::timeout(
            self.timeout,
            self.analyzer.analyze(text, &self.entities, DEFAULT_LANGUAGE),
        )
        .await
        {
            Ok(Ok(findings)) => findings,
            Ok(Err(e)) => {
                error!(analyzer = self.analyzer.name(), error = %e, "PII analysis failed");
                return Err(ScrubError::AnalysisFailed(e.to_string()));
            }
            Err(_) => {
                error!(analyzer = self.analyzer.name(), "PII analysis timed out");
                return Err(ScrubError::AnalysisFailed("timed out".to_string()));
            }
        };

        let total = findings.len();
        let kept: Vec<Finding> = findings
            .into_iter()
            .filter(|f| self.entities.contains(&f.entity_type) && f.score >= self.score_threshold)
            .collect();

        debug!(
            analyzer = self.analyzer.name(),
            found = total,
            kept = kept.len(),
            "PII analysis finished"
        );

        Ok(kept)
    }

    pub async fn redact(&self, text: &str) -> Result<String> {
        let (redacted, _) = self.redact_with_findings(text).await?;
        Ok(redacted)
    }

    /// Redacted text together with the findings that were handed to the
    /// anonymizer.
    pub async fn redact_with_findings(&self, text: &str) -> Result<(String, Vec<Finding>)> {
        let findings = self.analyze(text).await?;

        let redacted = match tokio::time::timeout(
            self.timeout,
            self.anonymizer.anonymize(text, &findings),
        )
        .await
        {
            Ok(Ok(redacted)) => redacted,
            Ok(Err(e)) => {
                error!(anonymizer = self.anonymizer.name(), error = %e, "PII anonymization failed");
                return Err(ScrubError::AnonymizationFailed(e.to_string()));
            }
            Err(_) => {
                error!(anonymizer = self.anonymizer.name(), "PII anonymization timed out");
                return Err(ScrubError::AnonymizationFailed("timed out".to_string()));
            }
        };

        Ok((redacted, findings))
    }
}

/// Per-type counts, ordered by entity type.
pub fn summarize(findings: &[Finding]) -> Vec<RedactionSummary> {
    let mut counts: BTreeMap<EntityType, usize> = BTreeMap::new();
    for finding in findings {
        *counts.entry(finding.entity_type).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(entity_type, count)| RedactionSummary { entity_type, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PatternAnalyzer, ReplaceAnonymizer};
    use async_trait::async_trait;

    fn builtin() -> PiiRedactor {
        PiiRedactor::new(
            Arc::new(PatternAnalyzer::new().unwrap()),
            Arc::new(ReplaceAnonymizer::default()),
        )
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl Analyzer for FailingAnalyzer {
        async fn analyze(
            &self,
            _text: &str,
            _entities: &[EntityType],
            _language: &str,
        ) -> anyhow::Result<Vec<Finding>> {
            anyhow::bail!("model not loaded")
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowAnalyzer;

    #[async_trait]
    impl Analyzer for SlowAnalyzer {
        async fn analyze(
            &self,
            _text: &str,
            _entities: &[EntityType],
            _language: &str,
        ) -> anyhow::Result<Vec<Finding>> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FailingAnonymizer;

    #[async_trait]
    impl Anonymizer for FailingAnonymizer {
        async fn anonymize(&self, _text: &str, _findings: &[Finding]) -> anyhow::Result<String> {
            anyhow::bail!("operator rejected")
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_email_redacted() {
        let out = builtin().redact("My email is a@b.com").await.unwrap();

        assert!(!out.contains("a@b.com"));
        assert!(out.contains("<EMAIL_ADDRESS>"));
    }

    #[tokio::test]
    async fn test_identity_without_pii() {
        let text = "The meeting moved to the small room on the third floor.";
        assert_eq!(builtin().redact(text).await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let redactor = builtin();
        let text = "Dear Jane Doe, call 555-123-4567 or write to jane@example.com. \
                    Card 4111 1111 1111 1111, SSN 536-22-1234, from 192.168.1.20 in Boston.";

        let once = redactor.redact(text).await.unwrap();
        let twice = redactor.redact(&once).await.unwrap();

        assert_eq!(once, twice);
        for secret in ["Jane Doe", "555-123-4567", "jane@example.com", "4111", "536-22-1234", "Boston"] {
            assert!(!once.contains(secret), "{} leaked in {}", secret, once);
        }
    }

    #[tokio::test]
    async fn test_invalid_card_not_redacted() {
        let out = builtin()
            .with_entities(vec![EntityType::CreditCard])
            .redact("card 4111 1111 1111 1112")
            .await
            .unwrap();

        assert_eq!(out, "card 4111 1111 1111 1112");
    }

    #[tokio::test]
    async fn test_score_threshold_filters_weak_findings() {
        let redactor = builtin().with_score_threshold(0.5);

        let (out, findings) = redactor
            .redact_with_findings("reach 555-123-4567 or a@b.com")
            .await
            .unwrap();

        assert!(out.contains("555-123-4567"));
        assert!(!out.contains("a@b.com"));
        assert!(findings.iter().all(|f| f.score >= 0.5));
    }

    #[tokio::test]
    async fn test_context_lifts_weak_finding_over_threshold() {
        let redactor = builtin().with_score_threshold(0.5);

        let out = redactor.redact("phone: 555-123-4567").await.unwrap();

        assert_eq!(out, "phone: <PHONE_NUMBER>");
    }

    #[tokio::test]
    async fn test_analyzer_failure() {
        let redactor = PiiRedactor::new(
            Arc::new(FailingAnalyzer),
            Arc::new(ReplaceAnonymizer::default()),
        );

        let err = redactor.redact("anything").await.unwrap_err();

        assert!(matches!(err, ScrubError::AnalysisFailed(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_analyzer_timeout() {
        let redactor = PiiRedactor::new(
            Arc::new(SlowAnalyzer),
            Arc::new(ReplaceAnonymizer::default()),
        )
        .with_timeout(Duration::from_millis(50));

        let err = redactor.redact("anything").await.unwrap_err();

        assert!(matches!(err, ScrubError::AnalysisFailed(_)));
    }

    #[tokio::test]
    async fn test_anonymizer_failure() {
        let redactor = PiiRedactor::new(
            Arc::new(PatternAnalyzer::new().unwrap()),
            Arc::new(FailingAnonymizer),
        );

        let err = redactor.redact("a@b.com").await.unwrap_err();

        assert!(matches!(err, ScrubError::AnonymizationFailed(_)));
    }

    #[test]
    fn test_summarize() {
        let findings = vec![
            Finding::new(EntityType::EmailAddress, 0, 5, 1.0),
            Finding::new(EntityType::Person, 6, 10, 0.85),
            Finding::new(EntityType::EmailAddress, 11, 16, 1.0),
        ];

        assert_eq!(
            summarize(&findings),
            vec![
                RedactionSummary {
                    entity_type: EntityType::Person,
                    count: 1
                },
                RedactionSummary {
                    entity_type: EntityType::EmailAddress,
                    count: 2
                },
            ]
        );
    }
}
