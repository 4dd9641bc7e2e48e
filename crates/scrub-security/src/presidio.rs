//! Clients for the Presidio analyzer and anonymizer REST services
//!
//! Presidio reports and expects character offsets. Findings inside this crate
//! use byte offsets, so both directions are converted here.

use anyhow::{Context, bail};
use async_trait::async_trait;
use scrub_core::{Analyzer, Anonymizer, EntityType, Finding, Operator};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("scrub/", env!("CARGO_PKG_VERSION"));

fn http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

async fn post_json<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    body: &T,
) -> anyhow::Result<reqwest::Response> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("Failed to reach Presidio at {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Presidio returned HTTP {}: {}", status.as_u16(), body);
    }

    Ok(response)
}

/// Byte offset of every char boundary, indexed by char position.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn byte_to_char(text: &str, byte: usize) -> usize {
    text.get(..byte).map(|s| s.chars().count()).unwrap_or(0)
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
    entities: Vec<&'static str>,
    score_threshold: f64,
}

#[derive(Serialize, Deserialize)]
struct RecognizerResult {
    entity_type: String,
    start: usize,
    end: usize,
    score: f64,
}

pub struct PresidioAnalyzer {
    client: reqwest::Client,
    endpoint: String,
    score_threshold: f64,
}

impl PresidioAnalyzer {
    pub fn new(endpoint: &str, score_threshold: f64, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            score_threshold,
        })
    }
}

#[async_trait]
impl Analyzer for PresidioAnalyzer {
    async fn analyze(
        &self,
        text: &str,
        entities: &[EntityType],
        language: &str,
    ) -> anyhow::Result<Vec<Finding>> {
        let url = format!("{}/analyze", self.endpoint);
        let request = AnalyzeRequest {
            text,
            language,
            entities: entities.iter().map(EntityType::as_str).collect(),
            score_threshold: self.score_threshold,
        };

        let results: Vec<RecognizerResult> = post_json(&self.client, &url, &request)
            .await?
            .json()
            .await
            .context("Failed to decode Presidio analyzer response")?;

        let boundaries = char_boundaries(text);
        let mut findings = Vec::with_capacity(results.len());
        for result in results {
            let Ok(entity_type) = result.entity_type.parse::<EntityType>() else {
                debug!(entity_type = %result.entity_type, "Ignoring unknown entity type");
                continue;
            };
            let (Some(&start), Some(&end)) =
                (boundaries.get(result.start), boundaries.get(result.end))
            else {
                bail!(
                    "Presidio returned span {}..{} outside the text",
                    result.start,
                    result.end
                );
            };
            findings.push(Finding::new(entity_type, start, end, result.score));
        }

        Ok(findings)
    }

    fn name(&self) -> &str {
        "presidio"
    }
}

#[derive(Serialize)]
struct AnonymizeRequest<'a> {
    text: &'a str,
    analyzer_results: Vec<RecognizerResult>,
    anonymizers: HashMap<&'static str, Value>,
}

#[derive(Deserialize)]
struct AnonymizeResponse {
    text: String,
}

pub struct PresidioAnonymizer {
    client: reqwest::Client,
    endpoint: String,
    operator: Operator,
}

impl PresidioAnonymizer {
    pub fn new(endpoint: &str, operator: Operator, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            operator,
        })
    }

    /// Operator config in Presidio's shape. Presidio requires `chars_to_mask`,
    /// so an unset value becomes the whole text length.
    fn operator_config(&self, text: &str) -> anyhow::Result<Value> {
        let mut config =
            serde_json::to_value(&self.operator).context("Failed to encode operator")?;
        if let Operator::Mask {
            chars_to_mask: None,
            ..
        } = self.operator
            && let Some(object) = config.as_object_mut()
        {
            object.insert("chars_to_mask".to_string(), json!(text.chars().count()));
        }
        Ok(config)
    }
}

#[async_trait]
impl Anonymizer for PresidioAnonymizer {
    async fn anonymize(&self, text: &str, findings: &[Finding]) -> anyhow::Result<String> {
        if findings.is_empty() {
            return Ok(text.to_string());
        }

        let url = format!("{}/anonymize", self.endpoint);
        let request = AnonymizeRequest {
            text,
            analyzer_results: findings
                .iter()
                .map(|f| RecognizerResult {
                    entity_type: f.entity_type.as_str().to_string(),
                    start: byte_to_char(text, f.start),
                    end: byte_to_char(text, f.end),
                    score: f.score,
                })
                .collect(),
            anonymizers: HashMap::from([("DEFAULT", self.operator_config(text)?)]),
        };

        let response: AnonymizeResponse = post_json(&self.client, &url, &request)
            .await?
            .json()
            .await
            .context("Failed to decode Presidio anonymizer response")?;

        Ok(response.text)
    }

    fn name(&self) -> &str {
        "presidio"
    }
}
