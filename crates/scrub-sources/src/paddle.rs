//! PaddleX OCR serving client
//!
//! Talks to the `/ocr` endpoint exposed by `paddlex --serve --pipeline OCR`.
//! The image is passed by reference (URL) and the server downloads it.

use anyhow::{Context, bail};
use async_trait::async_trait;
use scrub_core::{OcrEngine, OcrResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// `fileType` value for images (0 is PDF).
const FILE_TYPE_IMAGE: u8 = 1;

pub struct PaddleServingEngine {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct OcrRequest<'a> {
    file: &'a str,
    #[serde(rename = "fileType")]
    file_type: u8,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(rename = "errorCode", default)]
    error_code: i64,
    #[serde(rename = "errorMsg", default)]
    error_msg: String,
    #[serde(default)]
    result: Option<OcrPayload>,
}

#[derive(Deserialize)]
struct OcrPayload {
    #[serde(rename = "ocrResults", default)]
    ocr_results: Vec<PageResult>,
}

#[derive(Deserialize)]
struct PageResult {
    #[serde(rename = "prunedResult")]
    pruned_result: OcrResult,
}

impl PaddleServingEngine {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl OcrEngine for PaddleServingEngine {
    async fn predict(&self, input: &str) -> anyhow::Result<Vec<OcrResult>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&OcrRequest {
                file: input,
                file_type: FILE_TYPE_IMAGE,
            })
            .send()
            .await
            .with_context(|| format!("Failed to reach OCR service at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("OCR service returned HTTP {}: {}", status.as_u16(), body);
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .context("Failed to decode OCR service response")?;

        if parsed.error_code != 0 {
            bail!(
                "OCR service error {}: {}",
                parsed.error_code,
                parsed.error_msg
            );
        }

        let results: Vec<OcrResult> = parsed
            .result
            .map(|payload| {
                payload
                    .ocr_results
                    .into_iter()
                    .map(|page| page.pruned_result)
                    .collect()
            })
            .unwrap_or_default();

        debug!(pages = results.len(), "PaddleX OCR response received");

        Ok(results)
    }

    fn name(&self) -> &str {
        "paddle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_server, received};
    use axum::http::{Method, StatusCode};

    fn engine(base: &str) -> PaddleServingEngine {
        PaddleServingEngine::new(format!("{}/ocr", base), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_predict_maps_pruned_results() {
        let body = serde_json::json!({
            "logId": "abc",
            "errorCode": 0,
            "errorMsg": "Success",
            "result": {
                "ocrResults": [
                    {
                        "prunedResult": {
                            "rec_texts": ["Name: Jane Doe", "jane@example.com"],
                            "rec_scores": [0.98, 0.95],
                            "rec_polys": []
                        },
                        "ocrImage": null
                    }
                ],
                "dataInfo": {"width": 100, "height": 50, "type": "image"}
            }
        });
        let (base, captured) = mock_server(
            "/ocr",
            StatusCode::OK,
            "application/json",
            body.to_string().into_bytes(),
        )
        .await;

        let results = engine(&base)
            .predict("http://images.local/card.png")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].rec_texts,
            vec!["Name: Jane Doe".to_string(), "jane@example.com".to_string()]
        );
        assert_eq!(results[0].rec_scores, vec![0.98, 0.95]);

        let request = received(&captured);
        assert_eq!(request.method, Method::POST);
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent["file"], "http://images.local/card.png");
        assert_eq!(sent["fileType"], 1);
    }

    #[tokio::test]
    async fn test_predict_empty_results() {
        let body = serde_json::json!({
            "errorCode": 0,
            "errorMsg": "Success",
            "result": {"ocrResults": []}
        });
        let (base, _) = mock_server(
            "/ocr",
            StatusCode::OK,
            "application/json",
            body.to_string().into_bytes(),
        )
        .await;

        let results = engine(&base).predict("http://x/empty.png").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_predict_service_error() {
        let body = serde_json::json!({
            "errorCode": 422,
            "errorMsg": "Failed to download file"
        });
        let (base, _) = mock_server(
            "/ocr",
            StatusCode::UNPROCESSABLE_ENTITY,
            "application/json",
            body.to_string().into_bytes(),
        )
        .await;

        let err = engine(&base).predict("http://x/a.png").await.unwrap_err();

        assert!(err.to_string().contains("422"));
    }

    #[tokio::test]
    async fn test_predict_error_code_in_ok_response() {
        let body = serde_json::json!({"errorCode": 500, "errorMsg": "Internal error"});
        let (base, _) = mock_server(
            "/ocr",
            StatusCode::OK,
            "application/json",
            body.to_string().into_bytes(),
        )
        .await;

        let err = engine(&base).predict("http://x/a.png").await.unwrap_err();

        assert!(err.to_string().contains("Internal error"));
    }
}
