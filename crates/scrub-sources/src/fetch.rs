use anyhow::{Context, bail};
use std::time::Duration;

/// Downloads images for local OCR engines.
pub struct ImageFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ImageFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, max_bytes })
    }

    pub async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        validate_url(url)?;

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch image: {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP error {}: {}", response.status().as_u16(), url);
        }

        if let Some(len) = response.content_length()
            && len > self.max_bytes
        {
            bail!("Image is {} bytes, limit is {}", len, self.max_bytes);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read image body")?
        {
            body.extend_from_slice(&chunk);
            if body.len() as u64 > self.max_bytes {
                bail!("Image exceeds {} bytes", self.max_bytes);
            }
        }

        if body.is_empty() {
            bail!("Image body is empty: {}", url);
        }

        Ok(body)
    }
}

/// Only http(s) URLs are fetched; local paths and other schemes are refused.
pub fn validate_url(url: &str) -> anyhow::Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("URL must start with http:// or https://: {}", url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_server, received};
    use axum::http::{Method, StatusCode};

    fn fetcher(max_bytes: u64) -> ImageFetcher {
        ImageFetcher::new(Duration::from_secs(5), max_bytes).unwrap()
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://example.com/a.png").is_ok());
        assert!(validate_url("https://example.com/a.png").is_ok());
        assert!(validate_url("/etc/passwd").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("ftp://example.com/a.png").is_err());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let (base, captured) =
            mock_server("/scan.png", StatusCode::OK, "image/png", b"\x89PNG fake".to_vec()).await;

        let bytes = fetcher(1024)
            .fetch(&format!("{}/scan.png", base))
            .await
            .unwrap();

        assert_eq!(bytes, b"\x89PNG fake");
        assert_eq!(received(&captured).method, Method::GET);
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let (base, _) = mock_server(
            "/missing.png",
            StatusCode::NOT_FOUND,
            "text/plain",
            b"missing".to_vec(),
        )
        .await;

        let err = fetcher(1024)
            .fetch(&format!("{}/missing.png", base))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_enforces_size_limit() {
        let (base, _) = mock_server("/big.png", StatusCode::OK, "image/png", vec![0u8; 64]).await;

        let result = fetcher(16).fetch(&format!("{}/big.png", base)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_refuses_local_paths() {
        assert!(fetcher(1024).fetch("/tmp/image.png").await.is_err());
    }
}
