//! Request and response bodies of the redaction endpoint

use serde::{Deserialize, Serialize};

use crate::{Result, ScrubError};

/// Body of `POST /api/endpoint`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrubRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ScrubRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            text: None,
            url: Some(url.into()),
        }
    }

    /// Parse a raw body. Anything but a JSON object with string-or-null
    /// `text`/`url` fields is rejected as `InvalidBody`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| ScrubError::InvalidBody)?;

        if !value.is_object() {
            return Err(ScrubError::InvalidBody);
        }

        serde_json::from_value(value).map_err(|_| ScrubError::InvalidBody)
    }

    /// `text`, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// `url`, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubOutput {
    pub anonymized_text: String,
}

/// Success body: `{"output": {"anonymized_text": ...}, "status": "ok"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrubResponse {
    pub output: ScrubOutput,
    pub status: String,
}

impl ScrubResponse {
    pub fn ok(anonymized_text: String) -> Self {
        Self {
            output: ScrubOutput { anonymized_text },
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_request() {
        let req = ScrubRequest::from_json(br#"{"text": "hello"}"#).unwrap();
        assert_eq!(req.text(), Some("hello"));
        assert_eq!(req.url(), None);
    }

    #[test]
    fn test_parse_ignores_unknown_fields_and_nulls() {
        let req = ScrubRequest::from_json(br#"{"text": null, "url": "http://x/a.png", "lang": "en"}"#)
            .unwrap();
        assert_eq!(req.text(), None);
        assert_eq!(req.url(), Some("http://x/a.png"));
    }

    #[test]
    fn test_empty_object_is_valid_json() {
        let req = ScrubRequest::from_json(b"{}").unwrap();
        assert_eq!(req, ScrubRequest::default());
    }

    #[test]
    fn test_invalid_bodies() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"not json",
            b"[]",
            b"null",
            b"\"text\"",
            br#"{"text": 42}"#,
        ];
        for body in bodies {
            assert!(
                matches!(ScrubRequest::from_json(body), Err(ScrubError::InvalidBody)),
                "expected InvalidBody for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let req = ScrubRequest {
            text: Some(String::new()),
            url: Some(String::new()),
        };
        assert_eq!(req.text(), None);
        assert_eq!(req.url(), None);
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(ScrubResponse::ok("Hi <PERSON>".to_string())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"output": {"anonymized_text": "Hi <PERSON>"}, "status": "ok"})
        );
    }
}
