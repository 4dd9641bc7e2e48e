use serde::{Deserialize, Serialize};

/// Text recognized in one image, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(default)]
    pub rec_texts: Vec<String>,
    #[serde(default)]
    pub rec_scores: Vec<f64>,
}

impl OcrResult {
    pub fn new(rec_texts: Vec<String>) -> Self {
        Self {
            rec_texts,
            rec_scores: Vec::new(),
        }
    }

    /// Fragments joined with single spaces.
    pub fn joined_text(&self) -> String {
        self.rec_texts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_text() {
        let result = OcrResult::new(vec![
            "Invoice".to_string(),
            "John Smith".to_string(),
            "555-123-4567".to_string(),
        ]);
        assert_eq!(result.joined_text(), "Invoice John Smith 555-123-4567");
    }

    #[test]
    fn test_scores_default_when_missing() {
        let result: OcrResult = serde_json::from_str(r#"{"rec_texts": ["a"]}"#).unwrap();
        assert!(result.rec_scores.is_empty());
    }
}
