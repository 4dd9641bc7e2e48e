use thiserror::Error;

/// Failures a single redaction request can end in.
///
/// The first four are caller mistakes and carry the exact message returned
/// to the client. The engine failures keep their cause for logging only.
#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("Request body must be JSON")]
    InvalidBody,

    #[error("Provide at least one of: 'text', 'url'")]
    MissingInput,

    #[error("OCR failed to extract text from the image")]
    OcrExtractionFailed,

    #[error("Request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    #[error("PII analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("PII anonymization failed: {0}")]
    AnonymizationFailed(String),
}

impl ScrubError {
    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScrubError::InvalidBody
                | ScrubError::MissingInput
                | ScrubError::OcrExtractionFailed
                | ScrubError::BodyTooLarge(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrubError>;
