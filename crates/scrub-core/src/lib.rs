//! Core domain models for scrub
//!
//! This crate contains:
//! - Request/response shapes of the redaction endpoint
//! - Entity types, findings and anonymization operators
//! - The engine traits (OCR, analysis, anonymization)
//! - The error taxonomy shared by every stage

pub mod engine;
pub mod entity;
pub mod error;
pub mod finding;
pub mod ocr;
pub mod operator;
pub mod request;

pub use engine::{Analyzer, Anonymizer, OcrEngine};
pub use entity::{EntityType, UnknownEntityType};
pub use error::{Result, ScrubError};
pub use finding::Finding;
pub use ocr::OcrResult;
pub use operator::Operator;
pub use request::{ScrubOutput, ScrubRequest, ScrubResponse};

/// The only language the analysis stage is run with.
pub const DEFAULT_LANGUAGE: &str = "en";
