//! PII detection and anonymization
//!
//! - [`PatternAnalyzer`]: built-in regex, checksum and context recognizers
//! - [`ReplaceAnonymizer`]: built-in span replacement with overlap resolution
//! - [`PresidioAnalyzer`] / [`PresidioAnonymizer`]: remote Presidio services
//! - [`PiiRedactor`]: the redaction stage tying an analyzer to an anonymizer

pub mod analyzer;
pub mod anonymizer;
pub mod gazetteer;
pub mod presidio;
pub mod recognizers;
pub mod redactor;
pub mod validators;

pub use analyzer::PatternAnalyzer;
pub use anonymizer::{ReplaceAnonymizer, resolve_conflicts};
pub use presidio::{PresidioAnalyzer, PresidioAnonymizer};
pub use recognizers::{RecognizerSpec, Validator, builtin_recognizers};
pub use redactor::{PiiRedactor, RedactionSummary, summarize};
