//! Regex based PII analyzer

use anyhow::{Context, bail};
use async_trait::async_trait;
use regex::Regex;
use scrub_core::{Analyzer, DEFAULT_LANGUAGE, EntityType, Finding};
use tracing::trace;

use crate::recognizers::{RecognizerSpec, Validator, builtin_recognizers};

/// Words before a match that are searched for context cues.
const CONTEXT_WINDOW: usize = 5;
const CONTEXT_BOOST: f64 = 0.35;
const CONTEXT_MIN_SCORE: f64 = 0.4;

struct Recognizer {
    spec: RecognizerSpec,
    regex: Regex,
}

/// Built-in analyzer. Patterns are compiled once in [`PatternAnalyzer::new`].
pub struct PatternAnalyzer {
    recognizers: Vec<Recognizer>,
}

impl PatternAnalyzer {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_recognizers(builtin_recognizers())
    }

    pub fn with_recognizers(specs: Vec<RecognizerSpec>) -> anyhow::Result<Self> {
        let recognizers = specs
            .into_iter()
            .map(|spec| {
                let regex = Regex::new(&spec.pattern)
                    .with_context(|| format!("Invalid pattern for recognizer {}", spec.name))?;
                Ok(Recognizer { spec, regex })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { recognizers })
    }

    pub fn recognizer_count(&self) -> usize {
        self.recognizers.len()
    }

    /// Run every recognizer for `entities` over `text`.
    ///
    /// Identical spans of the same type are reported once, with the best
    /// score. Results are ordered by start, longer spans first.
    pub fn find(&self, text: &str, entities: &[EntityType]) -> Vec<Finding> {
        let mut findings = Vec::new();

        for recognizer in &self.recognizers {
            let spec = &recognizer.spec;
            if !entities.contains(&spec.entity) {
                continue;
            }

            for caps in recognizer.regex.captures_iter(text) {
                let (Some(whole), Some(m)) = (caps.get(0), caps.get(spec.group)) else {
                    continue;
                };
                if m.as_str().is_empty() {
                    continue;
                }

                let score = match spec.validator {
                    Validator::Checksum(check) if check(m.as_str()) => 1.0,
                    Validator::Checksum(_) => {
                        trace!(recognizer = spec.name, "Checksum rejected match");
                        continue;
                    }
                    Validator::Sanity(check) if !check(m.as_str()) => {
                        trace!(recognizer = spec.name, "Sanity check rejected match");
                        continue;
                    }
                    Validator::Sanity(_) | Validator::None => {
                        enhance(spec.score, spec.context, &text[..whole.start()])
                    }
                };

                findings.push(Finding::new(spec.entity, m.start(), m.end(), score));
            }
        }

        findings.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.end.cmp(&a.end))
                .then(a.entity_type.cmp(&b.entity_type))
                .then(b.score.total_cmp(&a.score))
        });
        findings.dedup_by(|later, earlier| {
            later.start == earlier.start
                && later.end == earlier.end
                && later.entity_type == earlier.entity_type
        });

        findings
    }
}

/// Apply the context boost when a cue word sits in the window before the match.
fn enhance(score: f64, context: &[&str], preceding: &str) -> f64 {
    if context.is_empty() || !has_context(context, preceding) {
        return score;
    }
    (score + CONTEXT_BOOST).min(1.0).max(CONTEXT_MIN_SCORE)
}

fn has_context(context: &[&str], preceding: &str) -> bool {
    preceding
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .rev()
        .take(CONTEXT_WINDOW)
        .any(|word| {
            let word = word.to_lowercase();
            context.contains(&word.as_str())
        })
}

#[async_trait]
impl Analyzer for PatternAnalyzer {
    async fn analyze(
        &self,
        text: &str,
        entities: &[EntityType],
        language: &str,
    ) -> anyhow::Result<Vec<Finding>> {
        if language != DEFAULT_LANGUAGE {
            bail!("Unsupported language: {}", language);
        }
        Ok(self.find(text, entities))
    }

    fn name(&self) -> &str {
        "builtin"
    }
}
