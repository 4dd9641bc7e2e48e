//! Span replacement
//!
//! Findings from any analyzer may overlap. [`resolve_conflicts`] reduces them
//! to a sorted, non-overlapping list before the operator is applied.

use async_trait::async_trait;
use scrub_core::{Anonymizer, Finding, Operator};
use std::cmp::Ordering;

pub struct ReplaceAnonymizer {
    operator: Operator,
}

impl ReplaceAnonymizer {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn anonymize_text(&self, text: &str, findings: &[Finding]) -> String {
        let spans = resolve_conflicts(text, findings);
        if spans.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for finding in &spans {
            out.push_str(&text[cursor..finding.start]);
            out.push_str(
                &self
                    .operator
                    .apply(&text[finding.start..finding.end], finding.entity_type),
            );
            cursor = finding.end;
        }
        out.push_str(&text[cursor..]);

        out
    }
}

impl Default for ReplaceAnonymizer {
    fn default() -> Self {
        Self::new(Operator::default())
    }
}

#[async_trait]
impl Anonymizer for ReplaceAnonymizer {
    async fn anonymize(&self, text: &str, findings: &[Finding]) -> anyhow::Result<String> {
        Ok(self.anonymize_text(text, findings))
    }

    fn name(&self) -> &str {
        "builtin"
    }
}

/// Ordered, non-overlapping spans that are safe to slice `text` with.
pub fn resolve_conflicts(text: &str, findings: &[Finding]) -> Vec<Finding> {
    let valid: Vec<Finding> = findings
        .iter()
        .filter(|f| {
            !f.is_empty()
                && f.end <= text.len()
                && text.is_char_boundary(f.start)
                && text.is_char_boundary(f.end)
        })
        .cloned()
        .collect();

    let merged = merge_same_type(valid);

    let kept: Vec<Finding> = merged
        .iter()
        .enumerate()
        .filter(|(i, finding)| {
            !merged
                .iter()
                .enumerate()
                .any(|(j, other)| j != *i && dominates(other, j, finding, *i))
        })
        .map(|(_, finding)| finding.clone())
        .collect();

    let mut sorted = kept;
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut resolved: Vec<Finding> = Vec::with_capacity(sorted.len());
    for mut finding in sorted {
        if let Some(prev) = resolved.last()
            && finding.start < prev.end
        {
            finding.start = prev.end;
        }
        if finding.start < finding.end {
            resolved.push(finding);
        }
    }

    resolved
}

/// Union overlapping findings of the same type, keeping the best score.
fn merge_same_type(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by(|a, b| {
        a.entity_type
            .cmp(&b.entity_type)
            .then(a.start.cmp(&b.start))
            .then(b.end.cmp(&a.end))
    });

    let mut merged: Vec<Finding> = Vec::with_capacity(findings.len());
    for finding in findings {
        match merged.last_mut() {
            Some(last) if last.entity_type == finding.entity_type && last.overlaps(&finding) => {
                last.end = last.end.max(finding.end);
                last.score = last.score.max(finding.score);
            }
            _ => merged.push(finding),
        }
    }

    merged
}

/// Whether `other` (at index `j`) swallows `finding` (at index `i`).
///
/// Contained findings lose to a container with a higher or equal score. Two
/// findings with the same span are separated by score, then by index.
fn dominates(other: &Finding, j: usize, finding: &Finding, i: usize) -> bool {
    if !other.contains(finding) {
        return false;
    }
    match other.score.total_cmp(&finding.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => other.len() > finding.len() || j < i,
    }
}
