use serde::{Deserialize, Serialize};

use crate::EntityType;

/// A detected PII occurrence.
///
/// `start`/`end` are byte offsets into the analysed text (`end` exclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

impl Finding {
    pub fn new(entity_type: EntityType, start: usize, end: usize, score: f64) -> Self {
        Self {
            entity_type,
            start,
            end,
            score,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn overlaps(&self, other: &Finding) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Finding) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The matched slice, if the span is valid for `text`.
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_containment() {
        let outer = Finding::new(EntityType::Person, 0, 10, 0.85);
        let inner = Finding::new(EntityType::Location, 2, 5, 0.85);
        let touching = Finding::new(EntityType::Age, 10, 12, 0.6);

        assert!(outer.overlaps(&inner));
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.overlaps(&touching));
    }

    #[test]
    fn test_text_slice() {
        let finding = Finding::new(EntityType::EmailAddress, 12, 19, 1.0);
        assert_eq!(finding.text("My email is a@b.com"), Some("a@b.com"));
        assert_eq!(Finding::new(EntityType::Age, 5, 50, 1.0).text("short"), None);
    }
}
