//! Anonymization operators

use serde::{Deserialize, Serialize};

use crate::EntityType;

/// What replaces a finding's span.
///
/// The serialized form (`{"type": "replace", ...}`) matches the operator
/// config accepted by Presidio's anonymizer API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operator {
    /// Substitute `new_value`, or `<ENTITY_TYPE>` when unset.
    Replace {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_value: Option<String>,
    },
    /// Remove the span entirely.
    Redact,
    /// Overwrite characters with `masking_char`; every character when
    /// `chars_to_mask` is unset.
    Mask {
        #[serde(default = "default_masking_char")]
        masking_char: char,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chars_to_mask: Option<usize>,
        #[serde(default)]
        from_end: bool,
    },
}

fn default_masking_char() -> char {
    '*'
}

impl Default for Operator {
    fn default() -> Self {
        Operator::Replace { new_value: None }
    }
}

impl Operator {
    pub fn apply(&self, original: &str, entity_type: EntityType) -> String {
        match self {
            Operator::Replace { new_value } => new_value
                .clone()
                .unwrap_or_else(|| entity_type.placeholder()),
            Operator::Redact => String::new(),
            Operator::Mask {
                masking_char,
                chars_to_mask,
                from_end,
            } => {
                let total = original.chars().count();
                let count = chars_to_mask.unwrap_or(total).min(total);
                let masked_from = if *from_end { total - count } else { 0 };
                let masked_to = masked_from + count;

                original
                    .chars()
                    .enumerate()
                    .map(|(i, c)| {
                        if i >= masked_from && i < masked_to {
                            *masking_char
                        } else {
                            c
                        }
                    })
                    .collect()
            }
        }
    }
}
