//! Groups raw free-text matches into per-field suggestion lists.

use crate::{disease_entry::Entry, filter::ChainField};

use super::constants::SUGGESTIONS_PER_GROUP;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionGroup {
    pub field: ChainField,
    pub values: Vec<String>,
}

/// Distinct matching values per chain field, first seen first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionIndex {
    groups: Vec<SuggestionGroup>,
}

impl Default for SuggestionIndex {
    fn default() -> Self {
        Self { groups: ChainField::ALL.into_iter().map(|field| SuggestionGroup { field, values: Vec::new() }).collect() }
    }
}

impl SuggestionIndex {
    /// Keeps the first [`SUGGESTIONS_PER_GROUP`] distinct trimmed values of each
    /// field, in the order the Query Service ranked the matches. Exact-string,
    /// case-sensitive dedup; blank values are skipped.
    pub fn build(matches: &[Entry]) -> Self {
        let mut index = Self::default();
        for group in &mut index.groups {
            for entry in matches {
                if group.values.len() >= SUGGESTIONS_PER_GROUP {
                    break;
                }
                let Some(value) = field_value(entry, group.field) else { continue };
                let value = value.trim();
                if value.is_empty() || group.values.iter().any(|v| v == value) {
                    continue;
                }
                group.values.push(value.to_string());
            }
        }
        index
    }

    pub fn groups(&self) -> &[SuggestionGroup] {
        &self.groups
    }

    pub fn values(&self, field: ChainField) -> &[String] {
        self.groups.iter().find(|g| g.field == field).map(|g| g.values.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.values.is_empty())
    }
}

fn field_value(entry: &Entry, field: ChainField) -> Option<&str> {
    match field {
        ChainField::Disease => Some(&entry.disease),
        ChainField::Autoantibody => Some(&entry.autoantibody),
        ChainField::Autoantigen => Some(&entry.autoantigen),
        ChainField::Epitope => entry.epitope.as_deref(),
    }
}
