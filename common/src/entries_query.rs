//! Requests issued by the browse screen against the Query Service.
//!
//! Parameters are sparse: a blank value is left out entirely, because an
//! absent parameter means "no constraint" to the Query Service while an empty
//! one would constrain on the empty string.

use serde::{Deserialize, Serialize};

use crate::filter::{ChainField, FilterDraft, SearchField};

pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// One page of entries for a given filter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntriesQuery {
    pub filters: FilterDraft,
    pub page: u64,
    pub limit: u64,
}

impl EntriesQuery {
    pub fn first_page(filters: FilterDraft) -> Self {
        Self::page(filters, 1)
    }

    pub fn page(filters: FilterDraft, page: u64) -> Self {
        Self { filters, page: page.max(1), limit: DEFAULT_PAGE_LIMIT }
    }

    /// Query string pairs, in the order the Query Service documents them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let f = &self.filters;
        let sort_by = if f.sort_by.trim().is_empty() { crate::filter::DEFAULT_SORT_BY } else { f.sort_by.trim() };
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", sort_by.to_string()),
            ("sortOrder", f.sort_order.as_str().to_string()),
        ];
        let search = f.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
            if f.search_field != SearchField::All {
                pairs.push(("field", f.search_field.as_str().to_string()));
            }
        }
        push_non_empty(&mut pairs, "disease", &f.disease);
        push_non_empty(&mut pairs, "autoantibody", &f.autoantibody);
        push_non_empty(&mut pairs, "autoantigen", &f.autoantigen);
        push_non_empty(&mut pairs, "epitope", &f.epitope);
        push_non_empty(&mut pairs, "type", &f.entry_type);
        pairs
    }
}

fn push_non_empty(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}

/// Ancestor values that scope a dependent-value request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueScope {
    pub disease: Option<String>,
    pub autoantibody: Option<String>,
    pub autoantigen: Option<String>,
}

impl ValueScope {
    pub fn unscoped() -> Self {
        Self::default()
    }

    /// Adds `field = value`, ignoring blank values. Epitope never scopes anything.
    pub fn with(mut self, field: ChainField, value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        let value = Some(value.to_string());
        match field {
            ChainField::Disease => self.disease = value,
            ChainField::Autoantibody => self.autoantibody = value,
            ChainField::Autoantigen => self.autoantigen = value,
            ChainField::Epitope => {}
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.disease.is_none() && self.autoantibody.is_none() && self.autoantigen.is_none()
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.disease {
            pairs.push(("disease", v.clone()));
        }
        if let Some(v) = &self.autoantibody {
            pairs.push(("autoantibody", v.clone()));
        }
        if let Some(v) = &self.autoantigen {
            pairs.push(("autoantigen", v.clone()));
        }
        pairs
    }
}

pub const SUGGESTION_RAW_LIMIT: u64 = 50;

/// Free-text lookup feeding the suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub term: String,
    pub field: SearchField,
    pub limit: u64,
}

impl SuggestionRequest {
    pub fn all_fields(term: impl Into<String>) -> Self {
        Self { term: term.into(), field: SearchField::All, limit: SUGGESTION_RAW_LIMIT }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.term.trim().to_string()),
            ("field", self.field.as_str().to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}
