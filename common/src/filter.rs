//! Filter fields and the filter set used by the disease browse screen.

use serde::{Deserialize, Serialize};

/// The dependent filter chain: disease -> autoantibody -> autoantigen -> epitope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainField {
    Disease,
    Autoantibody,
    Autoantigen,
    Epitope,
}

impl ChainField {
    /// Chain order, root first.
    pub const ALL: [ChainField; 4] = [ChainField::Disease, ChainField::Autoantibody, ChainField::Autoantigen, ChainField::Epitope];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainField::Disease => "disease",
            ChainField::Autoantibody => "autoantibody",
            ChainField::Autoantigen => "autoantigen",
            ChainField::Epitope => "epitope",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChainField::Disease => "Disease",
            ChainField::Autoantibody => "Autoantibody",
            ChainField::Autoantigen => "Autoantigen",
            ChainField::Epitope => "Epitope",
        }
    }

    pub fn parent(&self) -> Option<ChainField> {
        match self {
            ChainField::Disease => None,
            ChainField::Autoantibody => Some(ChainField::Disease),
            ChainField::Autoantigen => Some(ChainField::Autoantibody),
            ChainField::Epitope => Some(ChainField::Autoantigen),
        }
    }

    /// Every field below this one in the chain, nearest first.
    pub fn descendants(&self) -> &'static [ChainField] {
        match self {
            ChainField::Disease => &[ChainField::Autoantibody, ChainField::Autoantigen, ChainField::Epitope],
            ChainField::Autoantibody => &[ChainField::Autoantigen, ChainField::Epitope],
            ChainField::Autoantigen => &[ChainField::Epitope],
            ChainField::Epitope => &[],
        }
    }

    pub fn parse(s: &str) -> Option<ChainField> {
        ChainField::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl std::fmt::Display for ChainField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scope of the free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    All,
    Disease,
    Autoantibody,
    Autoantigen,
    Epitope,
    Type,
}

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::All,
        SearchField::Disease,
        SearchField::Autoantibody,
        SearchField::Autoantigen,
        SearchField::Epitope,
        SearchField::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::All => "all",
            SearchField::Disease => "disease",
            SearchField::Autoantibody => "autoantibody",
            SearchField::Autoantigen => "autoantigen",
            SearchField::Epitope => "epitope",
            SearchField::Type => "type",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SearchField::All => "All Fields",
            SearchField::Disease => "Disease Name",
            SearchField::Autoantibody => "Autoantibody",
            SearchField::Autoantigen => "Autoantigen",
            SearchField::Epitope => "Epitope",
            SearchField::Type => "Type",
        }
    }

    pub fn parse(s: &str) -> Option<SearchField> {
        SearchField::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl From<ChainField> for SearchField {
    fn from(value: ChainField) -> Self {
        match value {
            ChainField::Disease => SearchField::Disease,
            ChainField::Autoantibody => SearchField::Autoantibody,
            ChainField::Autoantigen => SearchField::Autoantigen,
            ChainField::Epitope => SearchField::Epitope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// String-valued fields accepted by the generic draft setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Search,
    Disease,
    Autoantibody,
    Autoantigen,
    Epitope,
    Type,
    SortBy,
}

impl From<ChainField> for FilterField {
    fn from(value: ChainField) -> Self {
        match value {
            ChainField::Disease => FilterField::Disease,
            ChainField::Autoantibody => FilterField::Autoantibody,
            ChainField::Autoantigen => FilterField::Autoantigen,
            ChainField::Epitope => FilterField::Epitope,
        }
    }
}

pub const DEFAULT_SORT_BY: &str = "disease";

/// Filter selection of the browse screen.
///
/// The same shape is used for the in-progress draft and for the filters that
/// were last applied against the Query Service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterDraft {
    pub search: String,
    pub search_field: SearchField,
    pub disease: String,
    pub autoantibody: String,
    pub autoantigen: String,
    pub epitope: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

pub type AppliedFilters = FilterDraft;

impl Default for FilterDraft {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_field: SearchField::All,
            disease: String::new(),
            autoantibody: String::new(),
            autoantigen: String::new(),
            epitope: String::new(),
            entry_type: String::new(),
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl FilterDraft {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Disease => &self.disease,
            FilterField::Autoantibody => &self.autoantibody,
            FilterField::Autoantigen => &self.autoantigen,
            FilterField::Epitope => &self.epitope,
            FilterField::Type => &self.entry_type,
            FilterField::SortBy => &self.sort_by,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Search => self.search = value,
            FilterField::Disease => self.disease = value,
            FilterField::Autoantibody => self.autoantibody = value,
            FilterField::Autoantigen => self.autoantigen = value,
            FilterField::Epitope => self.epitope = value,
            FilterField::Type => self.entry_type = value,
            FilterField::SortBy => self.sort_by = value,
        }
    }

    pub fn chain_value(&self, field: ChainField) -> &str {
        self.get(field.into())
    }

    /// True when any search or filter value is set. Sorting does not count.
    pub fn has_active_filters(&self) -> bool {
        [&self.search, &self.disease, &self.autoantibody, &self.autoantigen, &self.epitope, &self.entry_type]
            .into_iter()
            .any(|v| !v.trim().is_empty())
    }

    /// Applied-filter chips in display order, skipping blank values.
    pub fn chips(&self) -> Vec<FilterChip> {
        [
            ("Search", &self.search),
            ("Disease", &self.disease),
            ("Autoantibody", &self.autoantibody),
            ("Autoantigen", &self.autoantigen),
            ("Epitope", &self.epitope),
            ("Type", &self.entry_type),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(label, v)| FilterChip { label, value: v.trim().to_string() })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: &'static str,
    pub value: String,
}
