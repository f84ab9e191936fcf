//! Response bodies returned by the Query Service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{disease_entry::Entry, filter::ChainField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10, total: 0, pages: 0 }
    }
}

impl Pagination {
    /// 1-based inclusive range of the rows on the current page, `None` when empty.
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.page == 0 {
            return None;
        }
        let first = (self.page - 1) * self.limit + 1;
        let last = (self.page * self.limit).min(self.total);
        Some((first, last))
    }

    /// Up to five page numbers around the current page.
    pub fn page_window(&self) -> Vec<u64> {
        let pages = self.pages;
        let page = self.page;
        let width = pages.min(5);
        let start = if pages <= 5 || page <= 3 {
            1
        } else if page + 2 >= pages {
            pages - 4
        } else {
            page - 2
        };
        (start..start + width).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// `GET /api/disease`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesPage {
    #[serde(default)]
    pub data: Vec<Entry>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `GET /api/disease/unique-filtered/{field}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueValues {
    pub field: ChainField,
    #[serde(default)]
    pub data: Vec<String>,
}

/// `GET /api/disease/search/entries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionMatches {
    #[serde(default)]
    pub data: Vec<Entry>,
    #[serde(default)]
    pub count: u64,
}

/// `GET /api/disease/statistics/overview`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsOverview {
    #[serde(default)]
    pub overview: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub disease_breakdown: Vec<CountBucket>,
    #[serde(default)]
    pub top_antibodies: Vec<CountBucket>,
    #[serde(default)]
    pub top_antigens: Vec<CountBucket>,
}

impl StatisticsOverview {
    /// Overview figures as display strings, in key order.
    pub fn overview_rows(&self) -> Vec<(String, String)> {
        self.overview
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), v)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountBucket {
    #[serde(alias = "_id")]
    pub name: String,
    pub count: u64,
}

/// Plain acknowledgement returned by delete/import endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "disease_database.json",
            ExportFormat::Csv => "disease_database.csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u64, pages: u64) -> Pagination {
        Pagination { page, limit: 20, total: pages * 20, pages }
    }

    #[test]
    fn page_window_small_result_sets_show_every_page() {
        assert_eq!(pagination(2, 3).page_window(), vec![1, 2, 3]);
        assert!(pagination(1, 0).page_window().is_empty());
    }

    #[test]
    fn page_window_slides_with_current_page() {
        assert_eq!(pagination(2, 10).page_window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(pagination(6, 10).page_window(), vec![4, 5, 6, 7, 8]);
        assert_eq!(pagination(9, 10).page_window(), vec![6, 7, 8, 9, 10]);
        assert_eq!(pagination(10, 10).page_window(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn showing_range_caps_at_total() {
        let p = Pagination { page: 3, limit: 20, total: 45, pages: 3 };
        assert_eq!(p.showing_range(), Some((41, 45)));
        assert_eq!(Pagination::default().showing_range(), None);
    }

    #[test]
    fn entries_page_defaults_missing_parts() {
        let page: EntriesPage = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(page.pagination, Pagination::default());
    }

    #[test]
    fn statistics_buckets_accept_mongo_ids() {
        let stats: StatisticsOverview = serde_json::from_str(
            r#"{"overview": {"totalEntries": 12, "uniqueDiseases": "4"}, "diseaseBreakdown": [{"_id": "SLE", "count": 7}]}"#,
        )
        .unwrap();
        assert_eq!(stats.disease_breakdown[0].name, "SLE");
        assert_eq!(
            stats.overview_rows(),
            vec![("totalEntries".to_string(), "12".to_string()), ("uniqueDiseases".to_string(), "4".to_string())]
        );
    }
}
