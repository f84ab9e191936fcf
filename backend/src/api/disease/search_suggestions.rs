use common::{entries_query::SuggestionRequest, query_response::SuggestionMatches};

use crate::http_utils::query_service::QueryService;

/// Raw free-text matches feeding the suggestion panel.
pub async fn search_suggestions(service: &QueryService, request: SuggestionRequest) -> anyhow::Result<SuggestionMatches> {
    if request.term.trim().is_empty() {
        return Ok(SuggestionMatches { data: Vec::new(), count: 0 });
    }
    service.get("/api/disease/search/entries", &request.to_query_pairs()).await
}
