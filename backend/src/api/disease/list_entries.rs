use common::{entries_query::EntriesQuery, query_response::EntriesPage};

use crate::http_utils::query_service::QueryService;

pub async fn list_entries(service: &QueryService, query: EntriesQuery) -> anyhow::Result<EntriesPage> {
    service.get("/api/disease", &query.to_query_pairs()).await
}
