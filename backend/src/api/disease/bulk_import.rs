use common::{entry_import::BulkImportRequest, query_response::MessageResponse};

use crate::http_utils::query_service::QueryService;

pub async fn bulk_import(service: &QueryService, request: BulkImportRequest) -> anyhow::Result<MessageResponse> {
    if request.entries.is_empty() {
        anyhow::bail!("nothing to import");
    }
    tracing::info!("importing {} entries", request.entries.len());
    service.post("/api/disease/bulk/import", &request).await
}
