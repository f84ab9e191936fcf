use common::{
    disease_entry::{Entry, EntryDetail, EntryDraft},
    error::QueryError,
    query_response::MessageResponse,
};

use crate::{api::DataEnvelope, http_utils::query_service::QueryService};

fn entry_path(id: &str) -> anyhow::Result<String> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        anyhow::bail!("invalid entry id: {:?}", id);
    }
    Ok(format!("/api/disease/{}", id))
}

pub async fn get_entry(service: &QueryService, id: String) -> anyhow::Result<EntryDetail> {
    service.get(&entry_path(&id)?, &[]).await
}

/// Validates locally before anything is sent.
pub async fn create_entry(service: &QueryService, draft: EntryDraft) -> anyhow::Result<Entry> {
    let draft = draft.validate().map_err(QueryError::from)?;
    let body: DataEnvelope<Entry> = service.post("/api/disease", &draft).await?;
    tracing::info!("created entry {}", body.data.id);
    Ok(body.data)
}

pub async fn update_entry(service: &QueryService, id: String, draft: EntryDraft) -> anyhow::Result<Entry> {
    let draft = draft.validate().map_err(QueryError::from)?;
    let body: DataEnvelope<Entry> = service.put(&entry_path(&id)?, &draft).await?;
    Ok(body.data)
}

pub async fn delete_entry(service: &QueryService, id: String) -> anyhow::Result<MessageResponse> {
    let response = service.delete(&entry_path(&id)?, &[]).await?;
    tracing::info!("deleted entry {}", id);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_path_rejects_traversal() {
        assert_eq!(entry_path(" 65f0c0ffee ").unwrap(), "/api/disease/65f0c0ffee");
        assert!(entry_path("").is_err());
        assert!(entry_path("../users").is_err());
    }
}
