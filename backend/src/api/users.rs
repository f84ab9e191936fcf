//! User management routes.

use common::{
    error::QueryError,
    query_response::MessageResponse,
    users::{User, UserDraft, UserListPage, UserListQuery, UserStats},
};
use serde::Deserialize;

use crate::{api::DataEnvelope, http_utils::query_service::QueryService};

#[derive(Debug, Deserialize)]
struct UserBody {
    user: User,
}

fn user_path(id: &str) -> anyhow::Result<String> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '?', '#']) {
        anyhow::bail!("invalid user id: {:?}", id);
    }
    Ok(format!("/api/users/{}", id))
}

pub async fn list_users(service: &QueryService, query: UserListQuery) -> anyhow::Result<UserListPage> {
    let body: DataEnvelope<UserListPage> = service.get("/api/users", &query.to_query_pairs()).await?;
    Ok(body.data)
}

pub async fn get_user(service: &QueryService, id: String) -> anyhow::Result<User> {
    let body: DataEnvelope<UserBody> = service.get(&user_path(&id)?, &[]).await?;
    Ok(body.data.user)
}

pub async fn create_user(service: &QueryService, draft: UserDraft) -> anyhow::Result<User> {
    let draft = draft.validate(true).map_err(QueryError::from)?;
    let body: DataEnvelope<UserBody> = service.post("/api/users", &draft).await?;
    tracing::info!("created user {} ({})", body.data.user.username, body.data.user.role.as_str());
    Ok(body.data.user)
}

/// An empty password leaves the current one in place.
pub async fn update_user(service: &QueryService, id: String, draft: UserDraft) -> anyhow::Result<User> {
    let draft = draft.validate(false).map_err(QueryError::from)?;
    let body: DataEnvelope<UserBody> = service.put(&user_path(&id)?, &draft).await?;
    Ok(body.data.user)
}

/// Soft delete (deactivation) unless `permanent`.
pub async fn delete_user(service: &QueryService, id: String, permanent: bool) -> anyhow::Result<MessageResponse> {
    let query = if permanent { vec![("permanent", "true".to_string())] } else { Vec::new() };
    let response = service.delete(&user_path(&id)?, &query).await?;
    tracing::info!("deleted user {} (permanent = {})", id, permanent);
    Ok(response)
}

pub async fn toggle_user_status(service: &QueryService, id: String) -> anyhow::Result<User> {
    let body: DataEnvelope<UserBody> = service.put_empty(&format!("{}/toggle-status", user_path(&id)?)).await?;
    Ok(body.data.user)
}

pub async fn user_stats(service: &QueryService) -> anyhow::Result<UserStats> {
    let body: DataEnvelope<UserStats> = service.get("/api/users/stats", &[]).await?;
    Ok(body.data)
}
