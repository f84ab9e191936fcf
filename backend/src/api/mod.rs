//! One async function per Query Service endpoint.

pub mod auth;
pub mod disease;
pub mod users;

use crate::http_utils::query_service::QueryService;

/// Client configured from the environment, carrying the caller's bearer token.
pub fn query_service(token: Option<String>) -> anyhow::Result<QueryService> {
    Ok(QueryService::from_env()?.with_token(token))
}

/// `{ "data": ... }` envelope used by most endpoints.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}
