//! Server functions wrapping the backend calls, plus the browse engine host.

pub mod auth_api;
pub mod browse_engine_host;
pub mod disease_api;
pub mod users_api;

use common::error::QueryError;
use dioxus::prelude::*;

#[cfg(feature = "server")]
pub(crate) fn into_server_error(e: anyhow::Error) -> ServerFnError {
    ServerFnError::ServerError { message: e.to_string(), code: 500, details: None }
}

/// Query Service client carrying the caller's token.
#[cfg(feature = "server")]
pub(crate) fn query_service(token: Option<String>) -> Result<backend::http_utils::query_service::QueryService, ServerFnError> {
    backend::api::query_service(token).map_err(into_server_error)
}

/// Server function failures reach the UI as network failures.
pub fn to_query_error(err: ServerFnError) -> QueryError {
    match err {
        ServerFnError::ServerError { message, .. } => QueryError::Network(message),
        other => QueryError::Network(other.to_string()),
    }
}

/// Message shown to the user for a failed server function.
pub fn error_text(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
