use common::session::{LoginRequest, LoginResponse};
use dioxus::prelude::*;

#[cfg(feature = "server")]
use crate::api::{into_server_error, query_service};

#[server]
pub async fn login(request: LoginRequest) -> Result<LoginResponse, ServerFnError> {
    let service = query_service(None)?;
    backend::api::auth::login(&service, request).await.map_err(into_server_error)
}
