//! Client API calls for user management endpoints.

use common::{
    query_response::MessageResponse,
    users::{User, UserDraft, UserListPage, UserListQuery, UserStats},
};
use dioxus::prelude::*;

#[cfg(feature = "server")]
use crate::api::{into_server_error, query_service};


#[server]
pub async fn list_users(token: Option<String>, query: UserListQuery) -> Result<UserListPage, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::list_users(&service, query).await.map_err(into_server_error)
}

#[server]
pub async fn get_user(token: Option<String>, id: String) -> Result<User, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::get_user(&service, id).await.map_err(into_server_error)
}

#[server]
pub async fn create_user(token: Option<String>, draft: UserDraft) -> Result<User, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::create_user(&service, draft).await.map_err(into_server_error)
}

#[server]
pub async fn update_user(token: Option<String>, id: String, draft: UserDraft) -> Result<User, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::update_user(&service, id, draft).await.map_err(into_server_error)
}

#[server]
pub async fn delete_user(token: Option<String>, id: String, permanent: bool) -> Result<MessageResponse, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::delete_user(&service, id, permanent).await.map_err(into_server_error)
}

#[server]
pub async fn toggle_user_status(token: Option<String>, id: String) -> Result<User, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::toggle_user_status(&service, id).await.map_err(into_server_error)
}

#[server]
pub async fn user_stats(token: Option<String>) -> Result<UserStats, ServerFnError> {
    let service = query_service(token)?;
    backend::api::users::user_stats(&service).await.map_err(into_server_error)
}
