//! Client API calls for disease entry endpoints.

use common::{
    disease_entry::{Entry, EntryDetail, EntryDraft},
    entries_query::{EntriesQuery, SuggestionRequest, ValueScope},
    entry_import::BulkImportRequest,
    filter::ChainField,
    query_response::{EntriesPage, MessageResponse, StatisticsOverview, SuggestionMatches, UniqueValues},
};
use dioxus::prelude::*;

#[cfg(feature = "server")]
use crate::api::{into_server_error, query_service};


#[server]
pub async fn list_entries(token: Option<String>, query: EntriesQuery) -> Result<EntriesPage, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::list_entries(&service, query).await.map_err(into_server_error)
}

#[server]
pub async fn unique_values(token: Option<String>, field: ChainField, scope: ValueScope) -> Result<UniqueValues, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::unique_values(&service, field, scope).await.map_err(into_server_error)
}

#[server]
pub async fn search_suggestions(token: Option<String>, request: SuggestionRequest) -> Result<SuggestionMatches, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::search_suggestions(&service, request).await.map_err(into_server_error)
}

#[server]
pub async fn statistics_overview(token: Option<String>) -> Result<StatisticsOverview, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::statistics_overview(&service).await.map_err(into_server_error)
}

#[server]
pub async fn get_entry(token: Option<String>, id: String) -> Result<EntryDetail, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::get_entry(&service, id).await.map_err(into_server_error)
}

#[server]
pub async fn create_entry(token: Option<String>, draft: EntryDraft) -> Result<Entry, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::create_entry(&service, draft).await.map_err(into_server_error)
}

#[server]
pub async fn update_entry(token: Option<String>, id: String, draft: EntryDraft) -> Result<Entry, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::update_entry(&service, id, draft).await.map_err(into_server_error)
}

#[server]
pub async fn delete_entry(token: Option<String>, id: String) -> Result<MessageResponse, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::delete_entry(&service, id).await.map_err(into_server_error)
}

#[server]
pub async fn bulk_import(token: Option<String>, request: BulkImportRequest) -> Result<MessageResponse, ServerFnError> {
    let service = query_service(token)?;
    backend::api::disease::bulk_import(&service, request).await.map_err(into_server_error)
}
