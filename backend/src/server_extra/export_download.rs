use axum::{
    body::Body,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::api::{
    disease::{ExportParams, export_data},
    query_service,
};

async fn _export_download(params: ExportParams) -> anyhow::Result<Response> {
    info!("Exporting entries as {}", params.format.as_str());
    let service = query_service(params.token.clone())?;
    let data = export_data(&service, &params).await?;
    let headers: [(String, String); 2] = [
        ("Content-Type".to_string(), format!("{}; charset=utf-8", params.format.mime_type())),
        (
            "Content-Disposition".to_string(),
            format!("attachment; filename=\"{}\"", params.format.file_name()),
        ),
    ];
    Ok((headers, Body::from(data)).into_response())
}

/// `GET /_export?format=csv|json[&disease&autoantibody&autoantigen&token]`
pub async fn export_download(Query(params): Query<ExportParams>) -> Response {
    match _export_download(params).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("export_download: request failed: {:#?}", e);
            (StatusCode::BAD_GATEWAY, Body::from(e.to_string())).into_response()
        }
    }
}
