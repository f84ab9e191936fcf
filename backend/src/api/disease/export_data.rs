use common::query_response::ExportFormat;
use serde::{Deserialize, Serialize};

use crate::http_utils::query_service::QueryService;

/// Query string of the export download route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: ExportFormat,
    pub disease: Option<String>,
    pub autoantibody: Option<String>,
    pub autoantigen: Option<String>,
    /// Bearer token; a plain link cannot carry an Authorization header.
    pub token: Option<String>,
}

impl ExportParams {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("format", self.format.as_str().to_string())];
        for (key, value) in [("disease", &self.disease), ("autoantibody", &self.autoantibody), ("autoantigen", &self.autoantigen)] {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

/// Whole export file as produced by the Query Service.
pub async fn export_data(service: &QueryService, params: &ExportParams) -> anyhow::Result<bytes::Bytes> {
    let (content_type, body) = service.get_raw("/api/disease/export/data", &params.to_query_pairs()).await?;
    tracing::info!("exported {} bytes as {} ({:?})", body.len(), params.format.as_str(), content_type);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_pairs_skip_blank_filters_and_token() {
        let params = ExportParams {
            format: ExportFormat::Csv,
            disease: Some("SLE".into()),
            autoantibody: Some(" ".into()),
            autoantigen: None,
            token: Some("secret".into()),
        };
        assert_eq!(params.to_query_pairs(), vec![("format", "csv".to_string()), ("disease", "SLE".to_string())]);
    }
}
