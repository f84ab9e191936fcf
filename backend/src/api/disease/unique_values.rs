use common::{entries_query::ValueScope, filter::ChainField, query_response::UniqueValues};
use serde::Deserialize;

use crate::http_utils::query_service::QueryService;

#[derive(Debug, Deserialize)]
struct ValuesBody {
    #[serde(default)]
    data: Vec<String>,
}

/// Distinct values of `field`. The unscoped disease list comes from the plain
/// `unique` route, everything else from `unique-filtered` with the ancestors as
/// query parameters.
pub async fn unique_values(service: &QueryService, field: ChainField, scope: ValueScope) -> anyhow::Result<UniqueValues> {
    let body: ValuesBody = if field == ChainField::Disease && scope.is_empty() {
        service.get(&format!("/api/disease/unique/{}", field.as_str()), &[]).await?
    } else {
        let path = format!("/api/disease/unique-filtered/{}", field.as_str());
        service.get(&path, &scope.to_query_pairs()).await?
    };
    Ok(UniqueValues { field, data: body.data })
}
