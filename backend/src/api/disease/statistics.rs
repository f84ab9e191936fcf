use common::query_response::StatisticsOverview;

use crate::{api::DataEnvelope, http_utils::query_service::QueryService};

pub async fn statistics_overview(service: &QueryService) -> anyhow::Result<StatisticsOverview> {
    let body: DataEnvelope<StatisticsOverview> = service.get("/api/disease/statistics/overview", &[]).await?;
    Ok(body.data)
}
